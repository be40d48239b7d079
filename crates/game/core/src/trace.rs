//! Full diagnostic record of one replay.
//!
//! The engine always builds a [`ReplayTrace`]; the public validation surface
//! trims it down to a [`ValidationResult`]. Traces are for audit tooling only
//! and never feed back into scoring.

use crate::config::GameConfig;
use crate::fraud::FraudSignals;
use crate::platform::Platform;
use crate::replay::{MoveRecord, Replay, ReplayHalt};
use crate::verdict::{FraudReason, ValidationResult};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplayTrace {
    pub seed_number: u32,
    pub platforms: Vec<Platform>,
    pub moves: Vec<MoveRecord>,
    pub halt: Option<ReplayHalt>,
    pub raw_points: u32,
    /// Absent when replay halted or never ran.
    pub signals: Option<FraudSignals>,
    pub result: ValidationResult,
}

impl ReplayTrace {
    pub fn result(&self) -> &ValidationResult {
        &self.result
    }

    pub fn into_result(self) -> ValidationResult {
        self.result
    }
}

/// Accumulates trace sections as the engine advances.
#[derive(Debug)]
pub struct TraceBuilder {
    seed_number: u32,
    platforms: Vec<Platform>,
    replay: Replay,
    signals: Option<FraudSignals>,
}

impl TraceBuilder {
    pub fn new(seed_number: u32) -> Self {
        Self {
            seed_number,
            platforms: Vec::new(),
            replay: Replay::default(),
            signals: None,
        }
    }

    pub fn platforms(mut self, platforms: Vec<Platform>) -> Self {
        self.platforms = platforms;
        self
    }

    pub fn replay(mut self, replay: Replay) -> Self {
        self.replay = replay;
        self
    }

    pub fn signals(mut self, signals: FraudSignals) -> Self {
        self.signals = Some(signals);
        self
    }

    /// Finishes with a result derived from the recorded replay.
    pub fn finish(self, config: &GameConfig) -> ReplayTrace {
        let result = if self.replay.halt.is_some() {
            ValidationResult::invalid_data(self.replay.time_played)
        } else {
            let fraud_reason = self
                .signals
                .as_ref()
                .map(|signals| signals.classify(&config.fraud))
                .unwrap_or(FraudReason::None);
            ValidationResult {
                time_played: self.replay.time_played,
                score: config.bridge.score(self.replay.raw_points),
                blocks_passed: self.replay.blocks_passed(),
                is_fraud: fraud_reason.is_fraud(),
                fraud_reason,
            }
        };
        self.build(result)
    }

    /// Finishes with a caller-supplied result, e.g. rejected item usage.
    pub fn finish_with(self, result: ValidationResult) -> ReplayTrace {
        self.build(result)
    }

    fn build(self, result: ValidationResult) -> ReplayTrace {
        ReplayTrace {
            seed_number: self.seed_number,
            platforms: self.platforms,
            raw_points: self.replay.raw_points,
            moves: self.replay.records,
            halt: self.replay.halt,
            signals: self.signals,
            result,
        }
    }
}
