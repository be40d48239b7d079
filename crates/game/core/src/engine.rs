//! Session replay pipeline.
//!
//! The [`ReplayEngine`] is the authoritative scorer for a session. It derives
//! the platform sequence from the seed, replays the moves against it and runs
//! the fraud heuristics, recording every stage in a [`ReplayTrace`]:
//! generate → replay → classify

use crate::config::GameConfig;
use crate::fraud::FraudSignals;
use crate::platform::generate_platforms;
use crate::replay::MoveReplayer;
use crate::session::Move;
use crate::trace::{ReplayTrace, TraceBuilder};
use crate::verdict::ValidationResult;

/// Replays sessions under one tuning.
///
/// Holds no per-session state; a single engine may serve any number of
/// concurrent replays.
#[derive(Clone, Copy, Debug)]
pub struct ReplayEngine<'a> {
    config: &'a GameConfig,
}

impl<'a> ReplayEngine<'a> {
    pub fn new(config: &'a GameConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    /// Number of platforms needed for `move_count` moves: origin, one per
    /// move, one lookahead.
    pub const fn platform_count(move_count: usize) -> usize {
        move_count + 2
    }

    /// Replays `moves` for the session seeded with `seed_number`.
    pub fn replay(&self, seed_number: u32, moves: &[Move]) -> ReplayTrace {
        let platforms = generate_platforms(
            self.config,
            seed_number,
            Self::platform_count(moves.len()),
        );
        let replay = MoveReplayer::new(&self.config.bridge, &self.config.patrol, &platforms)
            .replay(moves);

        let mut builder = TraceBuilder::new(seed_number);
        if replay.halt.is_none() {
            builder = builder.signals(FraudSignals::collect(&replay.records, &self.config.fraud));
        }
        builder.platforms(platforms).replay(replay).finish(self.config)
    }

    /// Trace for a session rejected before replay because of item usage.
    pub fn rejected_items(&self, seed_number: u32) -> ReplayTrace {
        TraceBuilder::new(seed_number).finish_with(ValidationResult::invalid_item())
    }
}
