//! Collaborator-facing result of one validation call.
use serde::{Deserialize, Serialize};

use game_core::{FraudReason, ValidationResult};

/// What the point-awarding service receives.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    pub score: u32,
    pub streak_challenge_completed: bool,
    pub blocks_passed: u32,
    pub is_fraud: bool,
    pub fraud_reason: FraudReason,
    pub time_played: f64,
}

impl ValidationOutcome {
    /// Combines a replay result with the daily challenge verdict.
    ///
    /// The challenge only counts when the session may be awarded points.
    pub fn new(result: &ValidationResult, challenge_met: bool) -> Self {
        Self {
            score: result.score,
            streak_challenge_completed: challenge_met && result.points_awardable(),
            blocks_passed: result.blocks_passed,
            is_fraud: result.is_fraud,
            fraud_reason: result.fraud_reason,
            time_played: result.time_played,
        }
    }

    pub fn points_awardable(&self) -> bool {
        self.fraud_reason.authorizes_points()
    }
}
