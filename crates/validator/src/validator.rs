//! Session validation entry points.
//!
//! Stages run in a fixed order and the first terminal one wins:
//! signature → seed → item usage → replay → fraud classification.

use game_core::{
    GameConfig, GameError, Inventory, ReplayEngine, ReplayTrace, Session, ValidationResult,
    seed_number_from_hex,
};

use crate::config::ValidatorConfig;
use crate::error::{Result, ValidationError};
use crate::outcome::ValidationOutcome;
use crate::signer::{SeedSigner, SignedSeed};

/// Daily streak predicate supplied by the streak subsystem.
pub type DailyChallenge<'a> = &'a dyn Fn(&ValidationResult) -> bool;

/// Validates sessions under one tuning and signing secret.
///
/// Holds no per-session state; share it freely across threads.
#[derive(Clone, Debug)]
pub struct SessionValidator {
    game: GameConfig,
    signer: SeedSigner,
}

impl SessionValidator {
    /// Creates a validator, rejecting an empty secret or unusable tuning.
    pub fn new(config: ValidatorConfig) -> Result<Self> {
        if config.signing_secret.is_empty() {
            return Err(ValidationError::EmptySecret);
        }
        config.game.validate()?;
        Ok(Self {
            signer: SeedSigner::new(&config.signing_secret),
            game: config.game,
        })
    }

    pub fn game_config(&self) -> &GameConfig {
        &self.game
    }

    pub fn signer(&self) -> &SeedSigner {
        &self.signer
    }

    /// Issues a signed seed for a new session.
    pub fn issue_seed(&self) -> SignedSeed {
        self.signer.issue()
    }

    /// Validates `session` and spends its claimed items from `inventory`.
    ///
    /// Returns `Err` only for protocol violations; malformed moves, rejected
    /// items and fraud come back as an `Ok` outcome with a non-`None` reason.
    pub fn validate(
        &self,
        inventory: &mut Inventory,
        session: &Session,
        daily_challenge: DailyChallenge<'_>,
    ) -> Result<ValidationOutcome> {
        self.validate_with_trace(inventory, session, daily_challenge)
            .map(|(outcome, _)| outcome)
    }

    /// Same as [`Self::validate`], also returning the full replay trace.
    ///
    /// The trace is for audit only and carries the same verdict.
    pub fn validate_with_trace(
        &self,
        inventory: &mut Inventory,
        session: &Session,
        daily_challenge: DailyChallenge<'_>,
    ) -> Result<(ValidationOutcome, ReplayTrace)> {
        if !self.signer.verify(&session.seed, &session.signature) {
            tracing::warn!(
                seed_len = session.seed.len(),
                "session seed signature mismatch"
            );
            return Err(ValidationError::InvalidSignature);
        }

        let seed_number = seed_number_from_hex(&session.seed).map_err(|error| {
            tracing::warn!(code = error.error_code(), %error, "signed seed is not hex");
            ValidationError::InvalidSeed(error)
        })?;

        let engine = ReplayEngine::new(&self.game);
        let trace = match inventory.spend(&session.used_items) {
            Ok(usage) => {
                tracing::debug!(
                    seed_number,
                    moves = session.moves.len(),
                    items = usage.iter().map(|(_, count)| count).sum::<u32>(),
                    "replaying session"
                );
                engine.replay(seed_number, &session.moves)
            }
            Err(error) => {
                tracing::warn!(
                    seed_number,
                    code = error.error_code(),
                    %error,
                    "rejected item usage"
                );
                engine.rejected_items(seed_number)
            }
        };

        let result = trace.result();
        let challenge_met = result.points_awardable() && daily_challenge(result);
        let outcome = ValidationOutcome::new(result, challenge_met);
        log_verdict(seed_number, &trace, &outcome);

        Ok((outcome, trace))
    }
}

fn log_verdict(seed_number: u32, trace: &ReplayTrace, outcome: &ValidationOutcome) {
    if outcome.points_awardable() {
        tracing::info!(
            seed_number,
            score = outcome.score,
            blocks_passed = outcome.blocks_passed,
            streak = outcome.streak_challenge_completed,
            "session accepted"
        );
    } else if outcome.is_fraud {
        tracing::warn!(
            seed_number,
            score = outcome.score,
            reason = outcome.fraud_reason.as_str(),
            "session flagged as fraud"
        );
    } else {
        tracing::warn!(
            seed_number,
            reason = outcome.fraud_reason.as_str(),
            halt = ?trace.halt,
            "session rejected as invalid"
        );
    }
}

/// Validates one session with default tuning.
pub fn validate(
    inventory: &mut Inventory,
    session: &Session,
    daily_challenge: DailyChallenge<'_>,
    secret: &str,
) -> Result<ValidationOutcome> {
    SessionValidator::new(ValidatorConfig::new(GameConfig::default(), secret))?
        .validate(inventory, session, daily_challenge)
}

/// Diagnostic variant of [`validate`] returning the full trace.
pub fn validate_with_trace(
    inventory: &mut Inventory,
    session: &Session,
    daily_challenge: DailyChallenge<'_>,
    secret: &str,
) -> Result<(ValidationOutcome, ReplayTrace)> {
    SessionValidator::new(ValidatorConfig::new(GameConfig::default(), secret))?
        .validate_with_trace(inventory, session, daily_challenge)
}
