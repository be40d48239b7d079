//! Validator configuration structures and loaders.
use std::env;

use game_core::GameConfig;

/// Environment variable holding the seed signing secret.
pub const SIGNING_SECRET_ENV: &str = "SEED_SIGNING_SECRET";

/// Everything a [`crate::SessionValidator`] needs besides per-call input.
#[derive(Clone, Default)]
pub struct ValidatorConfig {
    pub game: GameConfig,
    pub signing_secret: String,
}

impl ValidatorConfig {
    pub fn new(game: GameConfig, signing_secret: impl Into<String>) -> Self {
        Self {
            game,
            signing_secret: signing_secret.into(),
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SEED_SIGNING_SECRET` - HMAC secret shared with the seed issuer (default: empty)
    /// - `PERFECT_TOLERANCE_PX` - Override for the perfect landing tolerance
    /// - `SCORE_MULTIPLIER` - Override for the final score multiplier
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(secret) = env::var(SIGNING_SECRET_ENV) {
            config.signing_secret = secret;
        }
        if let Some(tolerance) = read_env::<f64>("PERFECT_TOLERANCE_PX") {
            config.game.bridge.perfect_tolerance = tolerance.max(0.0);
        }
        if let Some(multiplier) = read_env::<u32>("SCORE_MULTIPLIER") {
            config.game.bridge.score_multiplier = multiplier;
        }

        config
    }

    #[must_use]
    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }
}

impl std::fmt::Debug for ValidatorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorConfig")
            .field("game", &self.game)
            .field("signing_secret", &"<redacted>")
            .finish()
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
