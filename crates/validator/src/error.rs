//! Terminal errors surfaced by the validation API.
//!
//! Only protocol violations and unusable tuning end a call with `Err`.
//! Malformed moves, rejected items and fraud are reported as data in
//! [`crate::ValidationOutcome`].
use thiserror::Error;

use game_core::{ConfigError, ErrorSeverity, GameError, SeedError};

pub type Result<T> = std::result::Result<T, ValidationError>;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("session seed signature does not match")]
    InvalidSignature,

    #[error("session seed is malformed")]
    InvalidSeed(#[source] SeedError),

    #[error("seed signing secret is empty")]
    EmptySecret,

    #[error("validator tuning is invalid")]
    InvalidConfig(#[from] ConfigError),
}

impl GameError for ValidationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidSignature | Self::InvalidSeed(_) => ErrorSeverity::Protocol,
            Self::EmptySecret | Self::InvalidConfig(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidSignature => "SESSION_INVALID_SIGNATURE",
            Self::InvalidSeed(_) => "SESSION_INVALID_SEED",
            Self::EmptySecret => "VALIDATOR_EMPTY_SECRET",
            Self::InvalidConfig(_) => "VALIDATOR_INVALID_CONFIG",
        }
    }
}
