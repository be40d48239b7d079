//! Server-side validation of submitted gameplay sessions.
//!
//! This crate wires the pure replay engine from `game-core` to the inputs a
//! backend actually holds: a signing secret, the player's inventory snapshot
//! and a daily challenge predicate. Consumers call [`SessionValidator`] (or
//! the [`validate`] shorthand) and decide on points from the returned
//! [`ValidationOutcome`].
//!
//! Modules are organized by responsibility:
//! - [`signer`] issues and verifies HMAC-signed session seeds
//! - [`validator`] runs the validation stages and logs verdicts
//! - [`outcome`] is the trimmed result handed to point awarding
//! - [`config`] and [`error`] provide setup and terminal failures
pub mod config;
pub mod error;
pub mod outcome;
pub mod signer;
pub mod validator;

pub use config::{SIGNING_SECRET_ENV, ValidatorConfig};
pub use error::{Result, ValidationError};
pub use outcome::ValidationOutcome;
pub use signer::{SEED_BYTES, SeedSigner, SignedSeed, generate_signed_seed};
pub use validator::{DailyChallenge, SessionValidator, validate, validate_with_trace};
