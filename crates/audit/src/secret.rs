//! Signing secret resolution shared by commands.

use anyhow::{Result, bail};
use session_validator::{SIGNING_SECRET_ENV, ValidatorConfig};

/// Environment-derived config with a non-empty secret.
pub fn require_secret() -> Result<ValidatorConfig> {
    let config = ValidatorConfig::from_env();
    if config.signing_secret.is_empty() {
        bail!(
            "{} is not set\n\nHint: export it or add it to .env",
            SIGNING_SECRET_ENV
        );
    }
    Ok(config)
}
