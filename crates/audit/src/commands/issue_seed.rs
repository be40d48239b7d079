//! Issue signed session seeds

use anyhow::{Context, Result};
use clap::Parser;
use session_validator::SeedSigner;

use crate::secret::require_secret;

/// Issue signed seeds, one JSON object per line
#[derive(Parser)]
pub struct IssueSeed {
    /// Number of seeds to issue
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,
}

impl IssueSeed {
    pub fn execute(self) -> Result<()> {
        let config = require_secret()?;
        let signer = SeedSigner::new(&config.signing_secret);

        for _ in 0..self.count {
            let issued = signer.issue();
            let line = serde_json::to_string(&issued).context("Failed to serialize seed")?;
            println!("{}", line);
        }
        Ok(())
    }
}
