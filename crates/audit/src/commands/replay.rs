//! Replay a stored session through the validator
//!
//! Loads a client payload, optional inventory snapshot and tuning, then prints
//! the verdict together with every intermediate value of the replay.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use serde::Serialize;
use std::path::PathBuf;

use game_content::{InventoryLoader, SessionLoader};
use game_core::{FraudSignals, Landing, ReplayTrace, ValidationResult};
use session_validator::{SeedSigner, SessionValidator, ValidationOutcome, ValidatorConfig};

use super::resolve_game_config;
use crate::secret::require_secret;

/// Validate a stored session and print the replay trace
#[derive(Parser)]
pub struct Replay {
    /// Session JSON as submitted by the client
    #[arg(value_name = "SESSION")]
    session: PathBuf,

    /// Inventory snapshot JSON (defaults to an empty inventory)
    #[arg(short, long, value_name = "FILE")]
    inventory: Option<PathBuf>,

    /// Game tuning TOML (defaults to built-in tuning with env overrides)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Re-sign the seed locally instead of checking the stored signature
    #[arg(long)]
    skip_signature: bool,

    /// Treat the daily challenge as "pass at least this many blocks"
    #[arg(long, value_name = "BLOCKS")]
    challenge_blocks: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Verdict, signals and one line per move
    Summary,
    /// Full JSON output
    Json,
    /// Pretty-printed debug format
    Debug,
}

#[derive(Serialize)]
struct Report<'a> {
    outcome: &'a ValidationOutcome,
    trace: &'a ReplayTrace,
}

impl Replay {
    pub fn execute(self) -> Result<()> {
        let env = if self.skip_signature {
            ValidatorConfig::from_env()
        } else {
            require_secret()?
        };
        let game = resolve_game_config(self.config.as_deref(), env.game)?;

        let mut session = SessionLoader::load(&self.session)?;
        let mut inventory = InventoryLoader::load_or_empty(self.inventory.as_deref())?;

        let secret = if self.skip_signature {
            tracing::warn!("signature check skipped, seed re-signed locally");
            let local = "session-audit";
            session.signature = SeedSigner::new(local).sign(&session.seed);
            local.to_string()
        } else {
            env.signing_secret
        };

        let validator = SessionValidator::new(ValidatorConfig::new(game, secret))?;
        let challenge = |result: &ValidationResult| {
            self.challenge_blocks
                .is_some_and(|blocks| result.blocks_passed >= blocks)
        };
        let (outcome, trace) = validator
            .validate_with_trace(&mut inventory, &session, &challenge)
            .with_context(|| format!("Session rejected: {}", self.session.display()))?;

        println!(
            "{} {}",
            style("Session File:").bold().cyan(),
            self.session.display()
        );
        println!();

        match self.format {
            OutputFormat::Summary => print_summary(&outcome, &trace),
            OutputFormat::Json => {
                let report = Report {
                    outcome: &outcome,
                    trace: &trace,
                };
                let json = serde_json::to_string_pretty(&report)
                    .context("Failed to serialize report to JSON")?;
                println!("{}", json);
            }
            OutputFormat::Debug => println!("{:#?}", trace),
        }

        Ok(())
    }
}

fn print_summary(outcome: &ValidationOutcome, trace: &ReplayTrace) {
    println!("{}", style("=== Verdict ===").bold().green());
    let reason = if outcome.points_awardable() {
        style(outcome.fraud_reason.as_str()).green()
    } else {
        style(outcome.fraud_reason.as_str()).red()
    };
    println!("  Reason: {}", reason);
    println!("  Score: {}", outcome.score);
    println!("  Blocks Passed: {}", outcome.blocks_passed);
    println!("  Time Played: {:.0} ms", outcome.time_played);
    println!("  Streak Challenge: {}", outcome.streak_challenge_completed);
    if let Some(halt) = &trace.halt {
        println!("  Halted: {:?}", halt);
    }
    println!();

    if let Some(signals) = &trace.signals {
        print_signals(signals);
    }

    if trace.moves.is_empty() {
        return;
    }
    println!("{}", style("Moves:").bold().yellow());
    for record in &trace.moves {
        let landing = match record.landing {
            Landing::Perfect => style("perfect").green(),
            Landing::Normal => style("normal").white(),
            Landing::Miss => style("miss").red(),
        };
        println!(
            "  #{:<3} t={:<8.0} press={:<7.1} reach={:<7.2} target#{} [{:.2}, {:.2}] tip={:.2} {} +{}",
            record.index,
            record.start_time,
            record.press_ms,
            record.reach,
            record.target_index,
            record.target_x,
            record.target_right,
            record.tip,
            landing,
            record.points,
        );
    }
    println!();
}

fn print_signals(signals: &FraudSignals) {
    println!("{}", style("Signals:").bold().yellow());
    println!(
        "  Press Std Dev: {} (min {})",
        format_opt(signals.press_std_dev),
        format_opt(signals.press_std_threshold)
    );
    println!(
        "  Gap Std Dev: {} (min {})",
        format_opt(signals.gap_std_dev),
        format_opt(signals.gap_std_threshold)
    );
    println!(
        "  Perfect Rate: {} of {} = {} (max {:.2})",
        signals.perfect_landings,
        signals.landings,
        format_opt(signals.perfect_rate),
        signals.perfect_rate_limit
    );
    println!("  Longest Perfect Streak: {}", signals.longest_perfect_streak);
    println!();
}

fn format_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}
