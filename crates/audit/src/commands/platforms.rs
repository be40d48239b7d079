//! Inspect the platform sequence derived from a seed
//!
//! Useful when a client reports a layout that disagrees with the server.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use game_core::{GameConfig, Platform, generate_platforms, position_at, seed_number_from_hex};

use super::resolve_game_config;

/// Print generated platforms for a seed
#[derive(Parser)]
pub struct Platforms {
    /// Hex seed as issued to the client
    #[arg(value_name = "SEED")]
    seed: String,

    /// Number of platforms to generate, origin included
    #[arg(short = 'n', long, default_value_t = 12)]
    count: usize,

    /// Game tuning TOML (defaults to built-in tuning)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Also show each platform's position this many ms after it became the target
    #[arg(long, value_name = "MS")]
    at: Option<f64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// One line per platform
    Summary,
    /// Full JSON output
    Json,
}

impl Platforms {
    pub fn execute(self) -> Result<()> {
        let game = resolve_game_config(self.config.as_deref(), GameConfig::default())?;
        let seed_number = seed_number_from_hex(&self.seed)
            .with_context(|| format!("Invalid seed: {}", self.seed))?;
        let platforms = generate_platforms(&game, seed_number, self.count);

        match self.format {
            OutputFormat::Summary => print_summary(&game, seed_number, &platforms, self.at),
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&platforms)
                    .context("Failed to serialize platforms to JSON")?;
                println!("{}", json);
            }
        }
        Ok(())
    }
}

fn print_summary(game: &GameConfig, seed_number: u32, platforms: &[Platform], at: Option<f64>) {
    println!(
        "{} {:#010x}",
        style("Seed Number:").bold().cyan(),
        seed_number
    );
    println!();

    for platform in platforms {
        let kind = match &platform.patrol {
            Some(patrol) => format!(
                "patrol [{:.2}, {:.2}] @ {:.1}px/s",
                patrol.min_x, patrol.max_x, patrol.base_speed
            ),
            None => "stationary".to_string(),
        };
        print!(
            "  #{:<4} x={:<9.2} w={:<7.2} {}",
            platform.index, platform.x, platform.w, kind
        );
        if let Some(ms) = at {
            print!("  x@{}ms={:.2}", ms, position_at(platform, ms, &game.patrol));
        }
        println!();
    }
}
