//! Offline audit tooling for submitted sessions.
//!
//! Reruns the authoritative validation on stored sessions and prints every
//! intermediate value the engine computed.
//! Run with: `session-audit <command>`

mod commands;
mod secret;

use anyhow::Result;
use clap::Parser;
use commands::{IssueSeed, Platforms, Replay};

/// Session audit tools
#[derive(Parser)]
#[command(name = "session-audit")]
#[command(about = "Replay and inspect gameplay sessions", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Validate a stored session and print the replay trace
    Replay(Replay),

    /// Print the platform sequence derived from a seed
    Platforms(Platforms),

    /// Issue signed seeds with the configured secret
    IssueSeed(IssueSeed),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for SEED_SIGNING_SECRET and tuning overrides)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Replay(cmd) => cmd.execute(),
        Command::Platforms(cmd) => cmd.execute(),
        Command::IssueSeed(cmd) => cmd.execute(),
    }
}
