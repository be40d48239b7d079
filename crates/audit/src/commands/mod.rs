//! Command implementations for session-audit
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod issue_seed;
mod platforms;
mod replay;

pub use issue_seed::IssueSeed;
pub use platforms::Platforms;
pub use replay::Replay;

use std::path::Path;

use anyhow::Result;
use game_content::ConfigLoader;
use game_core::GameConfig;

/// Tuning from `path` when given, otherwise `fallback`.
fn resolve_game_config(path: Option<&Path>, fallback: GameConfig) -> Result<GameConfig> {
    match path {
        Some(path) => ConfigLoader::load(path),
        None => Ok(fallback),
    }
}
