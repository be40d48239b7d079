//! Submitted session loader.

use std::path::Path;

use game_core::Session;

use crate::loaders::{LoadResult, read_file};

/// Loader for client-submitted sessions stored as JSON.
///
/// The file holds exactly what the client posted: `seed`, `signature`,
/// `moves` and an optional `usedItems` list.
pub struct SessionLoader;

impl SessionLoader {
    pub fn load(path: &Path) -> LoadResult<Session> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid session {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Session> {
        serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse session JSON: {}", e))
    }
}
