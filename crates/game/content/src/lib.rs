//! File-backed inputs for offline session replay.
//!
//! This crate loads the data an operator needs to rerun a validation outside
//! the backend:
//! - Game tuning (data-driven via TOML)
//! - Submitted sessions (JSON, as sent by the client)
//! - Player inventory snapshots (JSON)
//!
//! All loaders use game-core types directly with serde for deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, InventoryLoader, LoadResult, SessionLoader};
