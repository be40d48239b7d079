//! Deterministic session replay and anti-cheat validation.
//!
//! `game-core` rebuilds the obstacle layout a client saw from the session
//! seed, replays the client's timed moves against it and classifies the
//! result. It performs no I/O, keeps no state between calls and never logs,
//! so the same replay can be rerun anywhere for audit.
//!
//! Dependency order, leaves first:
//! - [`rng`] mulberry32 and seed derivation
//! - [`platform`] obstacle sequence generation
//! - [`patrol`] closed-form position of moving platforms
//! - [`inventory`] consumable usage checks
//! - [`replay`] move replay and hit detection
//! - [`fraud`] statistical bot heuristics
//! - [`engine`] the pipeline tying them together, recorded in a [`trace`]
pub mod config;
pub mod engine;
pub mod error;
pub mod fraud;
pub mod inventory;
pub mod patrol;
pub mod platform;
pub mod replay;
pub mod rng;
pub mod session;
pub mod trace;
pub mod verdict;

pub use config::{BridgeRules, ConfigError, FraudRules, GameConfig, PatrolRules, PlatformRules};
pub use engine::ReplayEngine;
pub use error::{ErrorSeverity, GameError};
pub use fraud::FraudSignals;
pub use inventory::{
    ConsumableItem, Inventory, InventoryError, InventoryItem, ItemUsage, ItemVariant,
};
pub use patrol::{PatrolLeg, PatrolPath, position_at};
pub use platform::{Patrol, Platform, PlatformGenerator, generate_platforms};
pub use replay::{Landing, MoveRecord, MoveReplayer, Replay, ReplayHalt};
pub use rng::{Mulberry32, RandomSource, SeedError, seed_number_from_hex};
pub use session::{Move, Session};
pub use trace::{ReplayTrace, TraceBuilder};
pub use verdict::{FraudReason, ValidationResult};
