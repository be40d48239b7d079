//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (`SeedError`, `InventoryError`, `ConfigError`) live
//! next to the code that produces them. This module provides the shared
//! classification trait so callers can log and route them uniformly.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each concern has its own error type with specific variants
//! - **Severity Classification**: Errors are categorized for handling strategies
//! - **Stable Codes**: Every variant maps to a static code for logs and metrics

/// Severity level of an error, used for categorization and handling strategies.
///
/// - **Validation**: Malformed input, rejected without retry
/// - **Protocol**: The caller broke the session contract (forged or unsigned data)
/// - **Internal**: Unexpected state inconsistencies that require investigation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input, should not retry without changes.
    ///
    /// Examples: non-hex seed, inventory too small for the claimed usage
    Validation,

    /// Protocol violation, treated as a potential attack.
    ///
    /// Examples: signature mismatch on a session seed
    Protocol,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: a consumable decremented below zero after passing validation
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Protocol => "protocol",
            Self::Internal => "internal",
        }
    }

    /// Returns true if the error should be reported as a suspected attack.
    pub const fn is_protocol(&self) -> bool {
        matches!(self, Self::Protocol)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on who is at fault, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
