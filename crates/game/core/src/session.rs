//! Client-submitted session payload.

use crate::inventory::ItemVariant;

/// One timed press-and-release action.
///
/// All times are milliseconds. `duration` covers the press and the bridge's
/// fall rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Move {
    pub start_time: f64,
    pub duration: f64,
    /// Idle time between the target becoming active and the press.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub idle_duration_ms: Option<f64>,
}

impl Move {
    pub const fn new(start_time: f64, duration: f64) -> Self {
        Self {
            start_time,
            duration,
            idle_duration_ms: None,
        }
    }

    #[must_use]
    pub const fn with_idle(mut self, idle_ms: f64) -> Self {
        self.idle_duration_ms = Some(idle_ms);
        self
    }

    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// Idle time before the press, zero when the client did not report it.
    pub fn idle_ms(&self) -> f64 {
        self.idle_duration_ms.unwrap_or(0.0)
    }

    /// Instant, relative to the target's patrol clock, at which the landing is judged.
    pub fn landing_elapsed_ms(&self) -> f64 {
        self.idle_ms() + self.duration
    }

    /// True when every reported time is finite and non-negative.
    pub fn has_valid_timing(&self) -> bool {
        let valid = |value: f64| value.is_finite() && value >= 0.0;
        valid(self.start_time) && valid(self.duration) && self.idle_duration_ms.is_none_or(valid)
    }
}

/// One server-validated batch of moves tied to a single issued seed.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Session {
    /// Hex seed issued by the server.
    pub seed: String,
    /// Hex HMAC-SHA256 of `seed`.
    pub signature: String,
    pub moves: Vec<Move>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub used_items: Vec<ItemVariant>,
}

impl Session {
    pub fn new(seed: impl Into<String>, signature: impl Into<String>, moves: Vec<Move>) -> Self {
        Self {
            seed: seed.into(),
            signature: signature.into(),
            moves,
            used_items: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_used_items(mut self, used_items: Vec<ItemVariant>) -> Self {
        self.used_items = used_items;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landing_instant_includes_idle_and_duration() {
        let mv = Move::new(1_000.0, 450.0).with_idle(120.0);
        assert_eq!(mv.end_time(), 1_450.0);
        assert_eq!(mv.landing_elapsed_ms(), 570.0);
        assert_eq!(Move::new(0.0, 300.0).landing_elapsed_ms(), 300.0);
    }

    #[test]
    fn timing_validation_rejects_negative_and_non_finite() {
        assert!(Move::new(0.0, 0.0).has_valid_timing());
        assert!(!Move::new(-1.0, 100.0).has_valid_timing());
        assert!(!Move::new(0.0, -0.5).has_valid_timing());
        assert!(!Move::new(f64::NAN, 100.0).has_valid_timing());
        assert!(!Move::new(0.0, f64::INFINITY).has_valid_timing());
        assert!(!Move::new(0.0, 100.0).with_idle(-3.0).has_valid_timing());
    }
}
