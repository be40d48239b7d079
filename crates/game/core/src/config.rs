//! Game tuning constants and tunable parameters.
//!
//! Every component of the replay engine reads its constants from a single
//! immutable [`GameConfig`] handed in at construction. Tests build variants of
//! it freely; nothing here is global.

/// Complete tuning for one replay.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub platforms: PlatformRules,
    pub patrol: PatrolRules,
    pub bridge: BridgeRules,
    pub fraud: FraudRules,
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks that the tuning describes a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.platforms;
        ensure_range("platforms.gap", p.min_gap, p.max_gap)?;
        ensure_range("platforms.width", p.min_width, p.max_width)?;
        ensure_positive("platforms.first_width", p.first_width)?;
        ensure_positive("platforms.late_min_width", p.late_min_width)?;
        ensure_unit("platforms.shrink_factor", p.shrink_factor)?;
        if p.shrink_interval == 0 {
            return Err(ConfigError::ZeroInterval("platforms.shrink_interval"));
        }

        let m = &self.patrol;
        ensure_unit("patrol.move_chance", m.move_chance)?;
        ensure_range("patrol.range", m.min_range, m.max_range)?;
        ensure_positive("patrol.base_speed", m.base_speed)?;
        ensure_unit("patrol.speed_variance", m.speed_variance)?;
        if m.safe_gap < 0.0 || m.safe_gap > p.min_gap {
            return Err(ConfigError::SafeGapExceedsMinGap {
                safe_gap: m.safe_gap,
                min_gap: p.min_gap,
            });
        }
        if m.speed_stage_interval == 0 {
            return Err(ConfigError::ZeroInterval("patrol.speed_stage_interval"));
        }

        let b = &self.bridge;
        ensure_positive("bridge.grow_speed", b.grow_speed)?;
        ensure_positive("bridge.rotation_speed", b.rotation_speed)?;
        ensure_at_most("bridge.normal_points", b.normal_points, BridgeRules::MAX_LANDING_POINTS)?;
        ensure_at_most("bridge.perfect_points", b.perfect_points, BridgeRules::MAX_LANDING_POINTS)?;
        ensure_at_most(
            "bridge.score_multiplier",
            b.score_multiplier,
            BridgeRules::MAX_SCORE_MULTIPLIER,
        )?;

        let f = &self.fraud;
        ensure_unit("fraud.perfect_rate_short", f.perfect_rate_short)?;
        ensure_unit("fraud.perfect_rate_long", f.perfect_rate_long)?;
        Ok(())
    }
}

/// Obstacle spawn geometry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlatformRules {
    /// Width of the fixed starting platform at x = 0.
    pub first_width: f64,
    pub min_gap: f64,
    pub max_gap: f64,
    pub min_width: f64,
    pub max_width: f64,
    /// Shrinking applies to platforms with an index strictly above this.
    pub shrink_start_index: usize,
    pub shrink_interval: usize,
    pub shrink_factor: f64,
    /// Floor applied after shrinking.
    pub late_min_width: f64,
}

impl PlatformRules {
    /// Applies the compounding late-game shrink to a drawn width.
    pub fn width_for(&self, index: usize, drawn: f64) -> f64 {
        if index <= self.shrink_start_index {
            return drawn;
        }
        let stages = (index - self.shrink_start_index) / self.shrink_interval;
        let mut width = drawn;
        // Repeated multiplication keeps the result identical to the client's loop.
        for _ in 0..stages {
            width *= self.shrink_factor;
        }
        width.max(self.late_min_width)
    }
}

impl Default for PlatformRules {
    fn default() -> Self {
        Self {
            first_width: 80.0,
            min_gap: 40.0,
            max_gap: 200.0,
            min_width: 40.0,
            max_width: 100.0,
            shrink_start_index: 10,
            shrink_interval: 10,
            shrink_factor: 0.9,
            late_min_width: 25.0,
        }
    }
}

/// Patrolling (oscillating) platform behavior.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PatrolRules {
    /// Platforms with an index strictly above this may patrol.
    pub movement_start_index: usize,
    pub move_chance: f64,
    pub min_range: f64,
    pub max_range: f64,
    /// Minimum clearance kept between a patrol envelope and its neighbors.
    pub safe_gap: f64,
    /// Patrol speed in px/s before staging.
    pub base_speed: f64,
    pub speed_stage_start_index: usize,
    pub speed_stage_interval: usize,
    pub speed_stage_step: f64,
    pub max_speed_stages: usize,
    /// Per-leg speed variance applies from this index on.
    pub variance_start_index: usize,
    pub speed_variance: f64,
    pub min_target_distance: f64,
    pub retarget_attempts: u32,
    /// Hard cap on simulated legs per lookup.
    pub max_legs: u32,
}

impl PatrolRules {
    /// Staged base speed for the platform at `index`.
    pub fn base_speed_for(&self, index: usize) -> f64 {
        let stages = if index > self.speed_stage_start_index {
            ((index - self.speed_stage_start_index) / self.speed_stage_interval)
                .min(self.max_speed_stages)
        } else {
            0
        };
        self.base_speed * (1.0 + stages as f64 * self.speed_stage_step)
    }
}

impl Default for PatrolRules {
    fn default() -> Self {
        Self {
            movement_start_index: 5,
            move_chance: 0.35,
            min_range: 20.0,
            max_range: 80.0,
            safe_gap: 15.0,
            base_speed: 60.0,
            speed_stage_start_index: 10,
            speed_stage_interval: 10,
            speed_stage_step: 0.2,
            max_speed_stages: 5,
            variance_start_index: 20,
            speed_variance: 0.25,
            min_target_distance: 10.0,
            retarget_attempts: 5,
            max_legs: 100_000,
        }
    }
}

/// Bridge growth, rotation and scoring.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BridgeRules {
    /// Bridge growth while pressed, px/s.
    pub grow_speed: f64,
    /// Fall rotation speed, degrees/s.
    pub rotation_speed: f64,
    pub perfect_tolerance: f64,
    pub normal_points: u32,
    pub perfect_points: u32,
    pub score_multiplier: u32,
}

impl BridgeRules {
    pub const MAX_LANDING_POINTS: u32 = 1_000;
    pub const MAX_SCORE_MULTIPLIER: u32 = 1_000;

    /// Final score for `raw_points`, saturating at `u32::MAX`.
    pub fn score(&self, raw_points: u32) -> u32 {
        raw_points.saturating_mul(self.score_multiplier)
    }

    /// Time the bridge spends rotating 90 degrees onto the next platform.
    pub fn rotation_time_ms(&self) -> f64 {
        90.0 / self.rotation_speed * 1000.0
    }

    /// Press portion of a move's total duration.
    pub fn press_duration_ms(&self, duration_ms: f64) -> f64 {
        (duration_ms - self.rotation_time_ms()).max(0.0)
    }

    /// Bridge length produced by holding for `press_ms`.
    pub fn reach(&self, press_ms: f64) -> f64 {
        press_ms / 1000.0 * self.grow_speed
    }
}

impl Default for BridgeRules {
    fn default() -> Self {
        Self {
            grow_speed: 300.0,
            rotation_speed: 900.0,
            perfect_tolerance: 3.0,
            normal_points: 1,
            perfect_points: 3,
            score_multiplier: 10,
        }
    }
}

/// Thresholds for the statistical bot checks.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FraudRules {
    /// Fastest plausible human press.
    pub min_press_ms: f64,
    /// Sample count at which variance checks start.
    pub min_variance_samples: usize,
    pub press_std_base_ms: f64,
    pub press_std_floor_ms: f64,
    pub min_gap_ms: f64,
    pub gap_std_base_ms: f64,
    pub gap_std_floor_ms: f64,
    pub perfect_rate_short: f64,
    pub perfect_rate_long: f64,
    /// Landing count from which the long-session rate applies.
    pub long_session_landings: u32,
    pub min_landings_for_rate: u32,
    pub max_consecutive_perfects: u32,
}

impl FraudRules {
    /// Minimum standard deviation expected from `samples` human timings.
    pub fn std_threshold(base_ms: f64, floor_ms: f64, samples: usize) -> f64 {
        (base_ms / (samples as f64).sqrt()).max(floor_ms)
    }

    /// Perfect-rate ceiling for a session with `landings` hits.
    pub fn perfect_rate_limit(&self, landings: u32) -> f64 {
        if landings >= self.long_session_landings {
            self.perfect_rate_long
        } else {
            self.perfect_rate_short
        }
    }
}

impl Default for FraudRules {
    fn default() -> Self {
        Self {
            min_press_ms: 50.0,
            min_variance_samples: 3,
            press_std_base_ms: 60.0,
            press_std_floor_ms: 8.0,
            min_gap_ms: 80.0,
            gap_std_base_ms: 60.0,
            gap_std_floor_ms: 8.0,
            perfect_rate_short: 0.85,
            perfect_rate_long: 0.90,
            long_session_landings: 20,
            min_landings_for_rate: 5,
            max_consecutive_perfects: 10,
        }
    }
}

/// Rejected tuning values.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} range is inverted or negative: [{min}, {max}]")]
    InvalidRange {
        name: &'static str,
        min: f64,
        max: f64,
    },

    #[error("{0} must be positive, got {1}")]
    NotPositive(&'static str, f64),

    #[error("{0} must lie in [0, 1], got {1}")]
    NotUnit(&'static str, f64),

    #[error("{0} must be non-zero")]
    ZeroInterval(&'static str),

    #[error("{name} must be at most {max}, got {value}")]
    TooLarge {
        name: &'static str,
        value: u32,
        max: u32,
    },

    #[error("patrol safe gap {safe_gap} must lie in [0, min gap {min_gap}]")]
    SafeGapExceedsMinGap { safe_gap: f64, min_gap: f64 },
}

impl crate::error::GameError for ConfigError {
    fn severity(&self) -> crate::error::ErrorSeverity {
        crate::error::ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRange { .. } => "CONFIG_INVALID_RANGE",
            Self::NotPositive(..) => "CONFIG_NOT_POSITIVE",
            Self::NotUnit(..) => "CONFIG_NOT_UNIT",
            Self::ZeroInterval(_) => "CONFIG_ZERO_INTERVAL",
            Self::TooLarge { .. } => "CONFIG_TOO_LARGE",
            Self::SafeGapExceedsMinGap { .. } => "CONFIG_SAFE_GAP",
        }
    }
}

fn ensure_range(name: &'static str, min: f64, max: f64) -> Result<(), ConfigError> {
    if min.is_finite() && max.is_finite() && min >= 0.0 && min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange { name, min, max })
    }
}

fn ensure_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive(name, value))
    }
}

fn ensure_at_most(name: &'static str, value: u32, max: u32) -> Result<(), ConfigError> {
    if value <= max {
        Ok(())
    } else {
        Err(ConfigError::TooLarge { name, value, max })
    }
}

fn ensure_unit(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::NotUnit(name, value))
    }
}
