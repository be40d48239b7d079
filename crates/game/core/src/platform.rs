//! Obstacle ("platform") sequence generation.
//!
//! Platforms are drawn from the session PRNG in a fixed order per index:
//! gap, width, then (past the movement index) move chance, patrol range and
//! patrol seed. Reordering or skipping a draw desynchronizes every platform
//! after it, so the order here mirrors the client generator exactly.

use crate::config::{GameConfig, PatrolRules, PlatformRules};
use crate::rng::{Mulberry32, RandomSource};

/// One generated landing target.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Platform {
    /// 0-based spawn order.
    pub index: usize,
    /// Spawn position of the left edge.
    pub x: f64,
    pub w: f64,
    /// Present when the platform oscillates.
    pub patrol: Option<Patrol>,
}

impl Platform {
    /// The fixed starting platform.
    pub fn origin(width: f64) -> Self {
        Self {
            index: 0,
            x: 0.0,
            w: width,
            patrol: None,
        }
    }

    pub fn center(&self) -> f64 {
        self.x + self.w / 2.0
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn is_moving(&self) -> bool {
        self.patrol.is_some()
    }

    /// Right edge at the far end of the patrol envelope.
    pub fn max_right(&self) -> f64 {
        match &self.patrol {
            Some(patrol) => patrol.max_x + self.w,
            None => self.right(),
        }
    }
}

/// Patrol envelope and private RNG seed of a moving platform.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Patrol {
    pub min_x: f64,
    pub max_x: f64,
    /// Staged speed in px/s before per-leg variance.
    pub base_speed: f64,
    pub seed: u32,
}

impl Patrol {
    pub fn span(&self) -> f64 {
        self.max_x - self.min_x
    }
}

/// Lazily yields the platform sequence for one session seed.
///
/// Platform 0 is always the fixed origin; each subsequent item consumes the
/// next draws from the session PRNG.
pub struct PlatformGenerator<'a, R = Mulberry32> {
    platforms: &'a PlatformRules,
    patrol: &'a PatrolRules,
    rng: R,
    next_index: usize,
    last_right: f64,
    last_max_right: f64,
}

impl<'a> PlatformGenerator<'a, Mulberry32> {
    /// Generator driven by mulberry32 seeded with `seed_number`.
    pub fn new(config: &'a GameConfig, seed_number: u32) -> Self {
        Self::with_rng(config, Mulberry32::new(seed_number))
    }
}

impl<'a, R: RandomSource> PlatformGenerator<'a, R> {
    pub fn with_rng(config: &'a GameConfig, rng: R) -> Self {
        Self {
            platforms: &config.platforms,
            patrol: &config.patrol,
            rng,
            next_index: 0,
            last_right: 0.0,
            last_max_right: 0.0,
        }
    }

    fn spawn(&mut self, index: usize) -> Platform {
        let gap = self.rng.range(self.platforms.min_gap, self.platforms.max_gap);
        let x = self.last_right + gap;

        let drawn = self
            .rng
            .range(self.platforms.min_width, self.platforms.max_width);
        let w = self.platforms.width_for(index, drawn);

        let patrol = if index > self.patrol.movement_start_index {
            self.draw_patrol(index, x)
        } else {
            None
        };

        Platform {
            index,
            x,
            w,
            patrol,
        }
    }

    fn draw_patrol(&mut self, index: usize, x: f64) -> Option<Patrol> {
        let chance = self.rng.next_f64();
        if chance >= self.patrol.move_chance {
            return None;
        }

        let range = self
            .rng
            .range(self.patrol.min_range, self.patrol.max_range);
        let min_x = (x - range).max(self.last_max_right + self.patrol.safe_gap);
        let max_x = (x + range).min(x + self.platforms.min_gap - self.patrol.safe_gap);
        if max_x - min_x <= 0.0 {
            return None;
        }

        Some(Patrol {
            min_x,
            max_x,
            base_speed: self.patrol.base_speed_for(index),
            seed: self.rng.next_seed(),
        })
    }
}

impl<R: RandomSource> Iterator for PlatformGenerator<'_, R> {
    type Item = Platform;

    fn next(&mut self) -> Option<Platform> {
        let index = self.next_index;
        let platform = if index == 0 {
            Platform::origin(self.platforms.first_width)
        } else {
            self.spawn(index)
        };

        // The chain advances from the spawn edge, never the patrolled one.
        self.last_right = platform.right();
        self.last_max_right = platform.max_right();
        self.next_index += 1;
        Some(platform)
    }
}

/// Generates the first `count` platforms for `seed_number`.
pub fn generate_platforms(config: &GameConfig, seed_number: u32, count: usize) -> Vec<Platform> {
    PlatformGenerator::new(config, seed_number)
        .take(count)
        .collect()
}
