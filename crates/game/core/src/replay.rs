//! Move replay against a generated platform sequence.
//!
//! Moves are replayed in `start_time` order. A cursor tracks the platform the
//! player stands on; each move grows a bridge from the player's stop position
//! toward the next platform, sampled at the landing instant.

use crate::config::{BridgeRules, PatrolRules};
use crate::patrol::position_at;
use crate::platform::Platform;
use crate::session::Move;

/// How a single move ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Landing {
    Perfect,
    Normal,
    Miss,
}

impl Landing {
    pub const fn is_hit(&self) -> bool {
        !matches!(self, Self::Miss)
    }
}

/// Why replay stopped before consuming every move.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum ReplayHalt {
    /// The session carried no moves.
    Empty,
    /// Negative or non-finite time on the move at `index` (sorted order).
    InvalidTiming { index: usize },
    /// Move `index` starts before the previous one ended.
    Overlap { index: usize, previous_end: f64 },
    /// No platform exists past the cursor.
    MissingPlatform { index: usize, cursor: usize },
}

/// Every intermediate value computed for one move.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveRecord {
    /// Position in time order.
    pub index: usize,
    pub start_time: f64,
    pub duration: f64,
    pub idle_ms: f64,
    pub press_ms: f64,
    pub reach: f64,
    pub elapsed_ms: f64,
    pub target_index: usize,
    pub target_x: f64,
    pub target_right: f64,
    pub target_center: f64,
    pub stop_before: f64,
    pub tip: f64,
    pub landing: Landing,
    pub points: u32,
    pub stop_after: f64,
}

/// Outcome of walking the move list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Replay {
    pub records: Vec<MoveRecord>,
    pub halt: Option<ReplayHalt>,
    pub time_played: f64,
    pub raw_points: u32,
}

impl Replay {
    pub fn blocks_passed(&self) -> u32 {
        self.records.iter().filter(|r| r.landing.is_hit()).count() as u32
    }
}

/// Walks moves against platforms with a cursor and a stop position.
pub struct MoveReplayer<'a> {
    bridge: &'a BridgeRules,
    patrol: &'a PatrolRules,
    platforms: &'a [Platform],
}

impl<'a> MoveReplayer<'a> {
    pub fn new(bridge: &'a BridgeRules, patrol: &'a PatrolRules, platforms: &'a [Platform]) -> Self {
        Self {
            bridge,
            patrol,
            platforms,
        }
    }

    /// Replays `moves` in chronological order.
    ///
    /// The first malformed move halts the replay; moves after it are ignored.
    pub fn replay(&self, moves: &[Move]) -> Replay {
        let mut replay = Replay::default();
        if moves.is_empty() {
            replay.halt = Some(ReplayHalt::Empty);
            return replay;
        }

        let mut sorted = moves.to_vec();
        sorted.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

        let mut cursor = 0usize;
        let mut stop = self.platforms.first().map(Platform::right).unwrap_or(0.0);
        let mut previous_end: Option<f64> = None;

        for (index, mv) in sorted.iter().enumerate() {
            if !mv.has_valid_timing() {
                replay.halt = Some(ReplayHalt::InvalidTiming { index });
                break;
            }
            replay.time_played = replay.time_played.max(mv.end_time());

            if let Some(end) = previous_end.filter(|end| mv.start_time < *end) {
                replay.halt = Some(ReplayHalt::Overlap {
                    index,
                    previous_end: end,
                });
                break;
            }
            previous_end = Some(mv.end_time());

            let Some(target) = self.platforms.get(cursor + 1) else {
                replay.halt = Some(ReplayHalt::MissingPlatform { index, cursor });
                break;
            };

            let record = self.judge(index, mv, target, stop);
            if record.landing.is_hit() {
                cursor += 1;
                stop = record.stop_after;
            }
            replay.raw_points = replay.raw_points.saturating_add(record.points);
            replay.records.push(record);
        }

        replay
    }

    fn judge(&self, index: usize, mv: &Move, target: &Platform, stop: f64) -> MoveRecord {
        let press_ms = self.bridge.press_duration_ms(mv.duration);
        let reach = self.bridge.reach(press_ms);
        let elapsed_ms = mv.landing_elapsed_ms();

        let target_x = position_at(target, elapsed_ms, self.patrol);
        let target_right = target_x + target.w;
        let target_center = target_x + target.w / 2.0;
        let tip = stop + reach;

        let (landing, points, stop_after) = if tip >= target_x && tip <= target_right {
            if (tip - target_center).abs() <= self.bridge.perfect_tolerance {
                (Landing::Perfect, self.bridge.perfect_points, target_right)
            } else {
                (Landing::Normal, self.bridge.normal_points, target_right)
            }
        } else {
            (Landing::Miss, 0, stop)
        };

        MoveRecord {
            index,
            start_time: mv.start_time,
            duration: mv.duration,
            idle_ms: mv.idle_ms(),
            press_ms,
            reach,
            elapsed_ms,
            target_index: target.index,
            target_x,
            target_right,
            target_center,
            stop_before: stop,
            tip,
            landing,
            points,
            stop_after,
        }
    }
}
