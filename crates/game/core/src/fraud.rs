//! Statistical bot-play heuristics over a completed replay.
//!
//! Signals are computed once from the move records; classification then walks
//! the checks in priority order and reports the first that fires.

use crate::config::FraudRules;
use crate::replay::{Landing, MoveRecord};
use crate::verdict::FraudReason;

/// Everything the heuristics looked at.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FraudSignals {
    pub press_durations: Vec<f64>,
    /// Idle time between the end of one move and the start of the next.
    pub gaps: Vec<f64>,
    pub press_std_dev: Option<f64>,
    pub press_std_threshold: Option<f64>,
    pub gap_std_dev: Option<f64>,
    pub gap_std_threshold: Option<f64>,
    pub landings: u32,
    pub perfect_landings: u32,
    pub perfect_rate: Option<f64>,
    pub perfect_rate_limit: f64,
    pub longest_perfect_streak: u32,
}

impl FraudSignals {
    pub fn collect(records: &[MoveRecord], rules: &FraudRules) -> Self {
        let press_durations: Vec<f64> = records.iter().map(|r| r.press_ms).collect();
        let gaps: Vec<f64> = records
            .windows(2)
            .map(|pair| pair[1].start_time - (pair[0].start_time + pair[0].duration))
            .collect();

        let landings = records.iter().filter(|r| r.landing.is_hit()).count() as u32;
        let perfect_landings = records
            .iter()
            .filter(|r| r.landing == Landing::Perfect)
            .count() as u32;

        let mut longest_perfect_streak = 0;
        let mut streak = 0;
        for record in records {
            if record.landing == Landing::Perfect {
                streak += 1;
                longest_perfect_streak = longest_perfect_streak.max(streak);
            } else {
                streak = 0;
            }
        }

        let variance_ready = |samples: &[f64]| samples.len() >= rules.min_variance_samples;

        Self {
            press_std_dev: variance_ready(&press_durations).then(|| std_dev(&press_durations)),
            press_std_threshold: variance_ready(&press_durations).then(|| {
                FraudRules::std_threshold(
                    rules.press_std_base_ms,
                    rules.press_std_floor_ms,
                    press_durations.len(),
                )
            }),
            gap_std_dev: variance_ready(&gaps).then(|| std_dev(&gaps)),
            gap_std_threshold: variance_ready(&gaps).then(|| {
                FraudRules::std_threshold(rules.gap_std_base_ms, rules.gap_std_floor_ms, gaps.len())
            }),
            perfect_rate: (landings >= rules.min_landings_for_rate && landings > 0)
                .then(|| f64::from(perfect_landings) / f64::from(landings)),
            perfect_rate_limit: rules.perfect_rate_limit(landings),
            press_durations,
            gaps,
            landings,
            perfect_landings,
            longest_perfect_streak,
        }
    }

    /// First triggered check in priority order, or `FraudReason::None`.
    pub fn classify(&self, rules: &FraudRules) -> FraudReason {
        if self.press_durations.iter().any(|p| *p < rules.min_press_ms) {
            return FraudReason::TooFastBridge;
        }
        if below(self.press_std_dev, self.press_std_threshold) {
            return FraudReason::DurationVarianceTooLow;
        }
        if self.gaps.len() >= rules.min_variance_samples
            && self.gaps.iter().any(|g| *g < rules.min_gap_ms)
        {
            return FraudReason::TooFastBetweenMoves;
        }
        if below(self.gap_std_dev, self.gap_std_threshold) {
            return FraudReason::TimingVarianceTooLow;
        }
        if self
            .perfect_rate
            .is_some_and(|rate| rate > self.perfect_rate_limit)
        {
            return FraudReason::PerfectRateTooHigh;
        }
        if self.longest_perfect_streak > rules.max_consecutive_perfects {
            return FraudReason::TooManyConsecutivePerfects;
        }
        FraudReason::None
    }
}

fn below(value: Option<f64>, threshold: Option<f64>) -> bool {
    matches!((value, threshold), (Some(value), Some(threshold)) if value < threshold)
}

/// Population standard deviation.
fn std_dev(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}
