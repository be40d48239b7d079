//! Closed-form patrol position lookup.
//!
//! A patrolling platform walks a sequence of straight legs between targets
//! sampled from its private generator. Legs are enumerated on a virtual clock
//! and the position at the requested instant is interpolated on the leg that
//! contains it, independent of any frame rate.

use crate::config::PatrolRules;
use crate::platform::{Patrol, Platform};
use crate::rng::{Mulberry32, RandomSource};

/// One straight movement between two targets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PatrolLeg {
    pub from: f64,
    pub to: f64,
    /// Virtual time at which the leg starts.
    pub start_ms: f64,
    pub duration_ms: f64,
    pub speed: f64,
}

impl PatrolLeg {
    pub fn end_ms(&self) -> f64 {
        self.start_ms + self.duration_ms
    }

    /// Linear position at `at_ms`, clamped to the leg.
    pub fn position_at(&self, at_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return self.to;
        }
        let t = ((at_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * t
    }
}

/// Iterator over the legs of one platform's patrol, starting at its spawn x.
pub struct PatrolPath<'a> {
    patrol: &'a Patrol,
    rules: &'a PatrolRules,
    rng: Mulberry32,
    apply_variance: bool,
    position: f64,
    clock_ms: f64,
    remaining: u32,
}

impl<'a> PatrolPath<'a> {
    pub fn new(platform: &Platform, patrol: &'a Patrol, rules: &'a PatrolRules) -> Self {
        Self {
            patrol,
            rules,
            rng: Mulberry32::new(patrol.seed),
            apply_variance: platform.index >= rules.variance_start_index,
            position: platform.x,
            clock_ms: 0.0,
            remaining: rules.max_legs,
        }
    }

    fn next_target(&mut self) -> f64 {
        draw_target(&mut self.rng, self.patrol, self.rules, self.position)
    }

    fn leg_speed(&mut self) -> f64 {
        if !self.apply_variance {
            return self.patrol.base_speed;
        }
        let swing = self.rng.next_f64() * 2.0 - 1.0;
        self.patrol.base_speed * (1.0 + swing * self.rules.speed_variance)
    }
}

/// Draws the next leg target, redrawing while it lands within
/// `min_target_distance` of `position`.
///
/// Redraws only happen when the envelope is wider than twice that distance,
/// and stop after `retarget_attempts` draws in total.
fn draw_target<R: RandomSource>(
    rng: &mut R,
    patrol: &Patrol,
    rules: &PatrolRules,
    position: f64,
) -> f64 {
    let mut target = rng.range(patrol.min_x, patrol.max_x);
    if patrol.span() > rules.min_target_distance * 2.0 {
        let mut attempts = 1;
        while (target - position).abs() < rules.min_target_distance
            && attempts < rules.retarget_attempts
        {
            target = rng.range(patrol.min_x, patrol.max_x);
            attempts += 1;
        }
    }
    target
}

impl Iterator for PatrolPath<'_> {
    type Item = PatrolLeg;

    fn next(&mut self) -> Option<PatrolLeg> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let to = self.next_target();
        let speed = self.leg_speed();
        let distance = (to - self.position).abs();
        let duration_ms = if speed > 0.0 {
            distance / speed * 1000.0
        } else {
            0.0
        };

        let leg = PatrolLeg {
            from: self.position,
            to,
            start_ms: self.clock_ms,
            duration_ms,
            speed,
        };
        self.position = to;
        self.clock_ms += duration_ms;
        Some(leg)
    }
}

/// Left edge of `platform` `elapsed_ms` after its patrol clock started.
///
/// Stationary platforms always report their spawn x.
pub fn position_at(platform: &Platform, elapsed_ms: f64, rules: &PatrolRules) -> f64 {
    let Some(patrol) = &platform.patrol else {
        return platform.x;
    };
    if elapsed_ms.is_nan() || elapsed_ms <= 0.0 {
        return platform.x;
    }

    let mut position = platform.x;
    for leg in PatrolPath::new(platform, patrol, rules) {
        if leg.end_ms() >= elapsed_ms {
            return leg.position_at(elapsed_ms);
        }
        position = leg.to;
    }
    position
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::platform::generate_platforms;

    fn moving_platform(index: usize) -> Platform {
        Platform {
            index,
            x: 500.0,
            w: 60.0,
            patrol: Some(Patrol {
                min_x: 460.0,
                max_x: 520.0,
                base_speed: 60.0,
                seed: 0xC0FF_EE00,
            }),
        }
    }

    #[test]
    fn stationary_platform_never_moves() {
        let rules = PatrolRules::default();
        let platform = Platform {
            index: 3,
            x: 321.0,
            w: 50.0,
            patrol: None,
        };
        for elapsed in [0.0, 1.0, 999.0, 1e9] {
            assert_eq!(position_at(&platform, elapsed, &rules), 321.0);
        }
    }

    #[test]
    fn starts_at_spawn_position() {
        let rules = PatrolRules::default();
        let platform = moving_platform(8);
        assert_eq!(position_at(&platform, 0.0, &rules), platform.x);
        assert_eq!(position_at(&platform, -5.0, &rules), platform.x);
    }

    #[test]
    fn stays_inside_envelope() {
        let rules = PatrolRules::default();
        for index in [8, 40] {
            let platform = moving_platform(index);
            let patrol = platform.patrol.clone().expect("moving");
            let mut elapsed = 0.0;
            while elapsed < 60_000.0 {
                let x = position_at(&platform, elapsed, &rules);
                assert!(x >= patrol.min_x - 1e-9 && x <= patrol.max_x + 1e-9, "{x}");
                elapsed += 37.5;
            }
        }
    }

    #[test]
    fn lookup_is_repeatable() {
        let rules = PatrolRules::default();
        let platform = moving_platform(25);
        let first: Vec<f64> = (0..50)
            .map(|i| position_at(&platform, i as f64 * 113.0, &rules))
            .collect();
        let second: Vec<f64> = (0..50)
            .map(|i| position_at(&platform, i as f64 * 113.0, &rules))
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn matches_leg_endpoints_and_is_continuous() {
        let rules = PatrolRules::default();
        let platform = moving_platform(8);
        let patrol = platform.patrol.clone().expect("moving");
        let legs: Vec<PatrolLeg> = PatrolPath::new(&platform, &patrol, &rules)
            .take(6)
            .collect();

        for pair in legs.windows(2) {
            assert_eq!(pair[0].to, pair[1].from);
            assert_eq!(pair[0].end_ms(), pair[1].start_ms);
        }
        for leg in legs.iter().filter(|leg| leg.duration_ms > 0.0) {
            let x = position_at(&platform, leg.end_ms(), &rules);
            assert!((x - leg.to).abs() < 1e-6);
            let mid = position_at(&platform, leg.start_ms + leg.duration_ms / 2.0, &rules);
            assert!((mid - (leg.from + leg.to) / 2.0).abs() < 1e-6);
        }
    }

    #[test]
    fn constant_speed_before_variance_index() {
        let rules = PatrolRules::default();
        let platform = moving_platform(rules.variance_start_index - 1);
        let patrol = platform.patrol.clone().expect("moving");
        assert!(
            PatrolPath::new(&platform, &patrol, &rules)
                .take(20)
                .all(|leg| leg.speed == patrol.base_speed)
        );
    }

    #[test]
    fn variance_keeps_speed_within_band() {
        let rules = PatrolRules::default();
        let platform = moving_platform(rules.variance_start_index);
        let patrol = platform.patrol.clone().expect("moving");
        let low = patrol.base_speed * (1.0 - rules.speed_variance);
        let high = patrol.base_speed * (1.0 + rules.speed_variance);
        let speeds: Vec<f64> = PatrolPath::new(&platform, &patrol, &rules)
            .take(50)
            .map(|leg| leg.speed)
            .collect();
        assert!(speeds.iter().all(|s| *s >= low && *s <= high));
        assert!(speeds.iter().any(|s| *s != patrol.base_speed));
    }

    #[test]
    fn generated_patrols_resolve_inside_envelope() {
        let config = GameConfig::default();
        let platforms = generate_platforms(&config, 2024, 60);
        for platform in platforms.iter().filter(|p| p.is_moving()) {
            let patrol = platform.patrol.as_ref().expect("moving");
            for elapsed in [150.0, 900.0, 4_000.0] {
                let x = position_at(platform, elapsed, &config.patrol);
                assert!(x >= patrol.min_x - 1e-9 && x <= patrol.max_x + 1e-9);
            }
        }
    }

    /// Replays a fixed list of draws and counts them.
    struct ScriptedDraws {
        values: Vec<f64>,
        draws: usize,
    }

    impl ScriptedDraws {
        fn new(values: &[f64]) -> Self {
            Self {
                values: values.to_vec(),
                draws: 0,
            }
        }
    }

    impl RandomSource for ScriptedDraws {
        fn next_f64(&mut self) -> f64 {
            let value = self.values[self.draws.min(self.values.len() - 1)];
            self.draws += 1;
            value
        }
    }

    fn envelope(min_x: f64, max_x: f64) -> Patrol {
        Patrol {
            min_x,
            max_x,
            base_speed: 60.0,
            seed: 7,
        }
    }

    #[test]
    fn redraws_targets_too_close_to_position() {
        let rules = PatrolRules::default();
        // [460, 520] from 500: 0.6 -> 496 and 0.65 -> 499 are too close, 0.0 -> 460 is not
        let mut rng = ScriptedDraws::new(&[0.6, 0.65, 0.0]);
        let target = draw_target(&mut rng, &envelope(460.0, 520.0), &rules, 500.0);
        assert_eq!(target, 460.0);
        assert_eq!(rng.draws, 3);
    }

    #[test]
    fn gives_up_after_retarget_attempts() {
        let rules = PatrolRules::default();
        let mut rng = ScriptedDraws::new(&[0.6]);
        let target = draw_target(&mut rng, &envelope(460.0, 520.0), &rules, 500.0);
        assert!((target - 496.0).abs() < 1e-9);
        assert_eq!(rng.draws, rules.retarget_attempts as usize);
    }

    #[test]
    fn narrow_envelope_takes_first_draw() {
        let rules = PatrolRules::default();
        let mut rng = ScriptedDraws::new(&[0.5, 0.0]);
        let target = draw_target(&mut rng, &envelope(495.0, 510.0), &rules, 502.0);
        assert!((target - 502.5).abs() < 1e-9);
        assert_eq!(rng.draws, 1);
    }

    #[test]
    fn wide_envelope_legs_keep_minimum_distance() {
        let rules = PatrolRules::default();
        let platform = Platform {
            index: 12,
            x: 400.0,
            w: 40.0,
            patrol: Some(envelope(200.0, 600.0)),
        };
        let patrol = platform.patrol.clone().expect("moving");
        for leg in PatrolPath::new(&platform, &patrol, &rules).take(100) {
            assert!(
                (leg.to - leg.from).abs() >= rules.min_target_distance,
                "{leg:?}"
            );
        }
    }
}
