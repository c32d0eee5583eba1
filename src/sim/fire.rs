//! Alien fire scheduling
//!
//! Aliens shoot after a random number of formation steps. The emitter is the
//! lowest survivor of a random non-empty column.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::formation::Formation;

/// Pluggable randomness so tests can script fire timing and targets
pub trait RandomSource {
    /// Uniform integer in `[lo, hi]`
    fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32;
    /// Uniform index in `[0, len)`; `len` is never zero
    fn index(&mut self, len: usize) -> usize;
}

impl RandomSource for Pcg32 {
    fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        self.random_range(lo..=hi)
    }

    fn index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// A shot the scheduler decided on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub row: usize,
    pub col: usize,
    pub origin: Vec2,
}

/// Counts formation steps and decides when and from where aliens fire
pub struct FireScheduler {
    max_rate: u32,
    threshold: u32,
    steps: u32,
    rng: Box<dyn RandomSource>,
}

impl std::fmt::Debug for FireScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FireScheduler")
            .field("max_rate", &self.max_rate)
            .field("threshold", &self.threshold)
            .field("steps", &self.steps)
            .finish_non_exhaustive()
    }
}

impl FireScheduler {
    pub fn new(max_rate: u32, mut rng: Box<dyn RandomSource>) -> Self {
        let max_rate = max_rate.max(1);
        let threshold = rng.range_inclusive(1, max_rate);
        Self {
            max_rate,
            threshold,
            steps: 0,
            rng,
        }
    }

    /// Steps counted since the last shot
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Steps required before the next shot
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Whether `steps` formation steps satisfy `threshold`
    pub fn should_fire(steps: u32, threshold: u32) -> bool {
        steps >= threshold
    }

    /// Draw a fresh threshold in `[1, max_rate]`
    pub fn rearm(&mut self) -> u32 {
        self.steps = 0;
        self.threshold = self.rng.range_inclusive(1, self.max_rate);
        self.threshold
    }

    /// Lowest alive alien of a uniformly chosen non-empty column
    pub fn select_target(&mut self, formation: &Formation) -> Option<Shot> {
        let columns = formation.non_empty_columns();
        if columns.is_empty() {
            return None;
        }
        let col = columns[self.rng.index(columns.len())];
        formation
            .lowest_in_column(col)
            .map(|(row, alien)| Shot {
                row,
                col,
                origin: alien.pos,
            })
    }

    /// Record one formation step; returns the shot if one is due
    ///
    /// Once the threshold is reached the counter resets and a new threshold
    /// is drawn whether or not a target was found.
    pub fn on_step(&mut self, formation: &Formation) -> Option<Shot> {
        self.steps += 1;
        if !Self::should_fire(self.steps, self.threshold) {
            return None;
        }

        let shot = self.select_target(formation);
        let next = self.rearm();
        log::debug!("alien fire: {:?}, next threshold {}", shot, next);
        shot
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::Settings;

    /// Replays scripted values; falls back to the low end once exhausted
    #[derive(Debug, Default)]
    pub(crate) struct ScriptedRng {
        pub ranges: VecDeque<u32>,
        pub indices: VecDeque<usize>,
    }

    impl ScriptedRng {
        pub(crate) fn new(ranges: &[u32], indices: &[usize]) -> Self {
            Self {
                ranges: ranges.iter().copied().collect(),
                indices: indices.iter().copied().collect(),
            }
        }
    }

    impl RandomSource for ScriptedRng {
        fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
            self.ranges.pop_front().unwrap_or(lo).clamp(lo, hi)
        }

        fn index(&mut self, len: usize) -> usize {
            self.indices.pop_front().unwrap_or(0).min(len - 1)
        }
    }

    fn formation() -> Formation {
        let settings = Settings {
            alien_rows: 3,
            aliens_in_row: 4,
            ..Default::default()
        };
        Formation::new(&settings, 1.0)
    }

    #[test]
    fn test_should_fire_at_or_past_threshold() {
        assert!(!FireScheduler::should_fire(0, 1));
        assert!(!FireScheduler::should_fire(2, 3));
        assert!(FireScheduler::should_fire(3, 3));
        assert!(FireScheduler::should_fire(4, 3));
        assert!(FireScheduler::should_fire(1, 1));
    }

    #[test]
    fn test_fires_after_threshold_steps() {
        let f = formation();
        let rng = ScriptedRng::new(&[3, 2], &[1]);
        let mut scheduler = FireScheduler::new(5, Box::new(rng));
        assert_eq!(scheduler.threshold(), 3);

        assert!(scheduler.on_step(&f).is_none());
        assert!(scheduler.on_step(&f).is_none());
        assert_eq!(scheduler.steps(), 2);

        let shot = scheduler.on_step(&f).unwrap();
        assert_eq!((shot.row, shot.col), (2, 1));
        assert_eq!(shot.origin, f.get(2, 1).unwrap().pos);
        assert_eq!(scheduler.steps(), 0);
        assert_eq!(scheduler.threshold(), 2);
    }

    #[test]
    fn test_selects_lowest_survivor_of_non_empty_column() {
        let mut f = formation();
        // Column 0 and 1 empty, column 2 only has its top alien
        for row in 0..3 {
            f.destroy(row, 0);
            f.destroy(row, 1);
        }
        f.destroy(1, 2);
        f.destroy(2, 2);

        // Index 0 of the non-empty columns [2, 3]
        let mut scheduler = FireScheduler::new(5, Box::new(ScriptedRng::new(&[1], &[0, 1])));
        let shot = scheduler.select_target(&f).unwrap();
        assert_eq!((shot.row, shot.col), (0, 2));

        let shot = scheduler.select_target(&f).unwrap();
        assert_eq!((shot.row, shot.col), (2, 3));
    }

    #[test]
    fn test_empty_formation_still_rearms() {
        let mut f = formation();
        for row in 0..3 {
            for col in 0..4 {
                f.destroy(row, col);
            }
        }
        let mut scheduler = FireScheduler::new(5, Box::new(ScriptedRng::new(&[1, 4], &[])));
        assert!(scheduler.on_step(&f).is_none());
        assert_eq!(scheduler.steps(), 0);
        assert_eq!(scheduler.threshold(), 4);
    }

    #[test]
    fn test_pcg_threshold_in_range() {
        use rand::SeedableRng;

        let f = formation();
        let mut scheduler = FireScheduler::new(5, Box::new(Pcg32::seed_from_u64(7)));
        for _ in 0..200 {
            let t = scheduler.threshold();
            assert!((1..=5).contains(&t));
            scheduler.on_step(&f);
        }
    }

    #[test]
    fn test_zero_rate_clamped() {
        let scheduler = FireScheduler::new(0, Box::new(ScriptedRng::default()));
        assert_eq!(scheduler.threshold(), 1);
    }
}
