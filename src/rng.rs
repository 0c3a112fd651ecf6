//! Seeded random source threaded by `&mut` through the update passes.
//! Independent models run concurrently with independent streams.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Uniform draw from `[low, high)`; returns `low` for empty ranges.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if low >= high {
            return low;
        }
        self.rng.random_range(low..high)
    }

    /// Uniform integer draw from `[low, high]` inclusive.
    pub fn int_range(&mut self, low: i64, high: i64) -> i64 {
        if low >= high {
            return low;
        }
        self.rng.random_range(low..=high)
    }

    /// True with probability `p` (clamped to [0, 1]).
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.random_bool(p.clamp(0.0, 1.0))
    }

    /// Index of a uniformly chosen element, or `None` if `len == 0`.
    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.rng.random_range(0..len))
        }
    }

    /// Weighted categorical draw. A non-positive total falls back to a
    /// uniform pick. Consumes exactly one sample either way.
    pub fn weighted_index(&mut self, weights: &[f64]) -> Option<usize> {
        if weights.is_empty() {
            return None;
        }
        let total: f64 = weights.iter().filter(|w| w.is_finite() && **w > 0.0).sum();
        if total <= 0.0 {
            return self.pick_index(weights.len());
        }
        let mut target = self.rng.random_range(0.0..total);
        for (i, &w) in weights.iter().enumerate() {
            if w.is_finite() && w > 0.0 {
                if target < w {
                    return Some(i);
                }
                target -= w;
            }
        }
        // Floating point slack on the last positive weight.
        weights.iter().rposition(|w| w.is_finite() && *w > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_streams_match() {
        let mut a = RandomSource::seeded(7);
        let mut b = RandomSource::seeded(7);
        for _ in 0..100 {
            assert_eq!(a.uniform(0.0, 1.0), b.uniform(0.0, 1.0));
            assert_eq!(a.int_range(-10, 10), b.int_range(-10, 10));
        }
    }

    #[test]
    fn test_int_range_inclusive() {
        let mut rng = RandomSource::seeded(1);
        let mut seen_low = false;
        let mut seen_high = false;
        for _ in 0..1000 {
            let v = rng.int_range(0, 3);
            assert!((0..=3).contains(&v));
            seen_low |= v == 0;
            seen_high |= v == 3;
        }
        assert!(seen_low && seen_high);
    }

    #[test]
    fn test_weighted_index_respects_zero_weights() {
        let mut rng = RandomSource::seeded(42);
        for _ in 0..500 {
            let idx = rng.weighted_index(&[0.0, 1.0, 0.0, 2.0]).unwrap();
            assert!(idx == 1 || idx == 3);
        }
    }

    #[test]
    fn test_weighted_index_degenerate() {
        let mut rng = RandomSource::seeded(3);
        assert_eq!(rng.weighted_index(&[]), None);
        // All-zero weights fall back to a uniform pick.
        assert!(rng.weighted_index(&[0.0, 0.0]).is_some());
    }
}
