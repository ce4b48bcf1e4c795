// Copyright (c) 2026 rezky_nightky

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Source of randomness for the rain. Swapped for a scripted source in tests.
pub trait RandomSource {
    /// Uniform integer in `[low, high)`. An empty range yields `low`.
    fn range(&mut self, low: u32, high: u32) -> u32;

    /// Uniform float in `[0, 1)`.
    fn unit(&mut self) -> f32;
}

pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }
}

impl RandomSource for SeededRandom {
    fn range(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        self.rng.random_range(low..high)
    }

    fn unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

#[cfg(test)]
pub mod scripted {
    use super::RandomSource;

    /// Replays a fixed list of offsets (cycled) and a constant unit value.
    pub struct Scripted {
        offsets: Vec<u32>,
        pos: usize,
        unit: f32,
    }

    impl Scripted {
        pub fn new(offsets: &[u32], unit: f32) -> Self {
            Self {
                offsets: offsets.to_vec(),
                pos: 0,
                unit,
            }
        }
    }

    impl RandomSource for Scripted {
        fn range(&mut self, low: u32, high: u32) -> u32 {
            if high <= low || self.offsets.is_empty() {
                return low;
            }
            let v = self.offsets[self.pos % self.offsets.len()];
            self.pos += 1;
            low + v % (high - low)
        }

        fn unit(&mut self) -> f32 {
            self.unit
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_range_stays_in_bounds() {
        let mut r = SeededRandom::new(Some(7));
        for _ in 0..10_000 {
            let v = r.range(250, 1000);
            assert!((250..1000).contains(&v));
        }
    }

    #[test]
    fn empty_range_returns_low() {
        let mut r = SeededRandom::new(Some(7));
        assert_eq!(r.range(5, 5), 5);
        assert_eq!(r.range(9, 3), 9);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SeededRandom::new(Some(42));
        let mut b = SeededRandom::new(Some(42));
        for _ in 0..100 {
            assert_eq!(a.range(0, 1000), b.range(0, 1000));
        }
    }

    #[test]
    fn scripted_cycles_offsets() {
        let mut s = scripted::Scripted::new(&[1, 12], 0.5);
        assert_eq!(s.range(0, 10), 1);
        assert_eq!(s.range(0, 10), 2);
        assert_eq!(s.range(100, 110), 101);
        assert_eq!(s.unit(), 0.5);
    }
}
