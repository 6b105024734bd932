use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Rewinds the generator to the state it had right after construction.
    pub fn reseed(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
    }

    pub fn random<T>(&mut self) -> T
    where
        rand::distr::StandardUniform: rand::distr::Distribution<T>,
    {
        self.rng.random()
    }

    pub fn random_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distr::uniform::SampleUniform,
        R: rand::distr::uniform::SampleRange<T>,
    {
        self.rng.random_range(range)
    }

    /// `true` with probability `p`; values outside `[0, 1]` saturate.
    pub fn random_bool(&mut self, p: f64) -> bool {
        if p.is_nan() || p <= 0.0 {
            return false;
        }
        self.rng.random_bool(p.min(1.0))
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SessionRng::new(7);
        let mut b = SessionRng::new(7);
        for _ in 0..16 {
            assert_eq!(a.random_range(0..1000u32), b.random_range(0..1000u32));
        }
    }

    #[test]
    fn test_reseed_restarts_sequence() {
        let mut rng = SessionRng::new(99);
        let first: Vec<u32> = (0..8).map(|_| rng.random_range(0..100)).collect();
        rng.reseed();
        let second: Vec<u32> = (0..8).map(|_| rng.random_range(0..100)).collect();
        assert_eq!(first, second);
        assert_eq!(rng.seed(), 99);
    }

    #[test]
    fn test_random_bool_extremes() {
        let mut rng = SessionRng::new(1);
        assert!((0..50).all(|_| !rng.random_bool(0.0)));
        assert!((0..50).all(|_| rng.random_bool(1.0)));
        assert!(rng.random_bool(3.5));
    }
}
