use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, StandardNormal};

/// Explicit, seedable random stream for path simulation.
///
/// Replaces any process-wide generator: the driver owns one of these and
/// either consumes it trial after trial or splits it into per-trial
/// substreams for parallel workers.
pub struct SimRng {
    inner: StdRng,
    seed: u64,
}

impl SimRng {
    /// Same seed, same sequence.
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seeded from OS entropy. The chosen seed is kept so a run can be replayed.
    pub fn from_entropy() -> Self {
        let seed: u64 = rand::thread_rng().gen();
        Self::from_seed(seed)
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Independent stream for trial `index`, derived only from the master seed.
    /// Does not advance `self`, so the result is independent of scheduling order.
    #[inline]
    pub fn substream(&self, index: u64) -> SimRng {
        SimRng::from_seed(mix_seed(self.seed, index))
    }

    /// Child stream seeded from this stream's next draw. Advances `self` by
    /// one value, so consecutive splits give unrelated children.
    #[inline]
    pub fn split(&mut self) -> SimRng {
        SimRng::from_seed(self.inner.gen())
    }

    /// Standard normal variate (Ziggurat via `rand_distr::StandardNormal`).
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    /// Uniform variate in [0, 1).
    #[inline]
    pub fn gen_uniform(&mut self) -> f64 {
        self.inner.gen()
    }

    /// Normal variate with the given mean and std-dev. A zero std-dev yields `mean`.
    #[inline]
    pub fn gen_normal_with(&mut self, mean: f64, std_dev: f64) -> f64 {
        match Normal::new(mean, std_dev) {
            Ok(dist) => dist.sample(&mut self.inner),
            // Only reachable for non-finite std_dev, which config validation rejects
            Err(_) => mean + std_dev * self.gen_normal(),
        }
    }
}

/// SplitMix64 finaliser over (seed, index). Distinct indices give
/// well-separated StdRng seeds.
#[inline]
fn mix_seed(seed: u64, index: u64) -> u64 {
    let mut z = seed ^ index.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SimRng::from_seed(12345);
        let mut b = SimRng::from_seed(12345);
        for _ in 0..100 {
            assert_eq!(a.gen_normal(), b.gen_normal());
            assert_eq!(a.gen_uniform(), b.gen_uniform());
        }
    }

    #[test]
    fn test_substreams_are_distinct_and_stable() {
        let master = SimRng::from_seed(42);
        let mut s0 = master.substream(0);
        let mut s1 = master.substream(1);
        let mut s0_again = master.substream(0);

        let x0 = s0.gen_normal();
        assert_eq!(x0, s0_again.gen_normal());
        assert_ne!(x0, s1.gen_normal());
        assert_ne!(master.substream(0).seed(), master.substream(1).seed());
    }

    #[test]
    fn test_split_advances_parent() {
        let mut a = SimRng::from_seed(9);
        let mut b = SimRng::from_seed(9);
        let c1 = a.split();
        let c2 = a.split();
        assert_ne!(c1.seed(), c2.seed());
        assert_eq!(c1.seed(), b.split().seed());
    }

    #[test]
    fn test_uniform_range() {
        let mut rng = SimRng::from_seed(7);
        for _ in 0..10_000 {
            let u = rng.gen_uniform();
            assert!((0.0..1.0).contains(&u), "uniform out of range: {u}");
        }
    }

    #[test]
    fn test_normal_moments() {
        let mut rng = SimRng::from_seed(99);
        let n = 50_000;
        let draws: Vec<f64> = (0..n).map(|_| rng.gen_normal()).collect();
        let mean = draws.iter().sum::<f64>() / n as f64;
        let var = draws.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / (n as f64 - 1.0);
        assert!(mean.abs() < 0.02, "mean={mean}");
        assert!((var - 1.0).abs() < 0.03, "var={var}");
    }

    #[test]
    fn test_zero_std_dev_returns_mean() {
        let mut rng = SimRng::from_seed(1);
        assert_eq!(rng.gen_normal_with(-0.02, 0.0), -0.02);
    }
}
