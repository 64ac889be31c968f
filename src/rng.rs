use rand::{rngs::SmallRng, Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Source of every random draw in the simulation. Seeded construction gives a
/// fully reproducible stream; without a seed the generator starts from OS
/// entropy.
#[derive(Debug)]
pub struct RandomSource {
    seed: Option<u64>,
    rng: SmallRng,
}

impl RandomSource {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = if let Some(seed) = seed {
            SmallRng::seed_from_u64(seed)
        } else {
            SmallRng::from_os_rng()
        };

        Self { seed, rng }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn normal(&mut self, mean: f64, std: f64) -> f64 {
        let z: f64 = self.rng.sample(StandardNormal);
        mean + std * z
    }

    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        self.rng.random_range(lo..hi)
    }

    /// Uniform draw from the inclusive integer range [lo, hi].
    pub fn random_int(&mut self, lo: usize, hi: usize) -> usize {
        self.rng.random_range(lo..=hi)
    }

    /// Uniform draw from [0, 1), the epsilon-exploration test.
    pub fn chance(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Derives an independent per-stream seed from a master seed, so that every
/// run of a sweep gets its own random stream (SplitMix64 golden-gamma mix).
/// An unseeded master stays unseeded.
pub fn derive_seed(seed: Option<u64>, stream: u64) -> Option<u64> {
    seed.map(|s| {
        let mut z = s.wrapping_add((stream + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    })
}
