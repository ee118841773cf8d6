use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Serialize, Deserialize};

use crate::F;

/// Seedable random source for walks.
///
/// Implements [`RngCore`], so it can be handed to any step function that
/// takes `&mut impl Rng`.
#[derive(Clone, Debug)]
pub struct NoiseGenerator {
    rng: ChaCha20Rng,
}

impl NoiseGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Independent stream for one path of an ensemble.
    pub fn from_path_id(global_seed: u64, path_id: u64) -> Self {
        // Combine seeds deterministically
        let seed = global_seed.wrapping_add(path_id.wrapping_mul(0x9e3779b97f4a7c15));
        Self::new(seed)
    }
}

impl RngCore for NoiseGenerator {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

/// Distribution of the signed kick `eps` applied each step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kick {
    /// `eps` uniform on {-1, +1}.
    #[default]
    Sign,
    /// `eps` drawn from a standard normal.
    Gaussian,
}

impl Kick {
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> F {
        match self {
            Kick::Sign => random_sign(rng),
            Kick::Gaussian => StandardNormal.sample(rng),
        }
    }
}

/// Unbiased draw from {-1, +1}.
pub fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> F {
    if rng.gen_bool(0.5) { 1.0 } else { -1.0 }
}
