use crate::errors::EnvironmentError;
use crate::rng::RandomSource;

use serde::Deserialize;

const REWARD_STD: f64 = 1.0;
const DRIFT_STD: f64 = 0.01;

/// Which k-armed testbed a sweep constructs for each of its runs.
#[derive(Debug, Clone, Copy, Deserialize)]
pub enum EnvironmentKind {
    /// True values drawn i.i.d. from normal(mean, 1) once at construction.
    Stationary { mean: f64 },
    /// True values start at zero and take a small random walk on every pull.
    Nonstationary,
}

impl EnvironmentKind {
    pub fn build(self, k: usize, seed: Option<u64>) -> KArmedBandit {
        match self {
            EnvironmentKind::Stationary { mean } => KArmedBandit::stationary(k, mean, seed),
            EnvironmentKind::Nonstationary => KArmedBandit::nonstationary(k, seed),
        }
    }
}

/// A k-armed bandit testbed: latent expected reward per arm, noisy rewards
/// per pull.
#[derive(Debug)]
pub struct KArmedBandit {
    true_values: Vec<f64>,
    drifting: bool,
    rng: RandomSource,
}

impl KArmedBandit {
    pub fn stationary(k: usize, mean: f64, seed: Option<u64>) -> Self {
        let mut rng = RandomSource::new(seed);
        let true_values = (0..k).map(|_| rng.normal(mean, REWARD_STD)).collect();

        Self {
            true_values,
            drifting: false,
            rng,
        }
    }

    pub fn nonstationary(k: usize, seed: Option<u64>) -> Self {
        Self {
            true_values: vec![0.0; k],
            drifting: true,
            rng: RandomSource::new(seed),
        }
    }

    pub fn arms(&self) -> usize {
        self.true_values.len()
    }

    /// Pulls arm `a` and returns a noisy reward around its true value. In the
    /// nonstationary testbed every true value drifts first, whichever arm was
    /// pulled. The reward is never clipped.
    pub fn take_action(&mut self, a: usize) -> Result<f64, EnvironmentError> {
        if a >= self.true_values.len() {
            return Err(EnvironmentError::ActionOutOfRange {
                action: a,
                arms: self.true_values.len(),
            });
        }

        if self.drifting {
            for i in 0..self.true_values.len() {
                let step = self.rng.normal(0.0, DRIFT_STD);
                self.true_values[i] += step;
            }
        }

        Ok(self.rng.normal(self.true_values[a], REWARD_STD))
    }
}
