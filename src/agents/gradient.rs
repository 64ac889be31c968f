use super::agent::{validate_action, validate_arms, Agent};
use super::errors::AgentError;

use crate::numerical::{arg_max, softmax, TieBreak};
use crate::rng::RandomSource;

/// Gradient bandit: learns unbounded preferences per arm and moves them by a
/// softmax policy gradient, optionally centered on a running mean of past
/// rewards. Selection is greedy over the preferences; with random tie-breaks
/// the all-zero initial preferences already explore.
#[derive(Debug)]
pub struct GradientBandit {
    alpha: f64,
    baseline: bool,
    prefs: Vec<f64>,
    mean_reward: f64,
    t: u64,
    rng: RandomSource,
}

impl GradientBandit {
    pub fn new(
        k: usize,
        alpha: f64,
        baseline: bool,
        seed: Option<u64>,
    ) -> Result<Self, AgentError> {
        validate_arms(k)?;

        Ok(Self {
            alpha,
            baseline,
            prefs: vec![0.0; k],
            mean_reward: 0.0,
            t: 0,
            rng: RandomSource::new(seed),
        })
    }
}

impl Agent for GradientBandit {
    fn select(&mut self) -> Result<usize, AgentError> {
        Ok(arg_max(&self.prefs, TieBreak::Random, &mut self.rng)?)
    }

    fn update(&mut self, action: usize, reward: f64) -> Result<(), AgentError> {
        validate_action(action, self.prefs.len())?;

        self.t += 1;
        self.mean_reward = if self.baseline {
            self.mean_reward + (reward - self.mean_reward) / self.t as f64
        } else {
            0.0
        };

        // one softmax snapshot of the pre-update preferences, so every arm
        // moves simultaneously rather than reading earlier writes
        let probs = softmax(&self.prefs);
        let advantage = reward - self.mean_reward;

        for (i, pref) in self.prefs.iter_mut().enumerate() {
            if i == action {
                *pref += self.alpha * advantage * (1.0 - probs[i]);
            } else {
                *pref -= self.alpha * advantage * probs[i];
            }
        }

        Ok(())
    }

    fn reset(&mut self) {
        self.prefs.fill(0.0);
        self.mean_reward = 0.0;
        self.t = 0;
    }
}
