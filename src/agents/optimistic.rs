use super::agent::{validate_action, validate_arms, validate_epsilon, Agent};
use super::errors::AgentError;

use crate::numerical::{arg_max, TieBreak};
use crate::rng::RandomSource;

/// Constant-step-size agent whose estimates start at an optimistic constant
/// instead of zero. Early disappointment drives systematic exploration even
/// at epsilon 0.
#[derive(Debug)]
pub struct OptimisticInit {
    alpha: f64,
    epsilon: f64,
    initial_value: f64,
    q: Vec<f64>,
    rng: RandomSource,
}

impl OptimisticInit {
    pub fn new(
        k: usize,
        alpha: f64,
        epsilon: f64,
        initial_value: f64,
        seed: Option<u64>,
    ) -> Result<Self, AgentError> {
        validate_arms(k)?;
        validate_epsilon(epsilon)?;

        Ok(Self {
            alpha,
            epsilon,
            initial_value,
            q: vec![initial_value; k],
            rng: RandomSource::new(seed),
        })
    }
}

impl Agent for OptimisticInit {
    fn select(&mut self) -> Result<usize, AgentError> {
        if self.rng.chance() < self.epsilon {
            return Ok(self.rng.random_int(0, self.q.len() - 1));
        }

        Ok(arg_max(&self.q, TieBreak::Random, &mut self.rng)?)
    }

    fn update(&mut self, action: usize, reward: f64) -> Result<(), AgentError> {
        validate_action(action, self.q.len())?;

        self.q[action] += self.alpha * (reward - self.q[action]);

        Ok(())
    }

    fn reset(&mut self) {
        self.q.fill(self.initial_value);
    }
}
