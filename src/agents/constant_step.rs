use super::agent::{validate_action, validate_arms, validate_epsilon, Agent};
use super::errors::AgentError;

use crate::numerical::{arg_max, TieBreak};
use crate::rng::RandomSource;

/// Epsilon-greedy agent with a fixed step size, so recent rewards dominate
/// the estimate. The tracker of choice on the nonstationary testbed.
#[derive(Debug)]
pub struct ConstantStep {
    alpha: f64,
    epsilon: f64,
    q: Vec<f64>,
    rng: RandomSource,
}

impl ConstantStep {
    pub fn new(k: usize, alpha: f64, epsilon: f64, seed: Option<u64>) -> Result<Self, AgentError> {
        validate_arms(k)?;
        validate_epsilon(epsilon)?;

        Ok(Self {
            alpha,
            epsilon,
            q: vec![0.0; k],
            rng: RandomSource::new(seed),
        })
    }
}

impl Agent for ConstantStep {
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
        self.q.fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: u64 = 1234;

    #[test]
    fn first_update_moves_by_alpha_times_reward() {
        let mut agent = ConstantStep::new(3, 0.1, 0.0, Some(SEED)).unwrap();
        agent.update(1, 4.0).unwrap();

        assert!((agent.q[1] - 0.4).abs() < 1e-12);
    }

    #[test]
    fn estimate_approaches_a_constant_reward() {
        let mut agent = ConstantStep::new(2, 0.1, 0.0, Some(SEED)).unwrap();
        for _ in 0..200 {
            agent.update(0, 1.0).unwrap();
        }

        assert!((agent.q[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn update_rejects_action_at_and_past_k() {
        let mut agent = ConstantStep::new(3, 0.1, 0.0, Some(SEED)).unwrap();
        assert!(agent.update(3, 1.0).is_err());
        assert!(agent.update(2, 1.0).is_ok());
    }

    #[test]
    fn reset_clears_the_estimates() {
        let mut agent = ConstantStep::new(3, 0.5, 0.0, Some(SEED)).unwrap();
        agent.update(2, 8.0).unwrap();
        agent.reset();

        assert_eq!(agent.q, vec![0.0; 3]);
    }
}
