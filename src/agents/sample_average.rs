use super::agent::{validate_action, validate_arms, validate_epsilon, Agent};
use super::errors::AgentError;

use crate::numerical::{arg_max, TieBreak};
use crate::rng::RandomSource;

/// Epsilon-greedy agent whose estimates are the exact running mean of the
/// rewards observed per arm.
#[derive(Debug)]
pub struct SampleAverage {
    epsilon: f64,
    q: Vec<f64>,
    counts: Vec<u64>,
    rng: RandomSource,
}

impl SampleAverage {
    pub fn new(k: usize, epsilon: f64, seed: Option<u64>) -> Result<Self, AgentError> {
        validate_arms(k)?;
        validate_epsilon(epsilon)?;

        Ok(Self {
            epsilon,
            q: vec![0.0; k],
            counts: vec![0; k],
            rng: RandomSource::new(seed),
        })
    }
}

impl Agent for SampleAverage {
    fn select(&mut self) -> Result<usize, AgentError> {
        if self.rng.chance() < self.epsilon {
            return Ok(self.rng.random_int(0, self.q.len() - 1));
        }

        Ok(arg_max(&self.q, TieBreak::Random, &mut self.rng)?)
    }

    fn update(&mut self, action: usize, reward: f64) -> Result<(), AgentError> {
        validate_action(action, self.q.len())?;

        self.counts[action] += 1;
        self.q[action] += (reward - self.q[action]) / self.counts[action] as f64;

        Ok(())
    }

    fn reset(&mut self) {
        self.q.fill(0.0);
        self.counts.fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: u64 = 1234;

    #[test]
    fn estimate_is_the_arithmetic_mean() {
        let mut agent = SampleAverage::new(3, 0.0, Some(SEED)).unwrap();

        for reward in [1.0, 2.0, 3.0, 6.0] {
            agent.update(1, reward).unwrap();
        }

        assert!((agent.q[1] - 3.0).abs() < 1e-12);
        assert_eq!(agent.counts[1], 4);
        assert_eq!(agent.q[0], 0.0);
    }

    #[test]
    fn greedy_selects_the_best_estimate() {
        let mut agent = SampleAverage::new(4, 0.0, Some(SEED)).unwrap();
        agent.update(2, 5.0).unwrap();

        for _ in 0..50 {
            assert_eq!(agent.select().unwrap(), 2);
        }
    }

    #[test]
    fn update_rejects_action_at_and_past_k() {
        let mut agent = SampleAverage::new(3, 0.1, Some(SEED)).unwrap();
        assert_eq!(
            agent.update(3, 1.0),
            Err(AgentError::ActionOutOfRange { action: 3, arms: 3 })
        );
        assert!(agent.update(4, 1.0).is_err());
        assert!(agent.update(2, 1.0).is_ok());
    }

    #[test]
    fn invalid_epsilon_is_rejected() {
        assert!(SampleAverage::new(3, -0.01, Some(SEED)).is_err());
        assert!(SampleAverage::new(3, 1.01, Some(SEED)).is_err());
        assert!(SampleAverage::new(3, 0.0, Some(SEED)).is_ok());
        assert!(SampleAverage::new(3, 1.0, Some(SEED)).is_ok());
    }

    #[test]
    fn reset_restores_a_fresh_estimate_state() {
        let mut agent = SampleAverage::new(3, 0.1, Some(SEED)).unwrap();
        agent.update(0, 2.0).unwrap();
        agent.update(1, -1.0).unwrap();

        agent.reset();

        assert_eq!(agent.q, vec![0.0; 3]);
        assert_eq!(agent.counts, vec![0; 3]);
    }

    #[test]
    fn same_seed_gives_the_same_action_sequence() {
        let mut a = SampleAverage::new(10, 0.3, Some(SEED)).unwrap();
        let mut b = SampleAverage::new(10, 0.3, Some(SEED)).unwrap();

        for step in 0..200 {
            let action_a = a.select().unwrap();
            let action_b = b.select().unwrap();
            assert_eq!(action_a, action_b);

            let reward = (step % 5) as f64;
            a.update(action_a, reward).unwrap();
            b.update(action_b, reward).unwrap();
        }
    }
}
