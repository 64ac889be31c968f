use super::agent::{validate_action, validate_arms, validate_epsilon, Agent};
use super::errors::AgentError;

use crate::numerical::{arg_max, TieBreak};
use crate::rng::RandomSource;

/// Upper-confidence-bound agent: greedy over the estimates plus an
/// exploration bonus that favors arms pulled least relative to the global
/// step count. Pull counts start at 1 so the bonus is defined from the first
/// step.
#[derive(Debug)]
pub struct Ucb {
    alpha: f64,
    epsilon: f64,
    confidence: f64,
    q: Vec<f64>,
    pulls: Vec<u64>,
    t: u64,
    rng: RandomSource,
}

impl Ucb {
    pub fn new(
        k: usize,
        alpha: f64,
        epsilon: f64,
        confidence: f64,
        seed: Option<u64>,
    ) -> Result<Self, AgentError> {
        validate_arms(k)?;
        validate_epsilon(epsilon)?;

        Ok(Self {
            alpha,
            epsilon,
            confidence,
            q: vec![0.0; k],
            pulls: vec![1; k],
            t: 1,
            rng: RandomSource::new(seed),
        })
    }

    fn bounds(&self) -> Vec<f64> {
        let log_t = (self.t as f64).ln();
        self.q
            .iter()
            .zip(&self.pulls)
            .map(|(&value, &pulls)| value + self.confidence * (log_t / pulls as f64).sqrt())
            .collect()
    }
}

impl Agent for Ucb {
    fn select(&mut self) -> Result<usize, AgentError> {
        if self.rng.chance() < self.epsilon {
            return Ok(self.rng.random_int(0, self.q.len() - 1));
        }

        let bounds = self.bounds();
        Ok(arg_max(&bounds, TieBreak::Random, &mut self.rng)?)
    }

    fn update(&mut self, action: usize, reward: f64) -> Result<(), AgentError> {
        validate_action(action, self.q.len())?;

        self.q[action] += self.alpha * (reward - self.q[action]);
        self.t += 1;
        self.pulls[action] += 1;

        Ok(())
    }

    fn reset(&mut self) {
        self.q.fill(0.0);
        self.pulls.fill(1);
        self.t = 1;
    }
}
