use super::constant_step::ConstantStep;
use super::errors::AgentError;
use super::gradient::GradientBandit;
use super::optimistic::OptimisticInit;
use super::sample_average::SampleAverage;
use super::ucb::Ucb;

use serde::Deserialize;

/// Common capability set of every bandit strategy. An agent is created once
/// and reused across runs; `reset` clears learned state while keeping the
/// hyperparameters.
pub trait Agent {
    /// Chooses the arm to pull next. Always in `[0, k)` for a well-formed
    /// agent.
    fn select(&mut self) -> Result<usize, AgentError>;
    /// Feeds back the reward observed for `action`.
    fn update(&mut self, action: usize, reward: f64) -> Result<(), AgentError>;
    /// Restores all estimate state to its initial value.
    fn reset(&mut self);
}

/// Declarative agent configuration, turned into a concrete strategy by
/// `build`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub enum AgentType {
    SampleAverage {
        epsilon: f64,
    },
    ConstantStep {
        alpha: f64,
        epsilon: f64,
    },
    Gradient {
        alpha: f64,
        baseline: bool,
    },
    OptimisticInit {
        alpha: f64,
        epsilon: f64,
        initial_value: f64,
    },
    Ucb {
        alpha: f64,
        epsilon: f64,
        confidence: f64,
    },
}

impl AgentType {
    pub fn build(self, k: usize, seed: Option<u64>) -> Result<Box<dyn Agent>, AgentError> {
        Ok(match self {
            AgentType::SampleAverage { epsilon } => {
                Box::new(SampleAverage::new(k, epsilon, seed)?)
            }
            AgentType::ConstantStep { alpha, epsilon } => {
                Box::new(ConstantStep::new(k, alpha, epsilon, seed)?)
            }
            AgentType::Gradient { alpha, baseline } => {
                Box::new(GradientBandit::new(k, alpha, baseline, seed)?)
            }
            AgentType::OptimisticInit {
                alpha,
                epsilon,
                initial_value,
            } => Box::new(OptimisticInit::new(k, alpha, epsilon, initial_value, seed)?),
            AgentType::Ucb {
                alpha,
                epsilon,
                confidence,
            } => Box::new(Ucb::new(k, alpha, epsilon, confidence, seed)?),
        })
    }
}

pub(super) fn validate_arms(k: usize) -> Result<(), AgentError> {
    if k == 0 {
        Err(AgentError::NoArms)
    } else {
        Ok(())
    }
}

pub(super) fn validate_epsilon(epsilon: f64) -> Result<(), AgentError> {
    if (0.0..=1.0).contains(&epsilon) {
        Ok(())
    } else {
        Err(AgentError::InvalidEpsilon(epsilon))
    }
}

pub(super) fn validate_action(action: usize, arms: usize) -> Result<(), AgentError> {
    if action >= arms {
        Err(AgentError::ActionOutOfRange { action, arms })
    } else {
        Ok(())
    }
}
