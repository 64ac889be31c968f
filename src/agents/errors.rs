use crate::numerical::NumericalError;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AgentError {
    #[error("Expected epsilon to be between 0 and 1, got {0}")]
    InvalidEpsilon(f64),
    #[error("Agent requires at least one arm")]
    NoArms,
    #[error("Attempted to update action estimate outside of range: {action} of {arms} arms")]
    ActionOutOfRange { action: usize, arms: usize },
    #[error(transparent)]
    Numerical(#[from] NumericalError),
}
