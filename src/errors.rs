use crate::agents::errors::AgentError;
use crate::gambler::GamblerError;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EnvironmentError {
    #[error("action {action} is outside of range for {arms} arms")]
    ActionOutOfRange { action: usize, arms: usize },
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Agent(#[from] AgentError),
    #[error(transparent)]
    Environment(#[from] EnvironmentError),
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error while writing results: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize results to JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Agent(#[from] AgentError),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    #[error(transparent)]
    Gambler(#[from] GamblerError),
    #[error(transparent)]
    Output(#[from] OutputError),
}
