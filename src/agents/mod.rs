mod agent;
mod constant_step;
pub mod errors;
mod gradient;
mod optimistic;
mod sample_average;
mod ucb;

pub use agent::{Agent, AgentType};
