use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub struct SimulationConfig {
    pub k: usize,
    pub runs: usize,
    pub steps: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct GamblerConfig {
    pub ph: f64,
    pub theta: f64,
    pub max_sweeps: usize,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub log_level: String,
    pub simulation: SimulationConfig,
    pub gambler: GamblerConfig,
    pub output: OutputConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("log_level", "info")?
            .set_default("simulation.k", 10)?
            .set_default("simulation.runs", 200)?
            .set_default("simulation.steps", 1000)?
            .set_default("gambler.ph", 0.55)?
            .set_default("gambler.theta", 1e-5)?
            .set_default("gambler.max_sweeps", 100)?
            .set_default("output.dir", "out")?
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("APP"))
            .build()?;

        builder.try_deserialize()
    }
}
