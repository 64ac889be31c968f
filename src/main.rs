mod agents;
mod config;
mod environment;
mod errors;
mod evaluation;
mod gambler;
mod numerical;
mod rng;

use agents::AgentType;
use config::AppConfig;
use environment::EnvironmentKind;
use errors::{AppError, OutputError};
use evaluation::{column_stats, sweep, ColumnStats};
use gambler::ValueIteration;

use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// One learning-curve comparison: several agents against the same testbed.
struct Experiment {
    name: &'static str,
    kind: EnvironmentKind,
    agents: Vec<(&'static str, AgentType)>,
}

/// The classic teaching exercises, one experiment per chapter-2 script.
fn roster() -> Vec<Experiment> {
    vec![
        Experiment {
            name: "sample_average",
            kind: EnvironmentKind::Stationary { mean: 0.0 },
            agents: vec![
                ("greedy", AgentType::SampleAverage { epsilon: 0.0 }),
                ("e=0.01", AgentType::SampleAverage { epsilon: 0.01 }),
                ("e=0.1", AgentType::SampleAverage { epsilon: 0.1 }),
            ],
        },
        Experiment {
            name: "nonstationary",
            kind: EnvironmentKind::Nonstationary,
            agents: vec![
                (
                    "greedy",
                    AgentType::ConstantStep {
                        alpha: 0.01,
                        epsilon: 0.0,
                    },
                ),
                (
                    "e=0.01",
                    AgentType::ConstantStep {
                        alpha: 0.01,
                        epsilon: 0.01,
                    },
                ),
                (
                    "e=0.1",
                    AgentType::ConstantStep {
                        alpha: 0.01,
                        epsilon: 0.1,
                    },
                ),
            ],
        },
        Experiment {
            name: "gradient",
            kind: EnvironmentKind::Stationary { mean: 4.0 },
            agents: vec![
                (
                    "baseline",
                    AgentType::Gradient {
                        alpha: 0.1,
                        baseline: true,
                    },
                ),
                (
                    "no baseline",
                    AgentType::Gradient {
                        alpha: 0.1,
                        baseline: false,
                    },
                ),
            ],
        },
        Experiment {
            name: "optimistic_init",
            kind: EnvironmentKind::Stationary { mean: 0.0 },
            agents: vec![
                (
                    "optimistic",
                    AgentType::OptimisticInit {
                        alpha: 0.1,
                        epsilon: 0.0,
                        initial_value: 5.0,
                    },
                ),
                (
                    "epsilon greedy",
                    AgentType::OptimisticInit {
                        alpha: 0.1,
                        epsilon: 0.1,
                        initial_value: 0.0,
                    },
                ),
            ],
        },
        Experiment {
            name: "ucb",
            kind: EnvironmentKind::Stationary { mean: 0.0 },
            agents: vec![
                (
                    "ucb",
                    AgentType::Ucb {
                        alpha: 0.1,
                        epsilon: 0.0,
                        confidence: 2.0,
                    },
                ),
                (
                    "e-greedy",
                    AgentType::Ucb {
                        alpha: 0.1,
                        epsilon: 0.1,
                        confidence: 0.0,
                    },
                ),
            ],
        },
    ]
}

#[derive(Serialize)]
struct Curve {
    experiment: &'static str,
    agent: &'static str,
    #[serde(flatten)]
    stats: ColumnStats,
}

fn write_json<T: Serialize>(dir: &Path, name: &str, value: &T) -> Result<(), OutputError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(name);
    fs::write(&path, serde_json::to_vec_pretty(value)?)?;
    info!(path = %path.display(), "wrote results");
    Ok(())
}

fn run(config: &AppConfig) -> Result<(), AppError> {
    let sim = &config.simulation;
    let mut curves = Vec::new();

    for experiment in roster() {
        for (label, agent_type) in experiment.agents {
            info!(
                experiment = experiment.name,
                agent = label,
                runs = sim.runs,
                steps = sim.steps,
                "running sweep"
            );

            let mut agent = agent_type.build(sim.k, sim.seed)?;
            let matrix = sweep(
                agent.as_mut(),
                experiment.kind,
                sim.k,
                sim.runs,
                sim.steps,
                sim.seed,
            )?;

            curves.push(Curve {
                experiment: experiment.name,
                agent: label,
                stats: column_stats(&matrix),
            });
        }
    }

    write_json(&config.output.dir, "learning_curves.json", &curves)?;

    let solver = ValueIteration::new(
        config.gambler.ph,
        config.gambler.theta,
        config.gambler.max_sweeps,
    )?;
    let solution = solver.solve();

    if solution.converged {
        info!(sweeps = solution.sweeps, "value iteration converged");
    } else {
        warn!(
            sweeps = solution.sweeps,
            "value iteration stopped at the sweep cap before reaching precision"
        );
    }

    write_json(&config.output.dir, "gamblers_problem.json", &solution)?;

    Ok(())
}

fn main() -> Result<(), AppError> {
    let config = AppConfig::from_env().expect("Cannot read config");
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_level))
        .init();

    run(&config)
}
