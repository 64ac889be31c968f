use crate::agents::Agent;
use crate::environment::{EnvironmentKind, KArmedBandit};
use crate::errors::SimulationError;
use crate::rng::derive_seed;

use serde::Serialize;
use tracing::debug;

/// Run-major reward samples: one row per independent run, one column per
/// time step.
pub type RewardMatrix = Vec<Vec<f64>>;

/// Plays one agent against one environment for `steps` turns. Strictly
/// sequential: every update is visible to the next selection.
pub fn evaluate(
    agent: &mut dyn Agent,
    env: &mut KArmedBandit,
    steps: usize,
) -> Result<Vec<f64>, SimulationError> {
    agent.reset();

    let mut rewards = Vec::with_capacity(steps);
    for _ in 0..steps {
        let action = agent.select()?;
        let reward = env.take_action(action)?;
        agent.update(action, reward)?;
        rewards.push(reward);
    }

    Ok(rewards)
}

/// Repeats `evaluate` over `runs` independent runs, each against a freshly
/// constructed environment with its own derived random stream.
pub fn sweep(
    agent: &mut dyn Agent,
    kind: EnvironmentKind,
    k: usize,
    runs: usize,
    steps: usize,
    seed: Option<u64>,
) -> Result<RewardMatrix, SimulationError> {
    (0..runs)
        .map(|run| {
            debug!(run, "starting run");
            let mut env = kind.build(k, derive_seed(seed, run as u64));
            evaluate(agent, &mut env, steps)
        })
        .collect()
}

/// Per-step mean and population variance across the run axis, the learning
/// curve handed to the charting collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnStats {
    pub mean: Vec<f64>,
    pub variance: Vec<f64>,
}

pub fn column_stats(matrix: &RewardMatrix) -> ColumnStats {
    let runs = matrix.len();
    let steps = matrix.first().map_or(0, Vec::len);

    let mut mean = vec![0.0; steps];
    let mut variance = vec![0.0; steps];

    if runs == 0 {
        return ColumnStats { mean, variance };
    }

    for row in matrix {
        for (m, &r) in mean.iter_mut().zip(row) {
            *m += r;
        }
    }
    for m in &mut mean {
        *m /= runs as f64;
    }

    for row in matrix {
        for ((v, &m), &r) in variance.iter_mut().zip(&mean).zip(row) {
            *v += (r - m) * (r - m);
        }
    }
    for v in &mut variance {
        *v /= runs as f64;
    }

    ColumnStats { mean, variance }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::AgentType;

    const SEED: u64 = 1234;

    #[test]
    fn evaluate_returns_exactly_one_reward_per_step() {
        let mut agent = AgentType::SampleAverage { epsilon: 0.1 }
            .build(10, Some(SEED))
            .unwrap();
        let mut env = KArmedBandit::stationary(10, 0.0, Some(SEED));

        for steps in [0, 1, 137] {
            let rewards = evaluate(agent.as_mut(), &mut env, steps).unwrap();
            assert_eq!(rewards.len(), steps);
        }
    }

    #[test]
    fn sweep_stacks_one_row_per_run() {
        let mut agent = AgentType::ConstantStep {
            alpha: 0.1,
            epsilon: 0.1,
        }
        .build(5, Some(SEED))
        .unwrap();

        let matrix = sweep(
            agent.as_mut(),
            EnvironmentKind::Stationary { mean: 0.0 },
            5,
            7,
            20,
            Some(SEED),
        )
        .unwrap();

        assert_eq!(matrix.len(), 7);
        assert!(matrix.iter().all(|row| row.len() == 20));
    }

    #[test]
    fn seeded_sweeps_are_reproducible() {
        let run_once = || {
            let mut agent = AgentType::Ucb {
                alpha: 0.1,
                epsilon: 0.0,
                confidence: 2.0,
            }
            .build(5, Some(SEED))
            .unwrap();
            sweep(
                agent.as_mut(),
                EnvironmentKind::Stationary { mean: 0.0 },
                5,
                3,
                50,
                Some(SEED),
            )
            .unwrap()
        };

        assert_eq!(run_once(), run_once());
    }

    #[test]
    fn column_stats_match_hand_computed_values() {
        let matrix = vec![vec![1.0, 2.0], vec![3.0, 2.0]];
        let stats = column_stats(&matrix);

        assert_eq!(stats.mean, vec![2.0, 2.0]);
        assert_eq!(stats.variance, vec![1.0, 0.0]);
    }

    #[test]
    fn column_stats_of_an_empty_matrix_are_empty() {
        let stats = column_stats(&Vec::new());
        assert!(stats.mean.is_empty());
        assert!(stats.variance.is_empty());
    }
}
