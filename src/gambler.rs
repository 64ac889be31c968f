use crate::numerical::arg_max_first;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Capital level at which the gambler wins.
const GOAL: usize = 100;
/// Undiscounted episodic task.
const GAMMA: f64 = 1.0;

#[derive(Debug, Error, PartialEq)]
pub enum GamblerError {
    #[error("Expected a probability between 0 and 1, got {0}")]
    InvalidProbability(f64),
}

/// Value-iteration solver for the Gambler's Problem: capital levels 0..=100,
/// stake `a` in 1..=s per state, win with probability `ph`.
#[derive(Debug, Clone)]
pub struct ValueIteration {
    ph: f64,
    theta: f64,
    max_sweeps: usize,
}

/// Converged (or capped) value function and greedy policy. `converged`
/// distinguishes a met precision threshold from the sweep-cap safety valve.
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    /// Expected return per capital level, 101 entries; both boundaries stay 0.
    pub value: Vec<f64>,
    /// Greedy stake per capital level 0..100, lowest stake on ties; 0 at s=0
    /// where no stake is feasible.
    pub policy: Vec<usize>,
    pub sweeps: usize,
    pub converged: bool,
}

impl ValueIteration {
    pub fn new(ph: f64, theta: f64, max_sweeps: usize) -> Result<Self, GamblerError> {
        if !(0.0..=1.0).contains(&ph) {
            return Err(GamblerError::InvalidProbability(ph));
        }

        Ok(Self {
            ph,
            theta,
            max_sweeps,
        })
    }

    pub fn solve(&self) -> Solution {
        let mut value = vec![0.0; GOAL + 1];
        let mut delta = f64::INFINITY;
        let mut sweeps = 0;

        while delta > self.theta && sweeps < self.max_sweeps {
            sweeps += 1;
            delta = 0.0;

            // ascending in-place sweep: later states read values already
            // refined earlier in the same pass
            for s in 0..GOAL {
                let old = value[s];
                let best = (1..=s)
                    .map(|a| self.expected_return(s, a, &value))
                    .fold(0.0_f64, f64::max);

                value[s] = best;
                delta = delta.max((old - best).abs());
            }

            debug!(sweeps, delta, "value sweep");
        }

        let policy = (0..GOAL)
            .map(|s| {
                let returns: Vec<f64> = (1..=s)
                    .map(|a| self.expected_return(s, a, &value))
                    .collect();
                match arg_max_first(&returns) {
                    Ok(idx) => idx + 1,
                    Err(_) => 0,
                }
            })
            .collect();

        Solution {
            value,
            policy,
            sweeps,
            converged: delta <= self.theta,
        }
    }

    /// One Bellman backup term: stake `a` from capital `s` against the
    /// current value estimates. Reward is a function of the next state only.
    fn expected_return(&self, s: usize, a: usize, value: &[f64]) -> f64 {
        let win = (s + a).min(GOAL);
        let lose = s - a;

        let return_win = reward(win) + GAMMA * value[win];
        let return_lose = reward(lose) + GAMMA * value[lose];

        self.ph * return_win + (1.0 - self.ph) * return_lose
    }
}

fn reward(state: usize) -> f64 {
    if state >= GOAL {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_probability_is_rejected() {
        assert!(ValueIteration::new(1.5, 1e-5, 100).is_err());
        assert!(ValueIteration::new(-0.1, 1e-5, 100).is_err());
        assert!(ValueIteration::new(0.55, 1e-5, 100).is_ok());
    }

    #[test]
    fn boundaries_stay_at_zero() {
        let solution = ValueIteration::new(0.55, 1e-5, 100).unwrap().solve();
        assert_eq!(solution.value[0], 0.0);
        assert_eq!(solution.value[GOAL], 0.0);
    }

    #[test]
    fn terminates_at_the_sweep_cap_and_says_so() {
        // the undiscounted favorable coin needs far more than 100 sweeps to
        // reach 1e-5 precision; the cap is the only termination guarantee and
        // the solution must report it
        let solution = ValueIteration::new(0.55, 1e-5, 100).unwrap().solve();
        assert_eq!(solution.sweeps, 100);
        assert!(!solution.converged);
    }

    #[test]
    fn converges_given_enough_sweeps() {
        let solution = ValueIteration::new(0.55, 1e-5, 1000).unwrap().solve();
        assert!(solution.converged);
        assert!(solution.sweeps < 1000);
    }

    #[test]
    fn unfavorable_coin_converges_quickly() {
        // the classic ph = 0.4 problem settles in about a dozen sweeps, and
        // bold play gives value[50] = ph exactly
        let solution = ValueIteration::new(0.4, 1e-5, 100).unwrap().solve();
        assert!(solution.converged);
        assert!(solution.sweeps <= 20);
        assert!((solution.value[50] - 0.4).abs() < 1e-3);
    }

    #[test]
    fn value_is_monotone_in_capital() {
        let solution = ValueIteration::new(0.55, 1e-5, 1000).unwrap().solve();
        for s in 1..GOAL - 1 {
            assert!(
                solution.value[s + 1] + 1e-9 >= solution.value[s],
                "value dropped between {} and {}",
                s,
                s + 1
            );
        }
        assert!(solution.value[1] > 0.0);
        assert!(solution.value[GOAL - 1] < 1.0 + 1e-9);
    }

    #[test]
    fn policy_stakes_are_feasible() {
        let solution = ValueIteration::new(0.55, 1e-5, 100).unwrap().solve();
        assert_eq!(solution.policy.len(), GOAL);
        assert_eq!(solution.policy[0], 0);
        for s in 1..GOAL {
            let stake = solution.policy[s];
            assert!((1..=s).contains(&stake), "infeasible stake {stake} at {s}");
        }
    }

    #[test]
    fn a_tight_cap_reports_non_convergence() {
        let solution = ValueIteration::new(0.4, 1e-12, 2).unwrap().solve();
        assert!(!solution.converged);
        assert_eq!(solution.sweeps, 2);
    }
}
