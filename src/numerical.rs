use crate::rng::RandomSource;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum NumericalError {
    #[error("argmax of an empty sequence")]
    EmptySequence,
}

/// How `arg_max` resolves several indices attaining the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreak {
    /// Pick uniformly among the tied indices.
    Random,
    /// Pick the lowest tied index, consuming no randomness.
    First,
}

/// Index of the maximum value. Greedy action selection goes through here, so
/// the tie-break policy decides which arm gets exploited.
pub fn arg_max(
    values: &[f64],
    tie_break: TieBreak,
    rng: &mut RandomSource,
) -> Result<usize, NumericalError> {
    match tie_break {
        TieBreak::First => arg_max_first(values),
        TieBreak::Random => {
            let ties = max_indices(values)?;
            if ties.len() < 2 {
                Ok(ties[0])
            } else {
                Ok(ties[rng.random_int(0, ties.len() - 1)])
            }
        }
    }
}

/// Deterministic lowest-index argmax, for callers that must not draw
/// randomness (policy extraction in the gambler solver).
pub fn arg_max_first(values: &[f64]) -> Result<usize, NumericalError> {
    Ok(max_indices(values)?[0])
}

fn max_indices(values: &[f64]) -> Result<Vec<usize>, NumericalError> {
    let mut max = f64::NEG_INFINITY;
    let mut ties = Vec::new();

    for (i, &v) in values.iter().enumerate() {
        if v > max {
            max = v;
            ties.clear();
            ties.push(i);
        } else if v == max {
            ties.push(i);
        }
    }

    if ties.is_empty() {
        Err(NumericalError::EmptySequence)
    } else {
        Ok(ties)
    }
}

/// Softmax probabilities over a preference vector. Always computed in full so
/// a gradient update can read every probability from the same pre-update
/// snapshot.
pub fn softmax(values: &[f64]) -> Vec<f64> {
    let sum: f64 = values.iter().map(|v| v.exp()).sum();
    values.iter().map(|v| v.exp() / sum).collect()
}
