//! Action selection strategies of tabular agents.
use ndarray::ArrayView1;
use rand::{distributions::WeightedIndex, Rng};
use serde::{Deserialize, Serialize};

/// Strategy choosing an action from the Q-values of the current state.
///
/// `epsilon` is the exploration rate of the agent. Ties of the greedy choice are
/// broken toward the lowest action index.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
pub enum ActionSelection {
    /// With probability `epsilon` a uniformly random action, otherwise softmax selection
    /// with temperature `epsilon`.
    ///
    /// A temperature of zero makes the softmax greedy.
    #[default]
    EpsilonGreedySoftmax,

    /// With probability `epsilon` a uniformly random action, otherwise the greedy action.
    EpsilonGreedy,
}

impl ActionSelection {
    /// Takes an action based on action values `q`.
    pub fn action(&self, q: ArrayView1<f64>, epsilon: f64, rng: &mut impl Rng) -> usize {
        if rng.gen::<f64>() < epsilon {
            return rng.gen_range(0..q.len());
        }

        match self {
            Self::EpsilonGreedySoftmax => soft_max(q, epsilon, rng),
            Self::EpsilonGreedy => greedy(q),
        }
    }
}

/// Index of the first maximum of `q`.
///
/// NaN values never win against a number.
pub fn greedy(q: ArrayView1<f64>) -> usize {
    let mut best = 0;
    for (a, &v) in q.iter().enumerate().skip(1) {
        if v > q[best] || (q[best].is_nan() && !v.is_nan()) {
            best = a;
        }
    }
    best
}

/// Samples an action with probabilities proportional to `exp(q / temperature)`.
///
/// Falls back to [`greedy`] when the temperature is not positive or the weights are degenerate.
pub fn soft_max(q: ArrayView1<f64>, temperature: f64, rng: &mut impl Rng) -> usize {
    if temperature <= 0.0 {
        return greedy(q);
    }

    let max = q[greedy(q)];
    let weights = q.mapv(|v| ((v - max) / temperature).exp());
    match WeightedIndex::new(weights.iter()) {
        Ok(dist) => rng.sample(dist),
        Err(_) => greedy(q),
    }
}
