//! Q-values, eligibility traces and visit counts of a tabular agent.
use ndarray::{Array1, Array2, ArrayView1, Zip};
use serde::{Deserialize, Serialize};

/// Dense state-action tables of a tabular agent.
///
/// Both tables have shape `(num_states, num_actions)` and are never resized.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ValueTable {
    init_q: f64,
    q: Array2<f64>,
    e: Array2<f64>,
    visits: Array1<u64>,
}

impl ValueTable {
    /// Creates tables with every Q-value set to `init_q` and every trace set to zero.
    pub fn new(num_states: usize, num_actions: usize, init_q: f64) -> Self {
        Self {
            init_q,
            q: Array2::from_elem((num_states, num_actions), init_q),
            e: Array2::zeros((num_states, num_actions)),
            visits: Array1::zeros(num_states),
        }
    }

    /// Restores the values set at construction without reallocating.
    pub fn reset(&mut self) {
        self.q.fill(self.init_q);
        self.e.fill(0.0);
        self.visits.fill(0);
    }

    /// Number of states.
    pub fn num_states(&self) -> usize {
        self.q.nrows()
    }

    /// Number of actions.
    pub fn num_actions(&self) -> usize {
        self.q.ncols()
    }

    /// Q-value of a state-action pair.
    pub fn q(&self, state: usize, action: usize) -> f64 {
        self.q[[state, action]]
    }

    /// Eligibility trace of a state-action pair.
    pub fn trace(&self, state: usize, action: usize) -> f64 {
        self.e[[state, action]]
    }

    /// Q-values of all actions in `state`.
    pub fn q_row(&self, state: usize) -> ArrayView1<f64> {
        self.q.row(state)
    }

    /// The Q-table.
    pub fn q_values(&self) -> &Array2<f64> {
        &self.q
    }

    /// The eligibility-trace table.
    pub fn traces(&self) -> &Array2<f64> {
        &self.e
    }

    /// Per-state visit counts.
    pub fn visits(&self) -> &Array1<u64> {
        &self.visits
    }

    /// Counts a visit of `state`.
    pub fn visit(&mut self, state: usize) {
        self.visits[state] += 1;
    }

    /// Applies one Sarsa(λ) update with TD error `delta` credited to `(state, action)`.
    ///
    /// The trace of `(state, action)` is incremented by one, then every cell of the table gets
    /// `Q += alpha * delta * E` followed by `E *= decay`. Returns `true` if the magnitude of any
    /// updated Q-value exceeds `limit`.
    pub fn sweep(
        &mut self,
        state: usize,
        action: usize,
        alpha: f64,
        delta: f64,
        decay: f64,
        limit: f64,
    ) -> bool {
        self.e[[state, action]] += 1.0;

        let mut exceeded = false;
        Zip::from(&mut self.q).and(&mut self.e).for_each(|q, e| {
            *q += alpha * delta * *e;
            *e *= decay;
            if q.abs() > limit {
                exceeded = true;
            }
        });
        exceeded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_values() {
        let table = ValueTable::new(3, 2, 0.5);
        assert_eq!(table.num_states(), 3);
        assert_eq!(table.num_actions(), 2);
        assert!(table.q_values().iter().all(|&q| q == 0.5));
        assert!(table.traces().iter().all(|&e| e == 0.0));
        assert!(table.visits().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_sweep_updates_every_eligible_cell() {
        let mut table = ValueTable::new(2, 2, 0.0);

        // First credit (1, 1), then (0, 0): the older trace has decayed once.
        assert!(!table.sweep(1, 1, 0.5, 1.0, 0.5, 100.0));
        assert_eq!(table.q(1, 1), 0.5);
        assert_eq!(table.trace(1, 1), 0.5);

        assert!(!table.sweep(0, 0, 0.5, 2.0, 0.5, 100.0));
        assert_eq!(table.q(0, 0), 1.0);
        assert_eq!(table.q(1, 1), 0.5 + 0.5 * 2.0 * 0.5);
        assert_eq!(table.trace(0, 0), 0.5);
        assert_eq!(table.trace(1, 1), 0.25);
        assert_eq!(table.q(0, 1), 0.0);
        assert_eq!(table.q(1, 0), 0.0);
    }

    #[test]
    fn test_sweep_reports_limit() {
        let mut table = ValueTable::new(1, 2, 0.0);
        assert!(table.sweep(0, 1, 1.0, -20.0, 0.0, 10.0));
        assert_eq!(table.q(0, 1), -20.0);
    }

    #[test]
    fn test_reset() {
        let mut table = ValueTable::new(2, 3, 1.0);
        table.sweep(1, 2, 0.1, 3.0, 0.9, 100.0);
        table.visit(1);
        table.reset();
        assert_eq!(table, ValueTable::new(2, 3, 1.0));
    }
}
