//! Reference machine.
use serde::{Deserialize, Serialize};

/// Dimensions of the environment (reference machine) an agent is bound to.
///
/// Only the sizes of the observation and action spaces are consumed at construction time;
/// observations and rewards are passed to [`Agent::perceive`](crate::Agent::perceive).
pub trait Refm {
    /// Number of distinct observations.
    fn num_observations(&self) -> usize;

    /// Size of the symbol alphabet of a single observation cell.
    fn num_observation_symbols(&self) -> usize;

    /// Number of cells in an observation vector.
    fn num_observation_cells(&self) -> usize;

    /// Number of actions.
    fn num_actions(&self) -> usize;
}

/// Plain description of the dimensions of a reference machine.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct RefmShape {
    /// Number of distinct observations.
    pub num_observations: usize,

    /// Size of the symbol alphabet of a single observation cell.
    pub num_observation_symbols: usize,

    /// Number of cells in an observation vector.
    pub num_observation_cells: usize,

    /// Number of actions.
    pub num_actions: usize,
}

impl RefmShape {
    /// Shape with `symbols^cells` observations, i.e. every observation vector is distinct.
    ///
    /// Returns `None` if the number of observations overflows.
    pub fn dense(symbols: usize, cells: usize, num_actions: usize) -> Option<Self> {
        let num_observations = symbols.checked_pow(u32::try_from(cells).ok()?)?;
        Some(Self {
            num_observations,
            num_observation_symbols: symbols,
            num_observation_cells: cells,
            num_actions,
        })
    }
}

impl Refm for RefmShape {
    fn num_observations(&self) -> usize {
        self.num_observations
    }

    fn num_observation_symbols(&self) -> usize {
        self.num_observation_symbols
    }

    fn num_observation_cells(&self) -> usize {
        self.num_observation_cells
    }

    fn num_actions(&self) -> usize {
        self.num_actions
    }
}
