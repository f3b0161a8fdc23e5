//! Encoding of observation vectors into integer state ids.
use crate::{error::AgentError, Refm};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// How the cells of an observation vector are combined into a state id.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
pub enum EncodingMode {
    /// Only the last cell determines the state: `obs[cells - 1] * symbols^(cells - 1)`.
    ///
    /// This is what deployed AIQ agents compute; for a single cell it coincides with
    /// [`EncodingMode::MixedRadix`].
    #[default]
    LastCellOnly,

    /// Mixed-radix number with base `symbols`: `sum_i obs[i] * symbols^i`.
    MixedRadix,
}

/// Encodes `observations` with the alphabet size `symbols`.
///
/// The function does not validate its input, see [`ObservationEncoder::encode`] for
/// the checked version. Arithmetic wraps silently for state spaces that do not fit `usize`.
pub fn encode_observations(observations: &[usize], symbols: usize, mode: EncodingMode) -> usize {
    match mode {
        EncodingMode::LastCellOnly => match observations.len() {
            0 => 0,
            n => {
                let weight = (1..n).fold(1usize, |w, _| w.wrapping_mul(symbols));
                observations[n - 1].wrapping_mul(weight)
            }
        },
        EncodingMode::MixedRadix => observations
            .iter()
            .rev()
            .fold(0usize, |acc, &o| acc.wrapping_mul(symbols).wrapping_add(o)),
    }
}

/// Validating encoder of observation vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservationEncoder {
    symbols: usize,
    cells: usize,
    mode: EncodingMode,
    state_space_size: usize,
}

impl ObservationEncoder {
    /// Creates an encoder for `cells` cells over an alphabet of `symbols` symbols.
    ///
    /// Fails if `symbols^cells` does not fit `usize`.
    pub fn new(symbols: usize, cells: usize, mode: EncodingMode) -> Result<Self, AgentError> {
        let state_space_size = u32::try_from(cells)
            .ok()
            .and_then(|c| symbols.checked_pow(c))
            .ok_or_else(|| {
                AgentError::InvalidConfiguration(format!(
                    "state space of {} symbols over {} cells overflows",
                    symbols, cells
                ))
            })?;

        Ok(Self {
            symbols,
            cells,
            mode,
            state_space_size,
        })
    }

    /// Creates an encoder with the observation dimensions of `refm`.
    pub fn from_refm(refm: &impl Refm, mode: EncodingMode) -> Result<Self, AgentError> {
        Self::new(refm.num_observation_symbols(), refm.num_observation_cells(), mode)
    }

    /// Encodes an observation vector into a state id in `[0, symbols^cells)`.
    pub fn encode(&self, observations: &[usize]) -> Result<usize, AgentError> {
        self.check(observations)?;
        Ok(encode_observations(observations, self.symbols, self.mode))
    }

    /// Checks the length of `observations` and the range of each cell.
    pub fn check(&self, observations: &[usize]) -> Result<(), AgentError> {
        if observations.len() != self.cells {
            return Err(AgentError::InvalidObservationShape {
                expected: self.cells,
                got: observations.len(),
            });
        }

        match observations.iter().position(|&o| o >= self.symbols) {
            Some(cell) => Err(AgentError::InvalidObservationSymbol {
                cell,
                symbol: observations[cell],
                symbols: self.symbols,
            }),
            None => Ok(()),
        }
    }

    /// Number of distinct state ids, `symbols^cells`.
    pub fn state_space_size(&self) -> usize {
        self.state_space_size
    }

    /// Size of the symbol alphabet.
    pub fn symbols(&self) -> usize {
        self.symbols
    }

    /// Number of observation cells.
    pub fn cells(&self) -> usize {
        self.cells
    }

    /// Encoding mode.
    pub fn mode(&self) -> EncodingMode {
        self.mode
    }
}
