//! Errors in the library.
use thiserror::Error;

/// Errors raised by agents and their collaborators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    /// The length of an observation vector does not match the configured number of cells.
    #[error("Invalid observation shape: expected {expected} cells, got {got}")]
    InvalidObservationShape {
        /// Configured number of observation cells.
        expected: usize,
        /// Length of the received observation vector.
        got: usize,
    },

    /// A cell of an observation vector is not a symbol of the alphabet.
    #[error("Invalid observation symbol {symbol} in cell {cell}: alphabet size is {symbols}")]
    InvalidObservationSymbol {
        /// Index of the offending cell.
        cell: usize,
        /// Value found in the cell.
        symbol: usize,
        /// Size of the symbol alphabet.
        symbols: usize,
    },

    /// An encoded state does not fit the table or feature vector of the agent.
    #[error("State {state} is out of range for a state space of size {size}")]
    StateOutOfRange {
        /// Encoded state id.
        state: usize,
        /// Number of states the agent can represent.
        size: usize,
    },

    /// Construction parameters are not usable.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),
}
