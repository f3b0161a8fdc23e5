#![warn(missing_docs)]
//! Tabular agents for AIQ environments.
//!
//! [`SarsaLambda`] is the Sarsa(λ) control algorithm of Sutton and Barto with accumulating
//! eligibility traces. Every call to [`Agent::perceive`](aiq_core::Agent::perceive) sweeps
//! the whole state-action table, so the cost of a step is `O(num_states * num_actions)`.
pub mod sarsa_lambda;
pub use sarsa_lambda::{ActionSelection, SarsaLambda, SarsaLambdaConfig, ValueTable};
