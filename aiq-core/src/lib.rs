#![warn(missing_docs)]
//! Core of the AIQ agents.
//!
//! An agent in this library is driven by an external reference machine (see [`Refm`]):
//! at every timestep it receives a vector of discrete observation symbols together with a
//! scalar reward and answers with a discrete action. This crate defines the contracts shared
//! by all agents:
//!
//! * [`Refm`] - dimensions of the environment the agent is bound to.
//! * [`Agent`] - the perceive/reset lifecycle.
//! * [`Configurable`] - construction of an agent from a serializable configuration.
//! * [`ObservationEncoder`] - mapping of observation vectors to integer state ids.
//! * [`record`] - records and injectable recorders used as the logging sink of agents.
pub mod error;
pub mod record;
pub mod util;

mod base;
pub use base::{Agent, Configurable, Refm, RefmShape};

mod encoder;
pub use encoder::{encode_observations, EncodingMode, ObservationEncoder};
pub use error::AgentError;
