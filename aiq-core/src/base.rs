//! Core functionalities.
mod agent;
mod refm;
pub use agent::{Agent, Configurable};
pub use refm::{Refm, RefmShape};
