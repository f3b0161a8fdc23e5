//! Vanilla Policy Gradient (VPG) agent.
mod base;
mod buffer;
mod config;
mod model;
pub use base::Vpg;
pub use buffer::RolloutBuffer;
pub use config::VpgConfig;
pub use model::PolicyModel;
