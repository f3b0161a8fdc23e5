//! Sarsa(λ) agent.
mod base;
mod config;
mod explorer;
mod table;
pub use base::SarsaLambda;
pub use config::SarsaLambdaConfig;
pub use explorer::ActionSelection;
pub use table::ValueTable;
