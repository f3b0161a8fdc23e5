//! Agent.
use super::Refm;
use anyhow::Result;
use log::info;
use serde::de::DeserializeOwned;
use std::{fmt::Display, fs::File, io::BufReader, path::Path};

/// An agent interacting step by step with a reference machine.
///
/// The [`Display`] implementation gives the human readable identity of the agent,
/// e.g. `Sarsa_l(0,0.9,0.1,0.05,0.99)`, used for experiment bookkeeping.
pub trait Agent: Display {
    /// Consumes the observation and reward of the current timestep and returns the next action.
    ///
    /// A malformed observation is reported as an error and leaves the agent untouched.
    fn perceive(&mut self, observations: &[usize], reward: f64) -> Result<usize>;

    /// Returns the agent to the state it had right after construction.
    ///
    /// Configuration parameters are kept.
    fn reset(&mut self);

    /// Number of actions available in the environment.
    fn num_actions(&self) -> usize;
}

/// An agent that can be built from a configuration.
pub trait Configurable: Sized {
    /// Configuration.
    type Config: Clone + DeserializeOwned;

    /// Builds the agent bound to `refm`.
    ///
    /// `disc_rate` is the internal discount rate of the experiment.
    fn build<M: Refm>(refm: &M, disc_rate: f64, config: Self::Config) -> Result<Self>;

    /// Builds the agent with the configuration in the yaml file of the given path.
    fn build_from_path<M: Refm>(refm: &M, disc_rate: f64, path: impl AsRef<Path>) -> Result<Self> {
        let path_ = path.as_ref().to_owned();
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let config = serde_yaml::from_reader(rdr)?;
        info!("Load agent config from {}", path_.display());
        Self::build(refm, disc_rate, config)
    }
}
