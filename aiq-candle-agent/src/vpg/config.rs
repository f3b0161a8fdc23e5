//! Configuration of VPG agent.
use crate::{opt::OptimizerConfig, Device};
use aiq_core::{record::RecordPolicy, EncodingMode};
use anyhow::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    default::Default,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`Vpg`](super::Vpg) agent.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct VpgConfig {
    /// Number of steps buffered before each update of the policy.
    pub steps_per_epoch: usize,

    /// Discount factor of the rewards-to-go.
    pub gamma: f64,

    /// Sizes of the hidden layers of the policy network.
    #[serde(default = "default_hidden_units")]
    pub hidden_units: Vec<usize>,

    /// Optimizer of the policy network.
    #[serde(default)]
    pub opt_config: OptimizerConfig,

    /// Encoding of observation vectors into states.
    #[serde(default)]
    pub encoding: EncodingMode,

    /// Device of the policy network. CPU if not given.
    #[serde(default)]
    pub device: Option<Device>,

    /// Which update records are kept.
    #[serde(default)]
    pub record_policy: RecordPolicy,

    /// Seed of the random number generator used for sampling actions.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_hidden_units() -> Vec<usize> {
    vec![32]
}

fn default_seed() -> u64 {
    42
}

impl Default for VpgConfig {
    fn default() -> Self {
        Self {
            steps_per_epoch: 10,
            gamma: 0.99,
            hidden_units: default_hidden_units(),
            opt_config: OptimizerConfig::default(),
            encoding: EncodingMode::default(),
            device: None,
            record_policy: RecordPolicy::default(),
            seed: default_seed(),
        }
    }
}

impl VpgConfig {
    /// Sets the number of steps per epoch.
    pub fn steps_per_epoch(mut self, v: usize) -> Self {
        self.steps_per_epoch = v;
        self
    }

    /// Sets the discount factor.
    pub fn gamma(mut self, v: f64) -> Self {
        self.gamma = v;
        self
    }

    /// Sets the sizes of the hidden layers.
    pub fn hidden_units(mut self, v: Vec<usize>) -> Self {
        self.hidden_units = v;
        self
    }

    /// Sets the optimizer configuration.
    pub fn opt_config(mut self, v: OptimizerConfig) -> Self {
        self.opt_config = v;
        self
    }

    /// Sets how observation vectors are encoded into states.
    pub fn encoding(mut self, v: EncodingMode) -> Self {
        self.encoding = v;
        self
    }

    /// Sets device.
    pub fn device(mut self, device: Device) -> Self {
        self.device = Some(device);
        self
    }

    /// Sets the policy of the update recorder.
    pub fn record_policy(mut self, v: RecordPolicy) -> Self {
        self.record_policy = v;
        self
    }

    /// Sets the random seed.
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    /// Loads [`VpgConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path_ = path.as_ref().to_owned();
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        info!("Load config of VPG agent from {}", path_.display());
        Ok(b)
    }

    /// Saves [`VpgConfig`] to YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path_ = path.as_ref().to_owned();
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        info!("Save config of VPG agent into {}", path_.display());
        Ok(())
    }
}
