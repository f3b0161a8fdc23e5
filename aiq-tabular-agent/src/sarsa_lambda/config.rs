//! Configuration of Sarsa(λ) agent.
use super::ActionSelection;
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

/// Configuration of [`SarsaLambda`](super::SarsaLambda) agent.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct SarsaLambdaConfig {
    /// Initial value of every Q-table entry.
    pub init_q: f64,

    /// Trace decay parameter λ.
    pub lambda: f64,

    /// Learning rate.
    pub alpha: f64,

    /// Exploration rate, also the softmax temperature of
    /// [`ActionSelection::EpsilonGreedySoftmax`].
    pub epsilon: f64,

    /// Internal discount rate. `None` (or zero) uses the discount rate of the experiment.
    #[serde(default)]
    pub gamma: Option<f64>,

    /// Strategy choosing actions from Q-values.
    #[serde(default)]
    pub action_selection: ActionSelection,

    /// Encoding of observation vectors into states.
    #[serde(default)]
    pub encoding: EncodingMode,

    /// Which step snapshots are kept.
    #[serde(default)]
    pub record_policy: RecordPolicy,

    /// Seed of the random number generator.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_seed() -> u64 {
    42
}

impl Default for SarsaLambdaConfig {
    fn default() -> Self {
        Self {
            init_q: 0.0,
            lambda: 0.9,
            alpha: 0.1,
            epsilon: 0.05,
            gamma: None,
            action_selection: ActionSelection::default(),
            encoding: EncodingMode::default(),
            record_policy: RecordPolicy::default(),
            seed: default_seed(),
        }
    }
}

impl SarsaLambdaConfig {
    /// Sets the initial Q-value.
    pub fn init_q(mut self, v: f64) -> Self {
        self.init_q = v;
        self
    }

    /// Sets the trace decay parameter λ.
    pub fn lambda(mut self, v: f64) -> Self {
        self.lambda = v;
        self
    }

    /// Sets the learning rate.
    pub fn alpha(mut self, v: f64) -> Self {
        self.alpha = v;
        self
    }

    /// Sets the exploration rate.
    pub fn epsilon(mut self, v: f64) -> Self {
        self.epsilon = v;
        self
    }

    /// Sets the internal discount rate.
    pub fn gamma(mut self, v: f64) -> Self {
        self.gamma = Some(v);
        self
    }

    /// Sets the action selection strategy.
    pub fn action_selection(mut self, v: ActionSelection) -> Self {
        self.action_selection = v;
        self
    }

    /// Sets how observation vectors are encoded into states.
    pub fn encoding(mut self, v: EncodingMode) -> Self {
        self.encoding = v;
        self
    }

    /// Sets the policy of the step recorder.
    pub fn record_policy(mut self, v: RecordPolicy) -> Self {
        self.record_policy = v;
        self
    }

    /// Sets the random seed.
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    /// Discount rate used by the agent given the discount rate of the experiment.
    pub fn effective_gamma(&self, disc_rate: f64) -> f64 {
        match self.gamma {
            Some(gamma) if gamma != 0.0 => gamma,
            _ => disc_rate,
        }
    }

    /// Loads [`SarsaLambdaConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path_ = path.as_ref().to_owned();
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        info!("Load config of Sarsa(lambda) agent from {}", path_.display());
        Ok(b)
    }

    /// Saves [`SarsaLambdaConfig`] to YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path_ = path.as_ref().to_owned();
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        info!("Save config of Sarsa(lambda) agent into {}", path_.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_effective_gamma() {
        let config = SarsaLambdaConfig::default();
        assert_eq!(config.effective_gamma(0.95), 0.95);
        assert_eq!(config.clone().gamma(0.0).effective_gamma(0.95), 0.95);
        assert_eq!(config.gamma(0.5).effective_gamma(0.95), 0.5);
    }

    #[test]
    fn test_serde_sarsa_lambda_config() -> Result<()> {
        let config = SarsaLambdaConfig::default()
            .init_q(1.0)
            .epsilon(0.0)
            .gamma(0.9)
            .action_selection(ActionSelection::EpsilonGreedy)
            .record_policy(RecordPolicy::LatestOnly);

        let dir = TempDir::new("sarsa_lambda_config")?;
        let path = dir.path().join("sarsa_lambda_config.yaml");
        config.save(&path)?;
        assert_eq!(SarsaLambdaConfig::load(&path)?, config);
        Ok(())
    }

    #[test]
    fn test_minimal_yaml() -> Result<()> {
        let config: SarsaLambdaConfig =
            serde_yaml::from_str("init_q: 0.0\nlambda: 0.8\nalpha: 0.2\nepsilon: 0.1\n")?;
        assert_eq!(config.gamma, None);
        assert_eq!(config.action_selection, ActionSelection::EpsilonGreedySoftmax);
        assert_eq!(config.encoding, EncodingMode::LastCellOnly);
        assert_eq!(config.record_policy, RecordPolicy::Disabled);
        assert_eq!(config.seed, 42);
        Ok(())
    }
}
