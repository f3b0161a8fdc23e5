//! VPG agent.
use super::{PolicyModel, RolloutBuffer, VpgConfig};
use crate::{
    mlp::{Mlp, MlpConfig},
    util::one_hot,
};
use aiq_core::{
    record::{Record, RecordValue, Recorder},
    Agent, AgentError, Configurable, ObservationEncoder, Refm,
};
use anyhow::{anyhow, Result};
use candle_core::{Device, Tensor};
use log::{debug, info, trace, warn};
use rand::{distributions::WeightedIndex, rngs::SmallRng, Rng, SeedableRng};
use std::{
    fmt,
    path::{Path, PathBuf},
};

/// Episodic Vanilla Policy Gradient agent.
///
/// Observations are encoded into a state id, which is fed to the policy network as a one-hot
/// vector of width `symbols * cells`. Actions are sampled from the softmax of the network
/// output. Every `steps_per_epoch` steps the agent takes one gradient step on the pseudo-loss
/// `-sum_i log p(a_i | s_i) * R_i`, with `R_i` the discounted reward-to-go of step `i`, and
/// clears its buffer.
pub struct Vpg {
    config: VpgConfig,
    obs_dim: usize,
    num_actions: usize,
    encoder: ObservationEncoder,
    device: Device,
    policy: PolicyModel<Mlp>,
    buffer: RolloutBuffer,
    epoch_step: usize,
    n_epochs: usize,
    recorder: Box<dyn Recorder>,
    rng: SmallRng,
}

impl Configurable for Vpg {
    type Config = VpgConfig;

    /// Constructs VPG agent.
    ///
    /// The discount rate of the experiment is not used; rewards-to-go are discounted with
    /// `config.gamma`.
    fn build<M: Refm>(refm: &M, _disc_rate: f64, config: Self::Config) -> Result<Self> {
        if config.steps_per_epoch == 0 {
            return Err(
                AgentError::InvalidConfiguration("steps_per_epoch must be positive".into()).into(),
            );
        }

        let obs_dim = refm.num_observation_symbols() * refm.num_observation_cells();
        let num_actions = refm.num_actions();
        if obs_dim == 0 || num_actions == 0 {
            return Err(AgentError::InvalidConfiguration(format!(
                "empty feature or action space: {} features, {} actions",
                obs_dim, num_actions
            ))
            .into());
        }

        let encoder = ObservationEncoder::from_refm(refm, config.encoding)?;
        let device: Device = config.device.unwrap_or_default().try_into()?;
        let policy = PolicyModel::build(
            MlpConfig::new(obs_dim, config.hidden_units.clone(), num_actions),
            config.opt_config.clone(),
            device.clone(),
        )?;

        let agent = Self {
            obs_dim,
            num_actions,
            encoder,
            device,
            policy,
            buffer: RolloutBuffer::with_capacity(config.steps_per_epoch),
            epoch_step: 0,
            n_epochs: 0,
            recorder: config.record_policy.build(),
            rng: SmallRng::seed_from_u64(config.seed),
            config,
        };
        info!(
            "Build {} with {} features and {} actions",
            agent, obs_dim, num_actions
        );

        Ok(agent)
    }
}

impl Agent for Vpg {
    fn perceive(&mut self, observations: &[usize], reward: f64) -> Result<usize> {
        let nstate = self.encode(observations)?;
        let probs = self.probs(nstate)?;
        let action = self.rng.sample(
            WeightedIndex::new(&probs)
                .map_err(|e| anyhow!("invalid action probabilities {:?}: {}", probs, e))?,
        );
        trace!(
            "state={}, reward={}, probs={:?}, action={}",
            nstate,
            reward,
            probs,
            action
        );

        self.buffer.push(nstate, action as u32, reward as f32);

        if self.epoch_step == self.config.steps_per_epoch - 1 {
            // The epoch is dropped even if the update fails.
            let updated = self.update();
            self.buffer.clear();
            self.epoch_step = 0;
            updated?;
        } else {
            self.epoch_step += 1;
        }

        Ok(action)
    }

    /// Clears the buffer and the step counters.
    ///
    /// The parameters of the policy network are kept, see [`Vpg::reset_policy`].
    fn reset(&mut self) {
        self.buffer.clear();
        self.epoch_step = 0;
        self.n_epochs = 0;
        self.recorder.clear();
    }

    fn num_actions(&self) -> usize {
        self.num_actions
    }
}

impl Vpg {
    fn encode(&self, observations: &[usize]) -> Result<usize> {
        let nstate = self.encoder.encode(observations)?;
        if nstate >= self.obs_dim {
            return Err(AgentError::StateOutOfRange {
                state: nstate,
                size: self.obs_dim,
            }
            .into());
        }
        Ok(nstate)
    }

    fn probs(&self, nstate: usize) -> Result<Vec<f32>> {
        let feature = one_hot(&[nstate], self.obs_dim, &self.device)?;
        Ok(self.policy.probs(&feature)?.squeeze(0)?.to_vec1::<f32>()?)
    }

    /// Takes a gradient step on the buffered epoch.
    fn update(&mut self) -> Result<()> {
        let n = self.buffer.len();
        let returns = self.buffer.rewards_to_go(self.config.gamma);
        let mean_return = returns.iter().map(|&r| r as f64).sum::<f64>() / n as f64;

        let loss = {
            let obs = one_hot(self.buffer.states(), self.obs_dim, &self.device)?;
            let actions = Tensor::from_slice(self.buffer.actions(), (n, 1), &self.device)?;
            let returns = Tensor::from_vec(returns, n, &self.device)?;
            let log_probs = self.policy.log_probs(&obs, &actions)?;
            log_probs.mul(&returns)?.sum_all()?.neg()?
        };
        self.policy.backward_step(&loss)?;

        let loss = loss.to_scalar::<f32>()? as f64;
        if !loss.is_finite() {
            warn!("{} got a non-finite loss at epoch {}", self, self.n_epochs);
        }
        debug!(
            "epoch={}, n_steps={}, loss={}, mean_return={}",
            self.n_epochs, n, loss, mean_return
        );

        self.recorder.write(Record::from_slice(&[
            ("loss", RecordValue::Scalar(loss)),
            ("epoch", RecordValue::Integer(self.n_epochs as i64)),
            ("n_steps", RecordValue::Integer(n as i64)),
            ("mean_return", RecordValue::Scalar(mean_return)),
        ]));

        self.n_epochs += 1;
        Ok(())
    }

    /// Action probabilities of the policy for an observation vector.
    ///
    /// Neither samples an action nor touches the buffer.
    pub fn policy_probs(&self, observations: &[usize]) -> Result<Vec<f32>> {
        let nstate = self.encode(observations)?;
        self.probs(nstate)
    }

    /// Re-initializes the policy network and its optimizer.
    pub fn reset_policy(&mut self) -> Result<()> {
        self.policy.reinit()
    }

    /// Replaces the recorder receiving the update records.
    pub fn with_recorder(mut self, recorder: Box<dyn Recorder>) -> Self {
        self.recorder = recorder;
        self
    }

    /// Replaces the random number generator with one seeded by `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = SmallRng::seed_from_u64(seed);
    }

    /// The recorder receiving the update records.
    pub fn recorder(&self) -> &dyn Recorder {
        self.recorder.as_ref()
    }

    /// Writes the held update records to `<dir>/<agent>_<timestamp>.json`.
    pub fn dump_records(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        self.recorder.dump(dir.as_ref(), &self.to_string())
    }

    /// Number of transitions waiting for the next update.
    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }

    /// The buffered transitions.
    pub fn buffer(&self) -> &RolloutBuffer {
        &self.buffer
    }

    /// Position of the agent within the current epoch.
    pub fn epoch_step(&self) -> usize {
        self.epoch_step
    }

    /// Number of updates since construction or the last reset.
    pub fn n_epochs(&self) -> usize {
        self.n_epochs
    }

    /// Width of the one-hot feature vectors, `symbols * cells`.
    pub fn obs_dim(&self) -> usize {
        self.obs_dim
    }

    /// Configuration the agent was built with.
    pub fn config(&self) -> &VpgConfig {
        &self.config
    }
}

impl fmt::Display for Vpg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VPG({},{})", self.config.steps_per_epoch, self.config.gamma)
    }
}
