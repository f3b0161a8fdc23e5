//! Sarsa(λ) agent.
use super::{ActionSelection, SarsaLambdaConfig, ValueTable};
use aiq_core::{
    record::{Record, RecordValue, Recorder},
    Agent, AgentError, Configurable, ObservationEncoder, Refm,
};
use anyhow::Result;
use log::{info, trace, warn};
use ndarray::{Array1, Array2};
use rand::{rngs::SmallRng, SeedableRng};
use std::{
    fmt,
    path::{Path, PathBuf},
};

/// Sarsa(λ) agent with accumulating eligibility traces, after Sutton and Barto.
///
/// At every step the TD error of the previous state-action pair is credited to all
/// state-action pairs through their eligibility traces. The agent flags a soft divergence
/// once any Q-value leaves `[-limit, limit]` with `limit = 100 * (1 + lambda) / (1 - gamma)`.
pub struct SarsaLambda {
    config: SarsaLambdaConfig,
    gamma: f64,
    divergence_limit: f64,
    num_actions: usize,
    encoder: ObservationEncoder,
    selection: ActionSelection,
    table: ValueTable,
    state: usize,
    action: usize,
    diverged: bool,
    recorder: Box<dyn Recorder>,
    rng: SmallRng,
}

impl Configurable for SarsaLambda {
    type Config = SarsaLambdaConfig;

    /// Constructs Sarsa(λ) agent.
    ///
    /// Fails before allocating any table if the internal discount rate is not below 1.
    fn build<M: Refm>(refm: &M, disc_rate: f64, config: Self::Config) -> Result<Self> {
        let gamma = config.effective_gamma(disc_rate);
        if gamma >= 1.0 {
            return Err(AgentError::InvalidConfiguration(format!(
                "Sarsa_l can only handle an internal discount rate below 1.0, got {}",
                gamma
            ))
            .into());
        }

        let num_states = refm.num_observations();
        let num_actions = refm.num_actions();
        if num_states == 0 || num_actions == 0 {
            return Err(AgentError::InvalidConfiguration(format!(
                "empty state-action space: {} states, {} actions",
                num_states, num_actions
            ))
            .into());
        }

        let encoder = ObservationEncoder::from_refm(refm, config.encoding)?;
        let divergence_limit = 100.0 * (1.0 + config.lambda) / (1.0 - gamma);

        let agent = Self {
            gamma,
            divergence_limit,
            num_actions,
            encoder,
            selection: config.action_selection,
            table: ValueTable::new(num_states, num_actions, config.init_q),
            state: 0,
            action: 0,
            diverged: false,
            recorder: config.record_policy.build(),
            rng: SmallRng::seed_from_u64(config.seed),
            config,
        };
        info!(
            "Build {} with {} states and {} actions",
            agent, num_states, num_actions
        );

        Ok(agent)
    }
}

impl Agent for SarsaLambda {
    fn perceive(&mut self, observations: &[usize], reward: f64) -> Result<usize> {
        let nstate = self.encoder.encode(observations)?;
        if nstate >= self.table.num_states() {
            return Err(AgentError::StateOutOfRange {
                state: nstate,
                size: self.table.num_states(),
            }
            .into());
        }

        let naction = self
            .selection
            .action(self.table.q_row(nstate), self.config.epsilon, &mut self.rng);

        let (state, action) = (self.state, self.action);
        let delta =
            reward + self.gamma * self.table.q(nstate, naction) - self.table.q(state, action);
        trace!(
            "state={}, action={}, reward={}, nstate={}, naction={}, delta={}",
            state,
            action,
            reward,
            nstate,
            naction,
            delta
        );

        self.recorder.write(Record::from_slice(&[
            ("Q_value", RecordValue::Scalar(self.table.q(state, action))),
            ("E_trace", RecordValue::Scalar(self.table.trace(state, action))),
            ("state", RecordValue::Integer(state as i64)),
            ("action", RecordValue::Integer(action as i64)),
        ]));

        let exceeded = self.table.sweep(
            state,
            action,
            self.config.alpha,
            delta,
            self.gamma * self.config.lambda,
            self.divergence_limit,
        );
        if exceeded && !self.diverged {
            warn!(
                "{} diverged: a Q-value exceeds the limit {}",
                self, self.divergence_limit
            );
            self.diverged = true;
        }

        self.table.visit(nstate);
        self.state = nstate;
        self.action = naction;

        Ok(naction)
    }

    fn reset(&mut self) {
        self.state = 0;
        self.action = 0;
        self.diverged = false;
        self.table.reset();
        self.recorder.clear();
    }

    fn num_actions(&self) -> usize {
        self.num_actions
    }
}

impl SarsaLambda {
    /// Replaces the recorder receiving the per-step snapshots.
    pub fn with_recorder(mut self, recorder: Box<dyn Recorder>) -> Self {
        self.recorder = recorder;
        self
    }

    /// Replaces the random number generator with one seeded by `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = SmallRng::seed_from_u64(seed);
    }

    /// The recorder receiving the per-step snapshots.
    pub fn recorder(&self) -> &dyn Recorder {
        self.recorder.as_ref()
    }

    /// Writes the held snapshots to `<dir>/<agent>_<timestamp>.json`, `<agent>` being the
    /// [`Display`](fmt::Display) of the agent.
    pub fn dump_records(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        self.recorder.dump(dir.as_ref(), &self.to_string())
    }

    /// The Q-table.
    pub fn q_values(&self) -> &Array2<f64> {
        self.table.q_values()
    }

    /// The eligibility-trace table.
    pub fn eligibility_traces(&self) -> &Array2<f64> {
        self.table.traces()
    }

    /// Per-state visit counts, incremented for the new state of every step.
    ///
    /// The counts are not used by the update rule.
    pub fn visits(&self) -> &Array1<u64> {
        self.table.visits()
    }

    /// All tables of the agent.
    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    /// Returns `true` once any Q-value has exceeded the divergence limit since the last reset.
    pub fn is_diverged(&self) -> bool {
        self.diverged
    }

    /// Bound on the magnitude of Q-values, `100 * (1 + lambda) / (1 - gamma)`.
    pub fn divergence_limit(&self) -> f64 {
        self.divergence_limit
    }

    /// State and action of the previous step.
    pub fn state_action(&self) -> (usize, usize) {
        (self.state, self.action)
    }

    /// Internal discount rate.
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Configuration the agent was built with.
    pub fn config(&self) -> &SarsaLambdaConfig {
        &self.config
    }
}

impl fmt::Display for SarsaLambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sarsa_l({},{},{},{},{})",
            self.config.init_q, self.config.lambda, self.config.alpha, self.config.epsilon, self.gamma
        )
    }
}
