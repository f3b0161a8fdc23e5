//! Optimizers of policy networks.
use anyhow::Result;
use candle_core::{Tensor, Var};
use candle_nn::{AdamW, Optimizer as _, ParamsAdamW};
use candle_optimisers::{
    adam::{Adam, ParamsAdam},
    Decay,
};
use serde::{Deserialize, Serialize};

/// Optimizer configuration, deserialized from the `opt_config` field of an agent config.
///
/// ```yaml
/// opt_config:
///   Adam:
///     lr: 0.001
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub enum OptimizerConfig {
    /// Adam, optionally with L2 weight decay added to the gradients.
    Adam {
        /// Learning rate.
        lr: f64,
        /// Coefficient of the L2 penalty.
        #[serde(default)]
        weight_decay: Option<f64>,
    },

    /// Adam with decoupled weight decay.
    AdamW {
        /// Learning rate.
        lr: f64,
        /// Coefficient of the decoupled weight decay.
        #[serde(default = "default_adamw_decay")]
        weight_decay: f64,
    },
}

fn default_adamw_decay() -> f64 {
    ParamsAdamW::default().weight_decay
}

impl Default for OptimizerConfig {
    /// Adam with learning rate `1e-3` and no weight decay.
    fn default() -> Self {
        Self::Adam {
            lr: ParamsAdam::default().lr,
            weight_decay: None,
        }
    }
}

impl OptimizerConfig {
    /// Learning rate.
    pub fn lr(&self) -> f64 {
        match self {
            Self::Adam { lr, .. } | Self::AdamW { lr, .. } => *lr,
        }
    }

    /// Returns the configuration with the learning rate replaced.
    pub fn with_lr(mut self, v: f64) -> Self {
        match &mut self {
            Self::Adam { lr, .. } | Self::AdamW { lr, .. } => *lr = v,
        }
        self
    }

    /// Constructs an optimizer over `vars`.
    pub fn build(&self, vars: Vec<Var>) -> Result<Optimizer> {
        let opt = match *self {
            Self::Adam { lr, weight_decay } => {
                let params = ParamsAdam {
                    lr,
                    weight_decay: weight_decay.map(Decay::WeightDecay),
                    ..ParamsAdam::default()
                };
                Optimizer::Adam(Adam::new(vars, params)?)
            }
            Self::AdamW { lr, weight_decay } => {
                let params = ParamsAdamW {
                    lr,
                    weight_decay,
                    ..ParamsAdamW::default()
                };
                Optimizer::AdamW(AdamW::new(vars, params)?)
            }
        };
        Ok(opt)
    }
}

/// Optimizer built from [`OptimizerConfig`].
pub enum Optimizer {
    /// Adam from `candle-optimisers`.
    Adam(Adam),

    /// AdamW from `candle-nn`.
    AdamW(AdamW),
}

impl Optimizer {
    /// Computes gradients of `loss` and updates the variables to decrease it.
    pub fn backward_step(&mut self, loss: &Tensor) -> Result<()> {
        match self {
            Self::Adam(opt) => opt.backward_step(loss)?,
            Self::AdamW(opt) => opt.backward_step(loss)?,
        }
        Ok(())
    }
}
