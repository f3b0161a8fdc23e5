use crate::{
    model::SubModel1,
    opt::{Optimizer, OptimizerConfig},
};
use anyhow::Result;
use candle_core::{DType, Device, Tensor, D};
use candle_nn::{
    ops::{log_softmax, softmax},
    VarBuilder, VarMap,
};
use log::info;

/// Policy network of a policy-gradient agent together with its parameters and optimizer.
///
/// The network `P` maps a batch of feature vectors to a batch of action logits.
pub struct PolicyModel<P>
where
    P: SubModel1<Input = Tensor, Output = Tensor>,
{
    device: Device,
    varmap: VarMap,
    policy: P,
    policy_config: P::Config,
    opt_config: OptimizerConfig,
    opt: Optimizer,
}

impl<P> PolicyModel<P>
where
    P: SubModel1<Input = Tensor, Output = Tensor>,
{
    /// Constructs [`PolicyModel`] with freshly initialized parameters.
    pub fn build(policy_config: P::Config, opt_config: OptimizerConfig, device: Device) -> Result<Self> {
        let varmap = VarMap::new();
        let policy = {
            let vb = VarBuilder::from_varmap(&varmap, DType::F32, &device);
            P::build(vb, policy_config.clone())?
        };
        let opt = opt_config.build(varmap.all_vars())?;
        info!("Build policy model with {} variables", varmap.all_vars().len());

        Ok(Self {
            device,
            varmap,
            policy,
            policy_config,
            opt_config,
            opt,
        })
    }

    /// Action logits for a batch of feature vectors.
    pub fn forward(&self, xs: &Tensor) -> Result<Tensor> {
        self.policy.forward(xs)
    }

    /// Action probabilities for a batch of feature vectors.
    pub fn probs(&self, xs: &Tensor) -> Result<Tensor> {
        Ok(softmax(&self.forward(xs)?, D::Minus1)?)
    }

    /// Log-probabilities of the given actions, one per row of `xs`.
    ///
    /// `actions` is a `u32` tensor of shape `(batch_size, 1)`.
    pub fn log_probs(&self, xs: &Tensor, actions: &Tensor) -> Result<Tensor> {
        let log_probs = log_softmax(&self.forward(xs)?, D::Minus1)?;
        Ok(log_probs.gather(actions, D::Minus1)?.squeeze(D::Minus1)?)
    }

    /// Takes one optimization step minimizing `loss`.
    pub fn backward_step(&mut self, loss: &Tensor) -> Result<()> {
        self.opt.backward_step(loss)
    }

    /// Re-initializes the parameters and the state of the optimizer.
    pub fn reinit(&mut self) -> Result<()> {
        *self = Self::build(
            self.policy_config.clone(),
            self.opt_config.clone(),
            self.device.clone(),
        )?;
        Ok(())
    }

    /// The device the model lives on.
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Variables of the model.
    pub fn varmap(&self) -> &VarMap {
        &self.varmap
    }
}
