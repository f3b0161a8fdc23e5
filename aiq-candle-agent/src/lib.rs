//! RL agents implemented with [candle](https://crates.io/crates/candle-core).
//!
//! [`vpg::Vpg`] is an episodic Vanilla Policy Gradient agent: transitions are buffered for
//! a fixed number of steps, then a single gradient step is taken on the buffered epoch using
//! discounted rewards-to-go.
pub mod mlp;
pub mod model;
pub mod opt;
pub mod util;
pub mod vpg;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Copy, Deserialize, Serialize, PartialEq, Default)]
/// Device for using candle.
///
/// This enum is added because [`candle_core::Device`] does not support serialization.
pub enum Device {
    /// The main CPU device.
    #[default]
    Cpu,

    /// The GPU device with the given ordinal.
    Cuda(usize),
}

impl TryFrom<Device> for candle_core::Device {
    type Error = candle_core::Error;

    fn try_from(device: Device) -> Result<Self, Self::Error> {
        match device {
            Device::Cpu => Ok(candle_core::Device::Cpu),
            Device::Cuda(n) => candle_core::Device::new_cuda(n),
        }
    }
}
