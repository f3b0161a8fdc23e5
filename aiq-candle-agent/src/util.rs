//! Utilities.
use anyhow::Result;
use candle_core::{Device, Tensor};

/// Returns a `(indices.len(), width)` matrix whose rows are one-hot vectors.
///
/// Every index must be smaller than `width`.
pub fn one_hot(indices: &[usize], width: usize, device: &Device) -> Result<Tensor> {
    let mut data = vec![0f32; indices.len() * width];
    for (row, &ix) in indices.iter().enumerate() {
        data[row * width + ix] = 1.0;
    }
    Ok(Tensor::from_vec(data, (indices.len(), width), device)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_hot() -> Result<()> {
        let t = one_hot(&[2, 0], 3, &Device::Cpu)?;
        assert_eq!(
            t.to_vec2::<f32>()?,
            vec![vec![0.0, 0.0, 1.0], vec![1.0, 0.0, 0.0]]
        );
        Ok(())
    }
}
