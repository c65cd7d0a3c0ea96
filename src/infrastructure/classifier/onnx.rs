//! ONNX model execution via tract

use std::path::Path;

use tract_onnx::prelude::*;
use tracing::{debug, info};

use crate::config::OutputKind;
use crate::domain::{BreedModel, DomainError, InputTensor};

/// A pre-trained classifier loaded from an `.onnx` file
pub struct OnnxBreedModel {
    plan: TypedSimplePlan<TypedModel>,
    input_shape: [usize; 4],
    output_len: usize,
    output: OutputKind,
}

impl std::fmt::Debug for OnnxBreedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxBreedModel")
            .field("input_shape", &self.input_shape)
            .field("output_len", &self.output_len)
            .field("output", &self.output)
            .finish()
    }
}

impl OnnxBreedModel {
    /// Parse, optimise and plan the model for a fixed input shape
    pub fn load(
        path: impl AsRef<Path>,
        input_shape: [usize; 4],
        output: OutputKind,
    ) -> Result<Self, DomainError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DomainError::model_unavailable(format!(
                "Model file '{}' not found",
                path.display()
            )));
        }

        info!(path = %path.display(), shape = ?input_shape, "Loading ONNX model");

        let unavailable = |stage: &str, e: TractError| {
            DomainError::model_unavailable(format!(
                "Failed to {} model '{}': {}",
                stage,
                path.display(),
                e
            ))
        };

        let model = tract_onnx::onnx()
            .model_for_path(path)
            .map_err(|e| unavailable("parse", e))?
            .with_input_fact(0, f32::fact(input_shape).into())
            .map_err(|e| unavailable("configure", e))?
            .into_optimized()
            .map_err(|e| unavailable("optimise", e))?;

        let output_len = model
            .output_fact(0)
            .ok()
            .and_then(|fact| fact.shape.as_concrete().map(|dims| dims.iter().product()))
            .ok_or_else(|| {
                DomainError::model_unavailable(format!(
                    "Model '{}' has no fixed-size output",
                    path.display()
                ))
            })?;

        let plan = model
            .into_runnable()
            .map_err(|e| unavailable("plan", e))?;

        debug!(output_len, "ONNX model ready");

        Ok(Self {
            plan,
            input_shape,
            output_len,
            output,
        })
    }
}

impl BreedModel for OnnxBreedModel {
    fn predict(&self, input: &InputTensor) -> Result<Vec<f32>, DomainError> {
        if input.shape() != self.input_shape {
            return Err(DomainError::inference(format!(
                "Input shape {:?} does not match model shape {:?}",
                input.shape(),
                self.input_shape
            )));
        }

        let tensor = Tensor::from_shape(&input.shape(), input.data())
            .map_err(|e| DomainError::inference(format!("Failed to build input tensor: {}", e)))?;

        let outputs = self
            .plan
            .run(tvec!(tensor.into()))
            .map_err(|e| DomainError::inference(format!("Model run failed: {}", e)))?;

        let first = outputs
            .first()
            .ok_or_else(|| DomainError::inference("Model produced no outputs"))?;

        let scores: Vec<f32> = first
            .to_array_view::<f32>()
            .map_err(|e| DomainError::inference(format!("Output is not f32: {}", e)))?
            .iter()
            .copied()
            .collect();

        Ok(match self.output {
            OutputKind::Probabilities => scores,
            OutputKind::Logits => softmax(&scores),
        })
    }

    fn output_len(&self) -> usize {
        self.output_len
    }
}

/// Numerically stable softmax
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(f32::NEG_INFINITY, f32::max);

    if !max.is_finite() {
        return vec![0.0; logits.len()];
    }

    let exps: Vec<f32> = logits.iter().map(|v| (v - max).exp()).collect();
    let sum: f32 = exps.iter().sum();

    exps.into_iter().map(|v| v / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_softmax_sums_to_one() {
        let probs = softmax(&[1.0, 2.0, 3.0]);

        assert!((probs.iter().sum::<f32>() - 1.0).abs() < 1e-6);
        assert!(probs[2] > probs[1] && probs[1] > probs[0]);
    }

    #[test]
    fn test_softmax_large_logits() {
        let probs = softmax(&[1000.0, 1000.0]);
        assert!((probs[0] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_softmax_empty() {
        assert!(softmax(&[]).is_empty());
    }

    #[test]
    fn test_missing_model_file() {
        let err = OnnxBreedModel::load(
            "/nonexistent/model.onnx",
            [1, 224, 224, 3],
            OutputKind::Probabilities,
        )
        .unwrap_err();

        assert!(matches!(err, DomainError::ModelUnavailable { .. }));
    }

    #[test]
    fn test_corrupt_model_file() {
        let path = std::env::temp_dir().join(format!("model-{}.onnx", uuid::Uuid::new_v4()));
        std::fs::write(&path, b"not a protobuf").unwrap();

        let err = OnnxBreedModel::load(&path, [1, 8, 8, 3], OutputKind::Probabilities).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(matches!(err, DomainError::ModelUnavailable { .. }));
    }
}
