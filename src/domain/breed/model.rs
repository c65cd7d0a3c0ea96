//! Classifier model abstraction

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Memory layout of the model's image input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TensorLayout {
    /// `[batch, height, width, channels]`
    #[default]
    Nhwc,
    /// `[batch, channels, height, width]`
    Nchw,
}

/// A single-image float batch ready for inference
#[derive(Debug, Clone, PartialEq)]
pub struct InputTensor {
    shape: [usize; 4],
    layout: TensorLayout,
    data: Vec<f32>,
}

impl InputTensor {
    /// Build a tensor, checking that `data` fills `shape` exactly
    pub fn new(shape: [usize; 4], layout: TensorLayout, data: Vec<f32>) -> Result<Self, DomainError> {
        let expected: usize = shape.iter().product();

        if data.len() != expected {
            return Err(DomainError::internal(format!(
                "Tensor data has {} values but shape {:?} needs {}",
                data.len(),
                shape,
                expected
            )));
        }

        Ok(Self {
            shape,
            layout,
            data,
        })
    }

    pub fn shape(&self) -> [usize; 4] {
        self.shape
    }

    pub fn layout(&self) -> TensorLayout {
        self.layout
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn into_data(self) -> Vec<f32> {
        self.data
    }
}

/// A loaded, ready-to-run image classifier.
///
/// Implementations are blocking; callers run them off the async runtime.
#[cfg_attr(test, automock)]
pub trait BreedModel: Send + Sync {
    /// Run the model once and return one probability per output class
    fn predict(&self, input: &InputTensor) -> Result<Vec<f32>, DomainError>;

    /// Number of scores `predict` returns
    fn output_len(&self) -> usize;
}
