//! Loading the model artifact and its label catalog

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use super::onnx::OnnxBreedModel;
use crate::config::{ClassifierConfig, OutputKind};
use crate::domain::{BreedModel, DomainError, LabelCatalog};

/// Produces a ready model together with the catalog describing its outputs.
///
/// Loading is blocking and potentially slow.
pub trait ModelLoader: Send + Sync {
    fn load(&self) -> Result<(Arc<dyn BreedModel>, LabelCatalog), DomainError>;

    /// Human-readable description of where the model comes from
    fn describe(&self) -> String;
}

/// Loads an ONNX model and a newline-delimited catalog from disk
#[derive(Debug, Clone)]
pub struct OnnxModelLoader {
    model_path: PathBuf,
    labels_path: PathBuf,
    input_shape: [usize; 4],
    output: OutputKind,
}

impl OnnxModelLoader {
    pub fn new(
        model_path: impl Into<PathBuf>,
        labels_path: impl Into<PathBuf>,
        input_shape: [usize; 4],
        output: OutputKind,
    ) -> Self {
        Self {
            model_path: model_path.into(),
            labels_path: labels_path.into(),
            input_shape,
            output,
        }
    }

    pub fn from_config(config: &ClassifierConfig, input_shape: [usize; 4]) -> Self {
        Self::new(
            config.model_path.clone(),
            config.labels_path.clone(),
            input_shape,
            config.output,
        )
    }
}

impl ModelLoader for OnnxModelLoader {
    fn load(&self) -> Result<(Arc<dyn BreedModel>, LabelCatalog), DomainError> {
        // Catalog first: it is cheap and its absence makes the model useless
        let catalog = LabelCatalog::load(&self.labels_path)?;
        let model = OnnxBreedModel::load(&self.model_path, self.input_shape, self.output)?;

        catalog.ensure_matches(model.output_len())?;

        info!(
            model = %self.model_path.display(),
            labels = catalog.len(),
            "Breed classifier loaded"
        );

        Ok((Arc::new(model), catalog))
    }

    fn describe(&self) -> String {
        format!(
            "{} ({})",
            self.model_path.display(),
            self.labels_path.display()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_catalog_is_model_unavailable() {
        let loader = OnnxModelLoader::new(
            "/nonexistent/model.onnx",
            "/nonexistent/classes.txt",
            [1, 224, 224, 3],
            OutputKind::Probabilities,
        );

        let err = loader.load().err().unwrap();
        assert!(matches!(err, DomainError::ModelUnavailable { .. }));
        assert!(err.to_string().contains("classes.txt"));
    }

    #[test]
    fn test_missing_model_is_model_unavailable() {
        let labels = std::env::temp_dir().join(format!("classes-{}.txt", uuid::Uuid::new_v4()));
        std::fs::write(&labels, "n02110958-pug\n").unwrap();

        let loader = OnnxModelLoader::new(
            "/nonexistent/model.onnx",
            &labels,
            [1, 224, 224, 3],
            OutputKind::Probabilities,
        );
        let err = loader.load().err().unwrap();
        std::fs::remove_file(&labels).ok();

        assert!(matches!(err, DomainError::ModelUnavailable { .. }));
        assert!(err.to_string().contains("model.onnx"));
    }
}
