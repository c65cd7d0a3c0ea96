//! Lazily loaded, process-wide breed classifier

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tokio::sync::OnceCell;
use tracing::{debug, error, info};

use super::loader::ModelLoader;
use crate::domain::{interpret, BreedModel, DomainError, InputTensor, LabelCatalog, Prediction};
use crate::infrastructure::vision::ImagePreprocessor;

/// Model and catalog, loaded once and shared read-only
#[derive(Clone)]
pub struct LoadedClassifier {
    model: Arc<dyn BreedModel>,
    catalog: Arc<LabelCatalog>,
}

impl LoadedClassifier {
    pub fn model(&self) -> &Arc<dyn BreedModel> {
        &self.model
    }

    pub fn catalog(&self) -> &LabelCatalog {
        &self.catalog
    }
}

/// Load state reported by readiness probes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ClassifierStatus {
    NotLoaded,
    Ready { labels: usize },
    Unavailable { message: String },
}

/// Classifier adapter: prepare → classify → interpret.
///
/// The model is loaded on first use. A failed load is remembered and every
/// later call reports the same `ModelUnavailable` error without retrying.
pub struct BreedClassifier {
    loader: Arc<dyn ModelLoader>,
    preprocessor: ImagePreprocessor,
    top_k: usize,
    state: OnceCell<Result<LoadedClassifier, DomainError>>,
}

impl BreedClassifier {
    pub fn new(loader: Arc<dyn ModelLoader>, preprocessor: ImagePreprocessor, top_k: usize) -> Self {
        Self {
            loader,
            preprocessor,
            top_k,
            state: OnceCell::new(),
        }
    }

    pub fn preprocessor(&self) -> &ImagePreprocessor {
        &self.preprocessor
    }

    /// Decode and normalise an uploaded image
    pub fn prepare(&self, bytes: &[u8]) -> Result<InputTensor, DomainError> {
        self.preprocessor.prepare(bytes)
    }

    /// Run the model once, returning one probability per catalog entry
    pub async fn classify(&self, tensor: InputTensor) -> Result<Vec<f32>, DomainError> {
        let loaded = self.loaded().await?;
        let model = Arc::clone(&loaded.model);
        let expected = loaded.catalog.len();

        let start = Instant::now();
        let scores = tokio::task::spawn_blocking(move || model.predict(&tensor))
            .await
            .map_err(|e| DomainError::internal(format!("Inference task failed: {}", e)))??;

        debug!(elapsed_ms = start.elapsed().as_millis() as u64, "Model inference finished");

        if scores.len() != expected {
            return Err(DomainError::inference(format!(
                "Model returned {} scores for {} labels",
                scores.len(),
                expected
            )));
        }

        Ok(scores)
    }

    /// Map a score vector onto the catalog
    pub async fn interpret(&self, scores: &[f32]) -> Result<Prediction, DomainError> {
        let loaded = self.loaded().await?;
        interpret(scores, &loaded.catalog, self.top_k)
    }

    /// Decode and resize on a blocking worker thread
    pub async fn prepare_blocking(&self, bytes: &[u8]) -> Result<InputTensor, DomainError> {
        let preprocessor = self.preprocessor;
        let bytes = bytes.to_vec();

        let start = Instant::now();
        let tensor = tokio::task::spawn_blocking(move || preprocessor.prepare(&bytes))
            .await
            .map_err(|e| DomainError::internal(format!("Preprocessing task failed: {}", e)))??;

        debug!(elapsed_ms = start.elapsed().as_millis() as u64, "Image preprocessed");
        Ok(tensor)
    }

    /// Full pipeline for raw image bytes
    pub async fn identify(&self, bytes: &[u8]) -> Result<Prediction, DomainError> {
        // Surface a missing model before spending time on decoding
        self.loaded().await?;

        let tensor = self.prepare_blocking(bytes).await?;
        let scores = self.classify(tensor).await?;
        self.interpret(&scores).await
    }

    /// Force the model to load now
    pub async fn warm_up(&self) -> Result<(), DomainError> {
        self.loaded().await.map(|_| ())
    }

    pub fn status(&self) -> ClassifierStatus {
        match self.state.get() {
            None => ClassifierStatus::NotLoaded,
            Some(Ok(loaded)) => ClassifierStatus::Ready {
                labels: loaded.catalog.len(),
            },
            Some(Err(e)) => ClassifierStatus::Unavailable {
                message: e.to_string(),
            },
        }
    }

    async fn loaded(&self) -> Result<&LoadedClassifier, DomainError> {
        let state = self
            .state
            .get_or_init(|| async {
                info!(source = %self.loader.describe(), "Loading breed classifier");
                self.load().await
            })
            .await;

        state.as_ref().map_err(|e| e.clone())
    }

    async fn load(&self) -> Result<LoadedClassifier, DomainError> {
        let loader = Arc::clone(&self.loader);
        let result = tokio::task::spawn_blocking(move || loader.load())
            .await
            .map_err(|e| DomainError::model_unavailable(format!("Model load task failed: {}", e)))?;

        match result {
            Ok((model, catalog)) => {
                if let Err(e) = catalog.ensure_matches(model.output_len()) {
                    error!(error = %e, "Breed classifier rejected");
                    return Err(e);
                }

                Ok(LoadedClassifier {
                    model,
                    catalog: Arc::new(catalog),
                })
            }
            Err(e) => {
                error!(error = %e, "Breed classifier failed to load");
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for BreedClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BreedClassifier")
            .field("source", &self.loader.describe())
            .field("preprocessor", &self.preprocessor)
            .field("top_k", &self.top_k)
            .field("status", &self.status())
            .finish()
    }
}
