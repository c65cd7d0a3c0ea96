//! PawIdentify
//!
//! Dog breed identification from photos, with a rule-based breed expert:
//! - ONNX image classifier with a confidence threshold
//! - Built-in breed fact sheets with tolerant name matching
//! - Keyword-driven question answering in per-breed chat sessions

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use config::ClassifierConfig;
use domain::{BreedKnowledge, ConfidencePolicy};
use infrastructure::classifier::{BreedClassifier, OnnxModelLoader};
use infrastructure::session::InMemorySessionRepository;
use infrastructure::vision::ImagePreprocessor;
use tracing::info;

/// Build the lazily loading classifier described by the configuration
pub fn create_classifier(config: &ClassifierConfig) -> anyhow::Result<BreedClassifier> {
    let preprocessor = ImagePreprocessor::from_config(config)?;
    let loader = OnnxModelLoader::from_config(config, preprocessor.shape());

    Ok(BreedClassifier::new(
        Arc::new(loader),
        preprocessor,
        config.top_k,
    ))
}

/// Create the application state with all services initialized
pub fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let classifier = Arc::new(create_classifier(&config.classifier)?);
    let policy = ConfidencePolicy::new(config.classifier.confidence_threshold)?;
    let sessions = Arc::new(InMemorySessionRepository::with_config(
        (&config.sessions).into(),
    ));

    info!(
        model = %config.classifier.model_path.display(),
        labels = %config.classifier.labels_path.display(),
        threshold = policy.threshold(),
        "Application state created"
    );

    Ok(AppState::new(
        classifier,
        sessions,
        policy,
        BreedKnowledge::builtin(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::classifier::ClassifierStatus;

    #[test]
    fn test_state_from_default_config() {
        let state = create_app_state_with_config(&AppConfig::default()).unwrap();
        assert_eq!(state.classifier.status(), ClassifierStatus::NotLoaded);
    }

    #[test]
    fn test_rejects_invalid_threshold() {
        let mut config = AppConfig::default();
        config.classifier.confidence_threshold = 150.0;

        assert!(create_app_state_with_config(&config).is_err());
    }

    #[tokio::test]
    async fn test_missing_model_is_unavailable() {
        let mut config = AppConfig::default();
        config.classifier.model_path = "does/not/exist.onnx".into();
        config.classifier.labels_path = "does/not/exist.txt".into();

        let classifier = create_classifier(&config.classifier).unwrap();
        let err = classifier.warm_up().await.unwrap_err();

        assert!(err.is_fatal());
    }
}
