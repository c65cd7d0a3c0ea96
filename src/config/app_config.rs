use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::{TensorLayout, DEFAULT_CONFIDENCE_THRESHOLD};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub sessions: SessionConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// How pixel values are scaled before inference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PixelScaling {
    /// 0..255, for models with their own rescaling layer
    #[default]
    Raw,
    /// 0..1
    Unit,
    /// -1..1
    Symmetric,
}

impl PixelScaling {
    pub fn apply(&self, value: u8) -> f32 {
        match self {
            Self::Raw => value as f32,
            Self::Unit => value as f32 / 255.0,
            Self::Symmetric => value as f32 / 127.5 - 1.0,
        }
    }
}

/// What the model's output vector holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    #[default]
    Probabilities,
    /// Raw scores that still need a softmax
    Logits,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    /// ONNX model file
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
    /// Newline-delimited label catalog
    #[serde(default = "default_labels_path")]
    pub labels_path: PathBuf,
    /// Square input resolution in pixels
    #[serde(default = "default_input_size")]
    pub input_size: u32,
    #[serde(default)]
    pub layout: TensorLayout,
    #[serde(default)]
    pub scaling: PixelScaling,
    #[serde(default)]
    pub output: OutputKind,
    /// Percentage a prediction must reach to be accepted
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,
    /// Length of the ranking returned with each prediction
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_max_sessions")]
    pub max_capacity: u64,
    /// Sessions not touched for this long are evicted
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
}

impl SessionConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Largest accepted image upload in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_bytes: usize,
}

fn default_model_path() -> PathBuf {
    PathBuf::from("models/final_model.onnx")
}

fn default_labels_path() -> PathBuf {
    PathBuf::from("models/classes.txt")
}

fn default_input_size() -> u32 {
    224
}

fn default_confidence_threshold() -> f32 {
    DEFAULT_CONFIDENCE_THRESHOLD
}

fn default_top_k() -> usize {
    5
}

fn default_max_sessions() -> u64 {
    10_000
}

fn default_idle_timeout_secs() -> u64 {
    3600
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            labels_path: default_labels_path(),
            input_size: default_input_size(),
            layout: TensorLayout::default(),
            scaling: PixelScaling::default(),
            output: OutputKind::default(),
            confidence_threshold: default_confidence_threshold(),
            top_k: default_top_k(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_max_sessions(),
            idle_timeout_secs: default_idle_timeout_secs(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_upload_bytes(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
