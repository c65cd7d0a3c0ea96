//! Breed classifier - ONNX inference behind a lazily loaded engine

mod engine;
mod loader;
mod onnx;

pub use engine::{BreedClassifier, ClassifierStatus, LoadedClassifier};
pub use loader::{ModelLoader, OnnxModelLoader};
pub use onnx::{softmax, OnnxBreedModel};

#[cfg(test)]
pub(crate) use engine::tests as testing;
