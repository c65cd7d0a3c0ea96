//! Breed domain - labels, catalog, predictions and the confidence policy

mod catalog;
mod label;
mod model;
mod policy;
mod prediction;

pub use catalog::LabelCatalog;
pub use label::{canonicalize_label, RawLabel};
pub use model::{BreedModel, InputTensor, TensorLayout};
pub use policy::{ConfidencePolicy, Verdict, DEFAULT_CONFIDENCE_THRESHOLD};
pub use prediction::{interpret, rank, Prediction, RankedBreed};

#[cfg(test)]
pub use model::MockBreedModel;
