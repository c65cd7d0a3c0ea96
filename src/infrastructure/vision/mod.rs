//! Image decoding and preprocessing

mod preprocess;

pub use preprocess::{decode, ImagePreprocessor};
