//! Infrastructure layer - Model inference, image handling and storage

pub mod classifier;
pub mod logging;
pub mod services;
pub mod session;
pub mod vision;
