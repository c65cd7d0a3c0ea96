//! Breed knowledge payloads

use serde::{Deserialize, Serialize};

use crate::domain::Intent;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreedListResponse {
    pub object: String,
    pub data: Vec<String>,
}

impl BreedListResponse {
    pub fn new(data: Vec<String>) -> Self {
        Self {
            object: "list".to_string(),
            data,
        }
    }
}

/// Body of `POST /v1/breeds/{name}/ask`
#[derive(Debug, Clone, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AskResponse {
    pub breed: String,
    pub intent: Intent,
    pub answer: String,
}
