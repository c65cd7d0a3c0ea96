//! Analysis payloads

use serde::Serialize;

use super::session::SessionResponse;
use crate::domain::{Prediction, RankedBreed};
use crate::infrastructure::services::{Analysis, BreedProfile};

#[derive(Debug, Clone, Serialize)]
pub struct PredictionResponse {
    pub breed: String,
    pub label: String,
    pub index: usize,
    pub confidence: f32,
    pub top_k: Vec<RankedBreed>,
}

impl PredictionResponse {
    pub fn from_domain(prediction: &Prediction) -> Self {
        Self {
            breed: prediction.breed().to_string(),
            label: prediction.raw_label().as_str().to_string(),
            index: prediction.index(),
            confidence: prediction.confidence(),
            top_k: prediction.top_k().to_vec(),
        }
    }
}

/// Response of `POST /v1/analyses`
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisResponse {
    Identified {
        prediction: PredictionResponse,
        profile: BreedProfile,
        session: SessionResponse,
    },
    LowConfidence {
        message: String,
        best_guess: String,
        confidence: f32,
        threshold: f32,
        top_k: Vec<RankedBreed>,
    },
}

impl AnalysisResponse {
    pub fn from_domain(analysis: &Analysis) -> Self {
        match analysis {
            Analysis::Identified {
                prediction,
                profile,
                session,
            } => Self::Identified {
                prediction: PredictionResponse::from_domain(prediction),
                profile: profile.clone(),
                session: SessionResponse::from_domain(session),
            },
            Analysis::LowConfidence {
                best_guess,
                confidence,
                top_k,
                threshold,
            } => Self::LowConfidence {
                message: format!(
                    "No dog detected. Analysis confidence {:.1}% is below {:.1}%; \
                     try uploading a clearer photo.",
                    confidence, threshold
                ),
                best_guess: best_guess.clone(),
                confidence: *confidence,
                threshold: *threshold,
                top_k: top_k.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_confidence_format() {
        let analysis = Analysis::LowConfidence {
            best_guess: "Beagle".to_string(),
            confidence: 35.0,
            top_k: Vec::new(),
            threshold: 50.0,
        };

        let json = serde_json::to_value(AnalysisResponse::from_domain(&analysis)).unwrap();

        assert_eq!(json["status"], "low_confidence");
        assert_eq!(json["best_guess"], "Beagle");
        assert_eq!(json["threshold"], 50.0);
        assert!(json["message"].as_str().unwrap().contains("35.0%"));
    }
}
