//! Confidence policy - accept or reject a prediction

use serde::{Deserialize, Serialize};

use super::prediction::Prediction;
use crate::domain::DomainError;

/// Percentage a prediction must reach to be accepted
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 50.0;

/// Outcome of applying the confidence policy
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Confident enough to show the breed profile and open a chat
    Accepted(Prediction),
    /// Prediction succeeded but fell under the threshold
    LowConfidence(Prediction),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    pub fn prediction(&self) -> &Prediction {
        match self {
            Self::Accepted(prediction) | Self::LowConfidence(prediction) => prediction,
        }
    }
}

/// Fixed acceptance threshold, inclusive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidencePolicy {
    threshold: f32,
}

impl ConfidencePolicy {
    pub fn new(threshold: f32) -> Result<Self, DomainError> {
        if !(0.0..=100.0).contains(&threshold) {
            return Err(DomainError::configuration(format!(
                "Confidence threshold {} must be between 0 and 100",
                threshold
            )));
        }

        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn evaluate(&self, prediction: Prediction) -> Verdict {
        if prediction.confidence() >= self.threshold {
            Verdict::Accepted(prediction)
        } else {
            Verdict::LowConfidence(prediction)
        }
    }
}

impl Default for ConfidencePolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::breed::RawLabel;

    fn prediction(confidence: f32) -> Prediction {
        Prediction::new("Pug", RawLabel::new("n02110958-pug"), 0, confidence)
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        let policy = ConfidencePolicy::default();

        assert!(!policy.evaluate(prediction(49.999)).is_accepted());
        assert!(policy.evaluate(prediction(50.0)).is_accepted());
        assert!(policy.evaluate(prediction(50.001)).is_accepted());
    }

    #[test]
    fn test_low_confidence_keeps_best_guess() {
        let verdict = ConfidencePolicy::default().evaluate(prediction(12.5));

        assert!(matches!(verdict, Verdict::LowConfidence(_)));
        assert_eq!(verdict.prediction().breed(), "Pug");
        assert_eq!(verdict.prediction().confidence(), 12.5);
    }

    #[test]
    fn test_custom_threshold() {
        let policy = ConfidencePolicy::new(80.0).unwrap();
        assert!(!policy.evaluate(prediction(72.3)).is_accepted());
    }

    #[test]
    fn test_invalid_threshold() {
        assert!(ConfidencePolicy::new(150.0).is_err());
        assert!(ConfidencePolicy::new(-1.0).is_err());
        assert!(ConfidencePolicy::new(f32::NAN).is_err());
    }
}
