use serde::{Deserialize, Serialize};

/// Descriptive attributes for one breed.
///
/// Every field is required so the responder can never ask for a missing value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreedFactSheet {
    pub origin: String,
    pub life_span: String,
    pub group: String,
    pub height: String,
    pub diet: String,
    pub climate: String,
    pub grooming: String,
    pub training: String,
    pub bio: String,
}

impl BreedFactSheet {
    /// Sheet used when a breed has no entry of its own
    pub fn unknown_breed() -> Self {
        Self {
            origin: "International".into(),
            life_span: "10-13 years".into(),
            group: "Mixed / Unknown".into(),
            height: "Varies".into(),
            diet: "Standard balanced dog food appropriate for size.".into(),
            climate: "Moderate temperatures.".into(),
            grooming: "Regular brushing recommended.".into(),
            training: "Positive reinforcement.".into(),
            bio: "A loyal canine companion identified by our AI. While we don't have specific \
                  history for this breed in our quick-access database, they are likely a \
                  wonderful pet!"
                .into(),
        }
    }
}

impl Default for BreedFactSheet {
    fn default() -> Self {
        Self::unknown_breed()
    }
}
