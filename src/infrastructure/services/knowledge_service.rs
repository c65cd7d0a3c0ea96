//! Knowledge service - breed profiles and stateless questions

use serde::Serialize;
use tracing::debug;

use super::chat_service::validate_question;
use crate::domain::{BreedFactSheet, BreedKnowledge, DomainError, Intent, MatchTier, Responder};

/// Fact sheet resolved for a breed name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreedProfile {
    /// Name as requested
    pub breed: String,
    /// Table key the name resolved to, absent for the default sheet
    pub matched: Option<String>,
    pub match_tier: MatchTier,
    pub facts: BreedFactSheet,
}

/// Read-only access to the breed knowledge table
#[derive(Debug, Clone, Copy)]
pub struct KnowledgeService {
    knowledge: &'static BreedKnowledge,
}

impl KnowledgeService {
    pub fn new(knowledge: &'static BreedKnowledge) -> Self {
        Self { knowledge }
    }

    pub fn knowledge(&self) -> &'static BreedKnowledge {
        self.knowledge
    }

    pub fn responder(&self) -> Responder<'static> {
        Responder::new(self.knowledge)
    }

    /// Breeds with a dedicated fact sheet
    pub fn breeds(&self) -> Vec<String> {
        self.knowledge.breeds().map(str::to_string).collect()
    }

    pub fn profile(&self, breed: &str) -> BreedProfile {
        let lookup = self.knowledge.lookup(breed);

        debug!(breed = %breed, tier = ?lookup.tier, "Resolved breed profile");

        BreedProfile {
            breed: breed.to_string(),
            matched: lookup.key.map(str::to_string),
            match_tier: lookup.tier,
            facts: lookup.sheet.clone(),
        }
    }

    /// Answer a single question without a session
    pub fn ask(&self, breed: &str, question: &str) -> Result<(Intent, String), DomainError> {
        let question = validate_question(question)?;
        let responder = self.responder();

        Ok((responder.intent_of(question), responder.respond(breed, question)))
    }
}

impl Default for KnowledgeService {
    fn default() -> Self {
        Self::new(BreedKnowledge::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_exact() {
        let profile = KnowledgeService::default().profile("Golden Retriever");

        assert_eq!(profile.match_tier, MatchTier::Exact);
        assert_eq!(profile.matched.as_deref(), Some("Golden Retriever"));
        assert_eq!(profile.facts.origin, "Scotland");
    }

    #[test]
    fn test_profile_unknown() {
        let profile = KnowledgeService::default().profile("Martian Hound");

        assert_eq!(profile.match_tier, MatchTier::Default);
        assert!(profile.matched.is_none());
        assert_eq!(profile.facts, BreedFactSheet::unknown_breed());
    }

    #[test]
    fn test_ask() {
        let (intent, answer) = KnowledgeService::default()
            .ask("Pug", "Is it ok in hot weather?")
            .unwrap();

        assert_eq!(intent, Intent::Climate);
        assert_eq!(
            answer,
            "☀️ **Climate Preference:** Very sensitive to heat (Brachycephalic). Keep cool!"
        );
    }

    #[test]
    fn test_ask_rejects_blank_question() {
        let err = KnowledgeService::default().ask("Pug", " \n ").unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[test]
    fn test_breeds_listed_in_table_order() {
        let breeds = KnowledgeService::default().breeds();

        assert_eq!(breeds.len(), 15);
        assert_eq!(breeds.first().map(String::as_str), Some("Siberian Husky"));
        assert_eq!(breeds.last().map(String::as_str), Some("Poodle"));
    }
}
