//! Analysis service - classify an upload and open a chat on success

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, instrument};

use super::chat_service::ChatService;
use super::knowledge_service::{BreedProfile, KnowledgeService};
use crate::domain::session::Session;
use crate::domain::{ConfidencePolicy, DomainError, Prediction, RankedBreed, Verdict};
use crate::infrastructure::classifier::BreedClassifier;

/// Outcome of analysing one uploaded image
#[derive(Debug, Clone)]
pub enum Analysis {
    Identified {
        prediction: Prediction,
        profile: BreedProfile,
        session: Session,
    },
    LowConfidence {
        best_guess: String,
        confidence: f32,
        top_k: Vec<RankedBreed>,
        threshold: f32,
    },
}

impl Analysis {
    pub fn is_identified(&self) -> bool {
        matches!(self, Self::Identified { .. })
    }

    pub fn verdict_label(&self) -> &'static str {
        match self {
            Self::Identified { .. } => "identified",
            Self::LowConfidence { .. } => "low_confidence",
        }
    }
}

pub struct AnalysisService {
    classifier: Arc<BreedClassifier>,
    policy: ConfidencePolicy,
    chat: Arc<ChatService>,
    knowledge: KnowledgeService,
}

impl AnalysisService {
    pub fn new(
        classifier: Arc<BreedClassifier>,
        policy: ConfidencePolicy,
        chat: Arc<ChatService>,
        knowledge: KnowledgeService,
    ) -> Self {
        Self {
            classifier,
            policy,
            chat,
            knowledge,
        }
    }

    pub fn classifier(&self) -> &Arc<BreedClassifier> {
        &self.classifier
    }

    pub fn policy(&self) -> ConfidencePolicy {
        self.policy
    }

    /// Classify only, returning the policy verdict without opening a session
    pub async fn evaluate(&self, bytes: &[u8]) -> Result<Verdict, DomainError> {
        let prediction = self.classifier.identify(bytes).await?;
        Ok(self.policy.evaluate(prediction))
    }

    #[instrument(skip(self, bytes), fields(bytes = bytes.len()))]
    pub async fn analyze(&self, bytes: &[u8]) -> Result<Analysis, DomainError> {
        let started = Instant::now();

        let analysis = match self.evaluate(bytes).await? {
            Verdict::Accepted(prediction) => {
                let session = self.chat.start(&prediction).await?;
                let profile = self.knowledge.profile(prediction.breed());

                Analysis::Identified {
                    prediction,
                    profile,
                    session,
                }
            }
            Verdict::LowConfidence(prediction) => Analysis::LowConfidence {
                best_guess: prediction.breed().to_string(),
                confidence: prediction.confidence(),
                top_k: prediction.top_k().to_vec(),
                threshold: self.policy.threshold(),
            },
        };

        let (breed, confidence) = match &analysis {
            Analysis::Identified { prediction, .. } => (prediction.breed(), prediction.confidence()),
            Analysis::LowConfidence {
                best_guess,
                confidence,
                ..
            } => (best_guess.as_str(), *confidence),
        };

        info!(
            breed = %breed,
            confidence = confidence,
            verdict = analysis.verdict_label(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Image analysed"
        );

        Ok(analysis)
    }
}

impl std::fmt::Debug for AnalysisService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisService")
            .field("classifier", &self.classifier)
            .field("threshold", &self.policy.threshold())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BreedKnowledge, MatchTier};
    use crate::infrastructure::classifier::testing::{png_bytes, small_preprocessor, FixedLoader};
    use crate::infrastructure::session::InMemorySessionRepository;

    const LABELS: [&str; 3] = ["n02088364-beagle", "n02110958-pug", "n02108915-french_bulldog"];

    fn service(scores: Vec<f32>) -> (AnalysisService, Arc<ChatService>) {
        let loader = FixedLoader::new(LABELS.to_vec(), scores);
        let classifier = Arc::new(BreedClassifier::new(
            Arc::new(loader),
            small_preprocessor(),
            3,
        ));
        let chat = Arc::new(ChatService::new(
            Arc::new(InMemorySessionRepository::new()),
            BreedKnowledge::builtin(),
        ));

        let service = AnalysisService::new(
            classifier,
            ConfidencePolicy::default(),
            Arc::clone(&chat),
            KnowledgeService::default(),
        );
        (service, chat)
    }

    #[tokio::test]
    async fn test_identified_then_chat() {
        let (service, chat) = service(vec![0.2, 0.723, 0.077]);

        let analysis = service.analyze(&png_bytes()).await.unwrap();
        let Analysis::Identified {
            prediction,
            profile,
            session,
        } = analysis
        else {
            panic!("expected identified analysis");
        };

        assert_eq!(prediction.breed(), "Pug");
        assert!((prediction.confidence() - 72.3).abs() < 1e-3);
        assert_eq!(profile.match_tier, MatchTier::Exact);
        assert_eq!(profile.facts.origin, "China");
        assert_eq!(session.turns().len(), 1);

        let reply = chat
            .ask(session.id().as_str(), "How do I groom it?")
            .await
            .unwrap();
        assert_eq!(
            reply.reply,
            "🛁 **Grooming:** Clean face wrinkles daily to prevent infection."
        );
    }

    #[tokio::test]
    async fn test_low_confidence_opens_no_session() {
        let (service, chat) = service(vec![0.35, 0.33, 0.32]);

        let analysis = service.analyze(&png_bytes()).await.unwrap();

        match analysis {
            Analysis::LowConfidence {
                best_guess,
                confidence,
                top_k,
                threshold,
            } => {
                assert_eq!(best_guess, "Beagle");
                assert!((confidence - 35.0).abs() < 1e-3);
                assert_eq!(top_k.len(), 3);
                assert_eq!(threshold, 50.0);
            }
            other => panic!("unexpected analysis: {:?}", other),
        }

        assert_eq!(chat.active_sessions().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_threshold_is_inclusive() {
        let (service, _) = service(vec![0.5, 0.25, 0.25]);

        let analysis = service.analyze(&png_bytes()).await.unwrap();
        assert!(analysis.is_identified());
    }

    #[tokio::test]
    async fn test_invalid_image() {
        let (service, _) = service(vec![0.2, 0.723, 0.077]);

        let err = service.analyze(b"not an image").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidImage { .. }));
    }
}
