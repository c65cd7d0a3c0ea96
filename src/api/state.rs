//! Application state shared by all handlers

use std::sync::Arc;

use crate::domain::session::SessionRepository;
use crate::domain::{BreedKnowledge, ConfidencePolicy};
use crate::infrastructure::classifier::BreedClassifier;
use crate::infrastructure::services::{AnalysisService, ChatService, KnowledgeService};

#[derive(Clone)]
pub struct AppState {
    pub analysis_service: Arc<AnalysisService>,
    pub chat_service: Arc<ChatService>,
    pub knowledge_service: KnowledgeService,
    pub classifier: Arc<BreedClassifier>,
}

impl AppState {
    /// Wire the services around a classifier and a session store
    pub fn new(
        classifier: Arc<BreedClassifier>,
        sessions: Arc<dyn SessionRepository>,
        policy: ConfidencePolicy,
        knowledge: &'static BreedKnowledge,
    ) -> Self {
        let knowledge_service = KnowledgeService::new(knowledge);
        let chat_service = Arc::new(ChatService::new(sessions, knowledge));
        let analysis_service = Arc::new(AnalysisService::new(
            Arc::clone(&classifier),
            policy,
            Arc::clone(&chat_service),
            knowledge_service,
        ));

        Self {
            analysis_service,
            chat_service,
            knowledge_service,
            classifier,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("classifier", &self.classifier)
            .field("chat_service", &self.chat_service)
            .finish()
    }
}
