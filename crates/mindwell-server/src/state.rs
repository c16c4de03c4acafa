use std::sync::Arc;

use mindwell_llm::orchestrator::ChatOrchestrator;
use mindwell_storage::assessments::AssessmentRepository;
use mindwell_storage::conversations::ConversationRepository;
use mindwell_storage::diaries::MoodDiaryRepository;
use mindwell_storage::users::UserRepository;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub users: UserRepository,
    pub conversations: ConversationRepository,
    pub diaries: MoodDiaryRepository,
    pub assessments: AssessmentRepository,
    pub orchestrator: ChatOrchestrator,
    pub jwt_secret: Arc<String>,
}
