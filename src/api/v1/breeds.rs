//! Breed knowledge endpoints

use axum::extract::{Path, State};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, AskRequest, AskResponse, BreedListResponse, Json};
use crate::infrastructure::services::BreedProfile;

/// GET /v1/breeds
pub async fn list_breeds(State(state): State<AppState>) -> Json<BreedListResponse> {
    Json(BreedListResponse::new(state.knowledge_service.breeds()))
}

/// GET /v1/breeds/{name}
///
/// Never 404s: unknown names resolve to the generic sheet.
pub async fn get_breed(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Json<BreedProfile> {
    Json(state.knowledge_service.profile(&name))
}

/// POST /v1/breeds/{name}/ask
pub async fn ask_breed(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    let (intent, answer) = state
        .knowledge_service
        .ask(&name, &request.question)
        .map_err(|e| ApiError::from(e).with_param("question"))?;
    debug!(breed = %name, intent = ?intent, "Answered breed question");

    Ok(Json(AskResponse {
        breed: name,
        intent,
        answer,
    }))
}
