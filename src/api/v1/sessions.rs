//! Chat session endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::debug;

use crate::api::middleware::truncate_for_log;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, MessageResponse, SendMessageRequest, SessionResponse};

/// GET /v1/sessions/{session_id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state.chat_service.get(&session_id).await?;
    Ok(Json(SessionResponse::from_domain(&session)))
}

/// POST /v1/sessions/{session_id}/messages
pub async fn send_message(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    debug!(
        session_id = %session_id,
        content = %truncate_for_log(&request.content, 80),
        "Received chat message"
    );

    let reply = state.chat_service.ask(&session_id, &request.content).await?;
    Ok(Json(MessageResponse::from_domain(&reply)))
}

/// DELETE /v1/sessions/{session_id}
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.chat_service.reset(&session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
