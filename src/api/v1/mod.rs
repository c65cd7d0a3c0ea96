//! Versioned API endpoints

pub mod analyses;
pub mod breeds;
pub mod sessions;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/analyses", post(analyses::create_analysis))
        .route(
            "/sessions/{session_id}",
            get(sessions::get_session).delete(sessions::delete_session),
        )
        .route("/sessions/{session_id}/messages", post(sessions::send_message))
        .route("/breeds", get(breeds::list_breeds))
        .route("/breeds/{name}", get(breeds::get_breed))
        .route("/breeds/{name}/ask", post(breeds::ask_breed))
}
