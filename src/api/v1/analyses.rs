//! Image analysis endpoint

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{AnalysisResponse, ApiError, Json};

/// Multipart field carrying the photo
pub const IMAGE_FIELD: &str = "image";

/// POST /v1/analyses
pub async fn create_analysis(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<AnalysisResponse>), ApiError> {
    let mut image = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(IMAGE_FIELD) {
            debug!(field = ?field.name(), "Skipping multipart field");
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;

        debug!(file_name = ?file_name, bytes = bytes.len(), "Received image upload");
        image = Some(bytes);
        break;
    }

    let image = image.ok_or_else(|| {
        ApiError::bad_request(format!("Missing multipart field '{}'", IMAGE_FIELD))
            .with_param(IMAGE_FIELD)
    })?;

    let analysis = state.analysis_service.analyze(&image).await?;
    let status = if analysis.is_identified() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(AnalysisResponse::from_domain(&analysis))))
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::payload_too_large(err.body_text()).with_param(IMAGE_FIELD)
    } else {
        ApiError::bad_request(format!("Failed to read multipart body: {}", err.body_text()))
    }
}
