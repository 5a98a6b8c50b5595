//! API handlers for the OMR server

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{debug, info};

use crate::artifact::DOWNLOAD_FILENAME;
use crate::error::ApiError;
use crate::query::GenerateOmrQuery;
use crate::state::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub bangla_font: bool,
}

/// Handler: GET /health
pub async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "omr-server",
        version: env!("CARGO_PKG_VERSION"),
        bangla_font: state.fonts.bangla_available(),
    })
}

/// Handler: GET /generate-omr
pub async fn handle_generate_omr(
    State(state): State<AppState>,
    query: Result<Query<GenerateOmrQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let request = query.into_request().map_err(ApiError::Validation)?;

    info!(
        "Generate request: institute={:?}, questions={}, options={}, bangla={}",
        request.institute_name,
        request.total_questions,
        request.options_per_question,
        request.use_bangla
    );

    let bangla = state.fonts.bangla_font();
    if request.use_bangla && bangla.is_none() {
        debug!("Bengali font not registered, rendering with fallback glyphs");
    }

    let artifact = state.scratch.allocate();
    omr_sheet::generate_pdf(&request, &state.layout, bangla, artifact.path()).await?;
    debug!(path = %artifact.path().display(), "Sheet written");

    let body = artifact.into_body().await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", DOWNLOAD_FILENAME),
            ),
        ],
        body,
    )
        .into_response())
}
