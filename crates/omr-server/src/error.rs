//! Error types for the OMR server

use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use omr_sheet::{SheetError, ValidationErrors};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    Validation(ValidationErrors),

    #[error("Malformed query string: {0}")]
    MalformedQuery(#[from] QueryRejection),

    #[error("Render failed: {0}")]
    Render(SheetError),

    #[error("Failed to stream sheet: {0}")]
    Stream(#[from] std::io::Error),
}

impl From<SheetError> for ApiError {
    fn from(err: SheetError) -> Self {
        match err {
            SheetError::Validation(errors) => ApiError::Validation(errors),
            other => ApiError::Render(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                let detail: Vec<_> = errors
                    .0
                    .iter()
                    .map(|e| {
                        json!({
                            "loc": ["query", e.field],
                            "msg": e.message,
                            "type": e.kind.code(),
                        })
                    })
                    .collect();
                unprocessable(detail)
            }
            ApiError::MalformedQuery(rejection) => {
                tracing::debug!("Rejected query string: {}", rejection.body_text());
                unprocessable(vec![json!({
                    "loc": ["query"],
                    "msg": "Query string could not be parsed",
                    "type": "query_parse_error",
                })])
            }
            ApiError::Render(e) => {
                tracing::error!("PDF generation failed: {}", e);
                generation_failed()
            }
            ApiError::Stream(e) => {
                tracing::error!("Failed to open generated sheet: {}", e);
                generation_failed()
            }
        }
    }
}

fn unprocessable(detail: Vec<serde_json::Value>) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "detail": detail })),
    )
        .into_response()
}

fn generation_failed() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "detail": "PDF generation failed" })),
    )
        .into_response()
}
