use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum AppError {
    #[error("Search failed: {0}")]
    SearchError(String),

    #[error("Invalid input: {0}")]
    ValidationError(String),

    #[error("Invalid tool record: {0}")]
    InvalidRecord(String),

    #[error("Catalog error: {0}")]
    CatalogError(String),

    #[error("Service temporarily unavailable: {0}")]
    ResourceError(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: u16,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::SearchError(e) => {
                tracing::error!(error = %e, "Search execution error");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::ValidationError(msg) => {
                tracing::warn!(error = %msg, "Validation error");
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::InvalidRecord(msg) => {
                tracing::error!(error = %msg, "Invalid record reached the relevance engine");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::CatalogError(msg) => {
                tracing::error!(error = %msg, "Catalog error");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::ResourceError(msg) => {
                tracing::warn!(error = %msg, "Resource error");
                (StatusCode::SERVICE_UNAVAILABLE, msg.clone())
            }
        };

        let body = Json(ErrorResponse {
            error: message,
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
