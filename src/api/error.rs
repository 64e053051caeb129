use crate::services::conversion::ConversionError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

pub const MISSING_FILE_MESSAGE: &str = "No file uploaded";
pub const PROCESSING_FAILED_MESSAGE: &str = "Failed to process PDF";
pub const TOO_LARGE_MESSAGE: &str = "Upload exceeds size limit";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No file uploaded")]
    MissingFile,

    #[error("Payload Too Large")]
    PayloadTooLarge,

    #[error("Conversion failed: {0}")]
    Conversion(#[from] ConversionError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::MissingFile => (StatusCode::BAD_REQUEST, MISSING_FILE_MESSAGE),
            AppError::PayloadTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, TOO_LARGE_MESSAGE),
            AppError::Conversion(e) => {
                tracing::error!("Error processing PDF: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, PROCESSING_FAILED_MESSAGE)
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
