use crate::AppState;
use crate::api::error::AppError;
use axum::{
    Json,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
};
use bytes::Bytes;
use serde::Serialize;
use utoipa::ToSchema;

/// Name of the multipart field carrying the PDF
pub const FILE_FIELD: &str = "file";

const PREVIEW_CHARS: usize = 500;

#[derive(Serialize, ToSchema)]
pub struct ConvertResponse {
    pub text: String,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Multipart form accepted by `/pdf-to-text`
#[derive(ToSchema)]
pub struct PdfUpload {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

#[utoipa::path(
    post,
    path = "/pdf-to-text",
    request_body(content = PdfUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Text extracted", body = ConvertResponse),
        (status = 400, description = "No file uploaded", body = ErrorResponse),
        (status = 413, description = "Upload exceeds the configured body limit", body = ErrorResponse),
        (status = 500, description = "Failed to process PDF", body = ErrorResponse)
    ),
    tag = "convert"
)]
pub async fn pdf_to_text(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ConvertResponse>, AppError> {
    let multipart = multipart.map_err(|e| {
        tracing::warn!("Rejected upload without a readable multipart body: {}", e);
        AppError::MissingFile
    })?;

    let upload = read_file_field(multipart).await?;

    let text = state.converter.convert(&upload).await?;

    tracing::info!(
        "PDF parsed successfully, extracted text length: {}",
        text.chars().count()
    );
    tracing::debug!(
        "First {} characters: {}",
        PREVIEW_CHARS,
        text.chars().take(PREVIEW_CHARS).collect::<String>()
    );

    Ok(Json(ConvertResponse { text }))
}

/// Pulls the bytes of the `file` field out of the form, draining any other
/// fields. A `file` field without a filename is a plain form value, not an
/// upload, and is drained like the rest. A body that breaks mid-stream counts as no upload, except when it
/// was cut off by the configured body limit.
async fn read_file_field(mut multipart: Multipart) -> Result<Bytes, AppError> {
    let mut upload = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("Failed to read form field: {}", e);
                if limit_exceeded(&e) {
                    return Err(AppError::PayloadTooLarge);
                }
                break;
            }
        };

        let is_upload = field.name() == Some(FILE_FIELD) && field.file_name().is_some();

        if is_upload && upload.is_none() {
            let filename = field.file_name().unwrap_or_default().to_string();
            match field.bytes().await {
                Ok(bytes) => {
                    tracing::info!("Received upload '{}' ({} bytes)", filename, bytes.len());
                    upload = Some(bytes);
                }
                Err(e) => {
                    tracing::warn!("Failed to read file data for '{}': {}", filename, e);
                    if limit_exceeded(&e) {
                        return Err(AppError::PayloadTooLarge);
                    }
                    break;
                }
            }
        } else if let Err(e) = field.bytes().await {
            if limit_exceeded(&e) {
                return Err(AppError::PayloadTooLarge);
            }
        }
    }

    upload.ok_or(AppError::MissingFile)
}

fn limit_exceeded(e: &MultipartError) -> bool {
    e.status() == StatusCode::PAYLOAD_TOO_LARGE
}
