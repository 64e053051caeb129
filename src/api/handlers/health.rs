use crate::AppState;
use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;
use std::path::Path;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub scratch_dir: String,
    pub scratch_writable: bool,
    pub extractor: String,
    pub version: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "System health status", body = HealthResponse)
    ),
    tag = "system"
)]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let scratch_dir = state.converter.scratch_dir();

    let scratch_writable = can_write(scratch_dir).await;

    Json(HealthResponse {
        status: "ok".to_string(),
        scratch_dir: scratch_dir.display().to_string(),
        scratch_writable,
        extractor: state.converter.extractor_name().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Creates and removes a throwaway file, so ownership and ACLs are honoured.
/// The scratch directory itself is never created here.
async fn can_write(dir: &Path) -> bool {
    if !tokio::fs::metadata(dir).await.is_ok_and(|m| m.is_dir()) {
        return false;
    }

    let check = dir.join(format!(".health-{}", Uuid::new_v4()));
    let created = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&check)
        .await;

    match created {
        Ok(file) => {
            drop(file);
            if let Err(e) = tokio::fs::remove_file(&check).await {
                tracing::warn!("Failed to remove health check file {}: {}", check.display(), e);
            }
            true
        }
        Err(e) => {
            tracing::warn!("Scratch dir {} is not writable: {}", dir.display(), e);
            false
        }
    }
}
