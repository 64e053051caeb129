pub mod api;
pub mod config;
pub mod services;

use crate::config::ConverterConfig;
use crate::services::conversion::ConversionService;
use crate::services::extractor::{TextExtractor, create_extractor};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::convert::pdf_to_text,
        api::handlers::health::health_check,
    ),
    components(
        schemas(
            api::handlers::convert::ConvertResponse,
            api::handlers::convert::ErrorResponse,
            api::handlers::convert::PdfUpload,
            api::handlers::health::HealthResponse,
        )
    ),
    tags(
        (name = "convert", description = "PDF to text conversion"),
        (name = "system", description = "Service health")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub converter: Arc<ConversionService>,
    pub config: ConverterConfig,
}

impl AppState {
    /// Builds state with the extractor named in `config`
    pub fn from_config(config: ConverterConfig) -> Self {
        let extractor = create_extractor(&config.extractor);
        Self::with_extractor(config, extractor)
    }

    pub fn with_extractor(config: ConverterConfig, extractor: Arc<dyn TextExtractor>) -> Self {
        Self {
            converter: Arc::new(ConversionService::new(config.clone(), extractor)),
            config,
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    let body_limit = match state.config.max_upload_size {
        Some(max) => DefaultBodyLimit::max(max),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(api::handlers::health::health_check))
        .route("/pdf-to-text", post(api::handlers::convert::pdf_to_text))
        .layer(from_fn(api::middleware::request_id::request_id_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(body_limit)
        .with_state(state)
}
