use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use ocr_core::image2text::OcrEngine;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

mod config;
mod handlers;

pub use config::{EngineArgs, ServerConfig, ServiceSettings, DEFAULT_MAX_UPLOAD_BYTES};
pub use handlers::{HealthResponse, UPLOAD_FIELD};

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<dyn OcrEngine>,
    pub settings: ServiceSettings,
}

pub fn router(engine: Arc<dyn OcrEngine>, settings: ServiceSettings) -> Router {
    let max_upload_bytes = settings.max_upload_bytes;
    let state = AppState { engine, settings };

    Router::new()
        .route("/", get(handlers::index))
        .route("/api/health", get(handlers::health))
        .route("/api/ocr", post(handlers::ocr))
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .with_state(state)
}
