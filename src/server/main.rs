use anyhow::{Context, Result};
use clap::Parser;
use ocr_core::image2text::{OcrEngine, TesseractEngine};
use ocr_server::common::init_logger_exe;
use ocr_server::service::{router, ServerConfig};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    init_logger_exe();
    let config = ServerConfig::parse();

    log::info!("Starting OCR server...");

    let engine = TesseractEngine::new(config.engine.ocr_config());
    log::info!(
        "Engine: {} (lang {}, confidence threshold {})",
        engine.name(),
        engine.config().lang,
        config.engine.confidence_threshold
    );
    let engine: Arc<dyn OcrEngine> = Arc::new(engine);

    let app = router(engine, config.service_settings());

    let addr = config.socket_addr()?;
    log::info!("Attempting to bind to {}", addr);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    log::info!("Successfully bound to http://{}", addr);
    log::info!("  POST /api/ocr     - recognize an uploaded image");
    log::info!("  GET  /api/health  - health check");
    log::info!("  GET  /            - landing page");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::warn!("Ctrl-C received, shutting down..."),
        Err(e) => log::error!("Failed to listen for Ctrl-C: {}", e),
    }
}
