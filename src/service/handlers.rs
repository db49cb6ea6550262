use axum::{
    extract::{multipart::MultipartError, multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use ocr_core::common::RecognitionResult;
use ocr_core::envelope::{into_envelope, ErrorCategory, PipelineError};
use ocr_core::upload::{process_upload, UploadedImage};
use serde::Serialize;

use super::AppState;

pub const UPLOAD_FIELD: &str = "file";

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><title>OCR service</title></head>
<body>
    <h1>OCR service is running</h1>
    <p>OCR API: <code>POST /api/ocr</code> (multipart form, image in field <code>file</code>)</p>
    <p>Health check: <code>GET /api/health</code></p>
</body>
</html>
"#;

#[derive(Serialize, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub lang: String,
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: state.engine.name().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        lang: state.settings.lang.clone(),
    })
}

pub async fn ocr(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> impl IntoResponse {
    let outcome = match multipart {
        Ok(multipart) => match read_upload(multipart).await {
            Ok(upload) => run_pipeline(&state, upload).await,
            Err(e) => Err(e),
        },
        Err(rejection) => {
            log::debug!("Request is not a multipart upload: {}", rejection);
            Err(PipelineError::NoUpload)
        }
    };

    if let Err(e) = &outcome {
        match e.category() {
            ErrorCategory::Environment => log::error!("OCR request failed: {}", e),
            ErrorCategory::Input | ErrorCategory::Degenerate => {
                log::info!("OCR request rejected: {}", e)
            }
        }
    }

    let (status, envelope) = into_envelope(outcome);
    (status, Json(envelope))
}

/// Pulls the first file part named [`UPLOAD_FIELD`] out of the form.
///
/// A part with that name but no filename is a plain form value, not an upload.
async fn read_upload(mut multipart: Multipart) -> Result<Option<UploadedImage>, PipelineError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_owned) else {
            continue;
        };

        let bytes = field.bytes().await.map_err(multipart_error)?;
        log::debug!("Received upload {} ({} bytes)", filename, bytes.len());
        return Ok(Some(UploadedImage::new(bytes.to_vec(), filename)));
    }

    Ok(None)
}

fn multipart_error(err: MultipartError) -> PipelineError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        PipelineError::UploadTooLarge
    } else {
        PipelineError::MalformedUpload(err.body_text())
    }
}

/// Runs the blocking pipeline off the async workers.
///
/// On timeout the blocking task keeps running and still removes its staged
/// file when the engine returns.
async fn run_pipeline(
    state: &AppState,
    upload: Option<UploadedImage>,
) -> Result<RecognitionResult, PipelineError> {
    let engine = state.engine.clone();
    let processor = state.settings.processor.clone();
    let task = tokio::task::spawn_blocking(move || {
        process_upload(upload, engine.as_ref(), &processor)
    });

    let joined = match state.settings.recognition_timeout {
        Some(limit) => tokio::time::timeout(limit, task)
            .await
            .map_err(|_| PipelineError::RecognitionTimeout)?,
        None => task.await,
    };

    joined.map_err(|e| {
        if e.is_panic() {
            log::error!("Recognition task panicked: {}", e);
            PipelineError::RecognitionError("engine crashed".to_string())
        } else {
            PipelineError::RecognitionError(e.to_string())
        }
    })?
}
