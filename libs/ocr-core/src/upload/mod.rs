mod types;
pub use types::UploadedImage;

use crate::common::RecognitionResult;
use crate::envelope::PipelineError;
use crate::image2text::{recognize, OcrEngine};
use crate::process::{aggregate, ProcessorConfig};
use crate::staging::stage;

/// Runs one upload through staging, recognition and aggregation.
///
/// Blocks for as long as the engine does. The staged file is removed before
/// this returns, whatever the outcome.
pub fn process_upload(
    upload: Option<UploadedImage>,
    engine: &dyn OcrEngine,
    config: &ProcessorConfig,
) -> Result<RecognitionResult, PipelineError> {
    let upload = upload.ok_or(PipelineError::NoUpload)?;
    if upload.filename.is_empty() {
        return Err(PipelineError::EmptyFilename);
    }

    let staged = stage(&upload.bytes, &upload.filename, config.temp_dir.as_deref())?;
    log::info!(
        "Recognizing {} ({} bytes) with {}",
        upload.filename,
        upload.bytes.len(),
        engine.name()
    );

    let lines = recognize(engine, &staged)?;
    staged.release();

    let result = aggregate(&lines, config.confidence_threshold);
    match &result {
        Ok(result) => log::info!(
            "Recognized {}: {} chars over {} lines, mean confidence {:.2}%",
            upload.filename,
            result.text.chars().count(),
            result.lines,
            result.confidence * 100.0
        ),
        Err(PipelineError::ConfidenceTooLow { candidates }) => log::warn!(
            "All {} candidate lines in {} were at or below {}",
            candidates,
            upload.filename,
            config.confidence_threshold
        ),
        Err(e) => log::warn!("{}: {}", upload.filename, e),
    }
    result
}
