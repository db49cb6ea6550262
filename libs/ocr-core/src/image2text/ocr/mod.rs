// OCR module structure
mod ocr_tesseract;

mod types;
pub use ocr_tesseract::TesseractEngine;
pub use types::OcrConfig;

use anyhow::Result;
use std::path::Path;

use crate::common::RawLine;
use crate::envelope::PipelineError;
use crate::staging::StagedFile;

/// A text recognizer that reads an image from disk.
///
/// Implementations are shared across requests and may be called from several
/// threads at once. `Ok(None)` means the engine produced no result at all.
pub trait OcrEngine: Send + Sync {
    fn name(&self) -> &str;

    fn recognize(&self, path: &Path) -> Result<Option<Vec<RawLine>>>;
}

/// Runs `engine` on a staged upload and flattens its output to a plain list.
///
/// A missing result and an empty one are both "nothing detected"; any engine
/// failure is reported with the engine's own message.
pub fn recognize(engine: &dyn OcrEngine, staged: &StagedFile) -> Result<Vec<RawLine>, PipelineError> {
    match engine.recognize(staged.path()) {
        Ok(Some(lines)) => Ok(lines),
        Ok(None) => {
            log::debug!("{} returned no result for {}", engine.name(), staged.path().display());
            Ok(Vec::new())
        }
        Err(e) => Err(PipelineError::RecognitionError(e.to_string())),
    }
}
