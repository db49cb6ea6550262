use std::ffi::OsStr;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::{Builder, TempPath};

use crate::envelope::PipelineError;

const STAGED_FILE_PREFIX: &str = "ocr-upload-";

/// An uploaded image written to disk for the engine to read.
///
/// The file is deleted when the value is released or dropped, whichever
/// comes first, so it never outlives the request that created it.
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
    guard: Option<TempPath>,
}

impl StagedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn release(mut self) {
        self.release_inner();
    }

    fn release_inner(&mut self) {
        let Some(guard) = self.guard.take() else {
            return;
        };

        match guard.close() {
            Ok(()) => log::debug!("Released staged file {}", self.path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("Staged file {} was already gone", self.path.display())
            }
            Err(e) => log::warn!(
                "Failed to delete staged file {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        self.release_inner();
    }
}

// Case is kept as-is; dotfiles such as `.bashrc` have no extension.
pub fn extension_suffix(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(OsStr::to_str)
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default()
}

/// Writes `bytes` to a fresh temp file in `dir` (system temp dir when `None`),
/// keeping `filename_hint`'s extension.
pub fn stage(
    bytes: &[u8],
    filename_hint: &str,
    dir: Option<&Path>,
) -> Result<StagedFile, PipelineError> {
    let suffix = extension_suffix(filename_hint);

    let mut builder = Builder::new();
    builder.prefix(STAGED_FILE_PREFIX).suffix(&suffix);

    let named = match dir {
        Some(dir) => builder.tempfile_in(dir),
        None => builder.tempfile(),
    }
    .map_err(PipelineError::StagingFailure)?;

    let (mut file, temp_path) = named.into_parts();
    let staged = StagedFile {
        path: temp_path.to_path_buf(),
        guard: Some(temp_path),
    };

    // On failure `staged` is dropped here and the partial file removed.
    file.write_all(bytes)
        .and_then(|_| file.flush())
        .map_err(PipelineError::StagingFailure)?;
    drop(file);

    log::debug!(
        "Staged {} bytes at {}",
        bytes.len(),
        staged.path().display()
    );
    Ok(staged)
}

pub fn release(staged: StagedFile) {
    staged.release();
}
