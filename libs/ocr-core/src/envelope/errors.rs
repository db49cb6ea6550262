use axum::http::StatusCode;
use thiserror::Error;

/// Every way a recognition request can end without a result.
///
/// The `Display` text of each variant is the message sent back to the caller.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no file uploaded")]
    NoUpload,

    #[error("empty filename")]
    EmptyFilename,

    #[error("invalid upload: {0}")]
    MalformedUpload(String),

    #[error("uploaded file too large")]
    UploadTooLarge,

    #[error("failed to stage upload: {0}")]
    StagingFailure(#[source] std::io::Error),

    #[error("recognition failed: {0}")]
    RecognitionError(String),

    #[error("recognition timed out")]
    RecognitionTimeout,

    /// The engine returned no candidate regions at all.
    #[error("no text detected")]
    NoTextDetected,

    /// The engine found candidates but none cleared the threshold.
    #[error("recognition confidence too low")]
    ConfidenceTooLow { candidates: usize },
}

/// Who is expected to act on an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Environment,
    // caller may retry with a clearer image
    Degenerate,
}

impl PipelineError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PipelineError::NoUpload
            | PipelineError::EmptyFilename
            | PipelineError::MalformedUpload(_)
            | PipelineError::NoTextDetected
            | PipelineError::ConfidenceTooLow { .. } => StatusCode::BAD_REQUEST,
            PipelineError::UploadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            PipelineError::StagingFailure(_) | PipelineError::RecognitionError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            PipelineError::RecognitionTimeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PipelineError::NoUpload
            | PipelineError::EmptyFilename
            | PipelineError::MalformedUpload(_)
            | PipelineError::UploadTooLarge => ErrorCategory::Input,
            PipelineError::StagingFailure(_)
            | PipelineError::RecognitionError(_)
            | PipelineError::RecognitionTimeout => ErrorCategory::Environment,
            PipelineError::NoTextDetected | PipelineError::ConfidenceTooLow { .. } => {
                ErrorCategory::Degenerate
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_errors_are_bad_requests() {
        for err in [
            PipelineError::NoUpload,
            PipelineError::EmptyFilename,
            PipelineError::MalformedUpload("missing boundary".to_string()),
        ] {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
            assert_eq!(err.category(), ErrorCategory::Input);
        }
    }

    #[test]
    fn test_degenerate_outcomes_stay_distinct() {
        let nothing = PipelineError::NoTextDetected;
        let too_low = PipelineError::ConfidenceTooLow { candidates: 3 };

        assert_eq!(nothing.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(too_low.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(nothing.category(), ErrorCategory::Degenerate);
        assert_eq!(too_low.category(), ErrorCategory::Degenerate);
        assert_ne!(nothing.to_string(), too_low.to_string());
    }

    #[test]
    fn test_environment_errors_are_server_side() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
        let staging = PipelineError::StagingFailure(io);
        assert_eq!(staging.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(staging.to_string(), "failed to stage upload: permission denied");

        let engine = PipelineError::RecognitionError("decode failed".to_string());
        assert_eq!(engine.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(engine.category(), ErrorCategory::Environment);
        assert_eq!(
            PipelineError::RecognitionTimeout.status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
    }
}
