use axum::http::StatusCode;
use serde::Serialize;

use crate::common::RecognitionResult;

use super::PipelineError;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Body of every recognition response: either the result or an error, never both.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseEnvelope {
    Success(RecognitionResult),
    Error { error: ErrorBody },
}

impl ResponseEnvelope {
    pub fn error(message: impl Into<String>) -> Self {
        ResponseEnvelope::Error {
            error: ErrorBody {
                message: message.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResponseEnvelope::Success(_))
    }
}

pub fn into_envelope(
    outcome: Result<RecognitionResult, PipelineError>,
) -> (StatusCode, ResponseEnvelope) {
    match outcome {
        Ok(result) => (StatusCode::OK, ResponseEnvelope::Success(result)),
        Err(err) => (err.status_code(), ResponseEnvelope::error(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn error_of(err: PipelineError) -> (StatusCode, serde_json::Value) {
        let (status, envelope) = into_envelope(Err(err));
        (status, serde_json::to_value(envelope).unwrap())
    }

    #[test]
    fn test_success_body_shape() {
        let result = RecognitionResult {
            text: "Hello\n!".to_string(),
            confidence: 0.75,
            lines: 2,
        };
        let (status, envelope) = into_envelope(Ok(result));

        assert_eq!(status, StatusCode::OK);
        assert!(envelope.is_success());
        assert_eq!(
            serde_json::to_value(envelope).unwrap(),
            json!({ "text": "Hello\n!", "confidence": 0.75, "lines": 2 })
        );
    }

    #[test]
    fn test_error_table() {
        let cases = vec![
            (PipelineError::NoUpload, 400, "no file uploaded"),
            (PipelineError::EmptyFilename, 400, "empty filename"),
            (PipelineError::NoTextDetected, 400, "no text detected"),
            (
                PipelineError::ConfidenceTooLow { candidates: 1 },
                400,
                "recognition confidence too low",
            ),
            (
                PipelineError::RecognitionError("decode failed".to_string()),
                500,
                "recognition failed: decode failed",
            ),
            (PipelineError::UploadTooLarge, 413, "uploaded file too large"),
        ];

        for (err, code, message) in cases {
            let (status, body) = error_of(err);
            assert_eq!(status.as_u16(), code);
            assert_eq!(body, json!({ "error": { "message": message } }));
        }
    }

    #[test]
    fn test_error_body_has_no_result_fields() {
        let (_, body) = error_of(PipelineError::NoTextDetected);
        let object = body.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert!(!object.contains_key("text"));
    }
}
