use serde::Serialize;

#[derive(Clone, Debug, PartialEq)]
pub struct RawLine {
    pub text: String,
    pub confidence: f64, // 0.0 - 1.0
}

impl RawLine {
    pub fn new(text: impl Into<String>, confidence: f64) -> Self {
        Self {
            text: text.into(),
            confidence,
        }
    }
}

/// Only built when at least one line passed the confidence threshold, so
/// `lines` is never zero and `confidence` is a real mean.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecognitionResult {
    pub text: String,
    pub confidence: f64,
    pub lines: usize,
}
