use crate::common::{RawLine, RecognitionResult};
use crate::envelope::PipelineError;

/// A line is kept only when its confidence is strictly above `threshold`.
/// NaN never passes.
pub fn is_accepted(line: &RawLine, threshold: f64) -> bool {
    line.confidence > threshold
}

/// Filters raw engine lines and folds the survivors into one result.
///
/// Accepted texts keep the engine's order and are joined with `\n`; the
/// confidence is their arithmetic mean. An empty input and an input where
/// nothing passed are reported as different errors.
pub fn aggregate(lines: &[RawLine], threshold: f64) -> Result<RecognitionResult, PipelineError> {
    if lines.is_empty() {
        return Err(PipelineError::NoTextDetected);
    }

    let mut texts: Vec<&str> = Vec::with_capacity(lines.len());
    let mut total_confidence = 0.0;

    for line in lines.iter().filter(|line| is_accepted(line, threshold)) {
        texts.push(&line.text);
        total_confidence += line.confidence;
    }

    if texts.is_empty() {
        return Err(PipelineError::ConfidenceTooLow {
            candidates: lines.len(),
        });
    }

    let count = texts.len();
    Ok(RecognitionResult {
        text: texts.join("\n"),
        confidence: total_confidence / count as f64,
        lines: count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::DEFAULT_CONFIDENCE_THRESHOLD;

    fn lines(raw: &[(&str, f64)]) -> Vec<RawLine> {
        raw.iter().map(|(text, conf)| RawLine::new(*text, *conf)).collect()
    }

    #[test]
    fn test_threshold_boundary() {
        let threshold = DEFAULT_CONFIDENCE_THRESHOLD;
        assert!(!is_accepted(&RawLine::new("x", 0.5), threshold));
        assert!(is_accepted(&RawLine::new("x", 0.500_001), threshold));
        assert!(!is_accepted(&RawLine::new("x", 0.0), threshold));
        assert!(is_accepted(&RawLine::new("x", 1.0), threshold));
        assert!(!is_accepted(&RawLine::new("x", f64::NAN), threshold));
    }

    #[test]
    fn test_mixed_confidences() {
        let result = aggregate(
            &lines(&[("Hello", 0.9), ("world", 0.3), ("!", 0.6)]),
            DEFAULT_CONFIDENCE_THRESHOLD,
        )
        .unwrap();

        assert_eq!(result.text, "Hello\n!");
        assert!((result.confidence - 0.75).abs() < 1e-9);
        assert_eq!(result.lines, 2);
    }

    #[test]
    fn test_order_is_preserved() {
        let result = aggregate(
            &lines(&[("c", 0.7), ("a", 0.8), ("b", 0.9)]),
            DEFAULT_CONFIDENCE_THRESHOLD,
        )
        .unwrap();

        assert_eq!(result.text, "c\na\nb");
        assert!((result.confidence - 0.8).abs() < 1e-9);
        assert_eq!(result.lines, 3);
    }

    #[test]
    fn test_empty_input_is_no_text() {
        let err = aggregate(&[], DEFAULT_CONFIDENCE_THRESHOLD).unwrap_err();
        assert!(matches!(err, PipelineError::NoTextDetected));
    }

    #[test]
    fn test_all_rejected_is_too_low() {
        let input = lines(&[("x", 0.4)]);
        let err = aggregate(&input, DEFAULT_CONFIDENCE_THRESHOLD).unwrap_err();
        assert!(matches!(err, PipelineError::ConfidenceTooLow { candidates: 1 }));

        let input = lines(&[("a", 0.5), ("b", 0.1), ("c", 0.5)]);
        let err = aggregate(&input, DEFAULT_CONFIDENCE_THRESHOLD).unwrap_err();
        assert!(matches!(err, PipelineError::ConfidenceTooLow { candidates: 3 }));
    }

    #[test]
    fn test_custom_threshold() {
        let input = lines(&[("a", 0.55), ("b", 0.95)]);
        let result = aggregate(&input, 0.9).unwrap();

        assert_eq!(result.text, "b");
        assert_eq!(result.lines, 1);
    }

    #[test]
    fn test_empty_texts_still_count() {
        let result = aggregate(&lines(&[("", 0.9), ("x", 0.7)]), 0.5).unwrap();
        assert_eq!(result.text, "\nx");
        assert_eq!(result.lines, 2);
    }
}
