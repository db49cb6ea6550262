mod ocr;
pub use ocr::{recognize, OcrConfig, OcrEngine, TesseractEngine};
