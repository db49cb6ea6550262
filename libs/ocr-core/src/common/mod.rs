mod types;

pub use types::RawLine;
pub use types::RecognitionResult;
