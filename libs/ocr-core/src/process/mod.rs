mod aggregate;
mod types;

pub use aggregate::{aggregate, is_accepted};
pub use types::{ProcessorConfig, DEFAULT_CONFIDENCE_THRESHOLD};
