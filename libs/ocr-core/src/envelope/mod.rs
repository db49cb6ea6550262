mod errors;
mod types;

pub use errors::{ErrorCategory, PipelineError};
pub use types::{into_envelope, ErrorBody, ResponseEnvelope};
