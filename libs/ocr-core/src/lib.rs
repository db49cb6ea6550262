pub mod common;
pub mod envelope;
pub mod image2text;
pub mod process;
pub mod staging;
pub mod upload;
