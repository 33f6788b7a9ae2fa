mod error;
mod service;

pub use error::AiError;
pub use service::{AiBackend, HttpAiBackend};
