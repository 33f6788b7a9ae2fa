use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("could not reach AI service: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("AI service returned status {status}: {message}")]
    Protocol { status: u16, message: String },
    #[error("unexpected response from AI service: {0}")]
    Shape(String),
    #[error("invalid config: {0}")]
    Config(String),
}
