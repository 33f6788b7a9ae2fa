use crate::{ItemId, Tone};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("a request is already in flight")]
    AlreadyInFlight,
    #[error("no request is in flight")]
    NothingInFlight,
    #[error("missing selection: {0}")]
    MissingSelection(&'static str),
    #[error("refinement feedback is empty")]
    EmptyFeedback,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unknown item `{0}`")]
    UnknownItem(String),
    #[error("item id {0} already exists")]
    DuplicateId(ItemId),
    #[error("no draft for tone `{0}`")]
    UnknownTone(Tone),
}
