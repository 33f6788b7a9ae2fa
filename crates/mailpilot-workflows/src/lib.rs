//! Workflow controllers for the four AI-backed inbox features.
//!
//! Each controller owns its source collection and a plain state value that
//! only changes through an explicit `apply(event)` step, so every transition
//! can be exercised without a UI or a live service.

mod classifier;
mod drafts;
mod extractor;
pub mod seed;
mod summarizer;

#[cfg(test)]
mod testing;

pub use classifier::{Classifier, ClassifierEvent, ClassifierState};
pub use drafts::{DraftEvent, DraftGenerator, DraftState};
pub use extractor::{ActionItemCounts, ActionItemExtractor, ExtractorEvent, ExtractorState};
pub use summarizer::{Summarizer, SummarizerEvent, SummarizerState, ThreadSummary};
