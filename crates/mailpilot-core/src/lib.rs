mod error;
mod model;
mod normalize;
mod projection;
mod selection;
mod workflow;

pub use error::WorkflowError;
pub use model::*;
pub use normalize::{flatten_action_items, IdSequence};
pub use projection::{
    category_counts, filter_by_category, filter_by_priority, priority_counts, project, tally,
    Tally,
};
pub use selection::{toggle_filter, ConfirmationSet};
pub use workflow::{StatusEvent, WorkflowStatus};
