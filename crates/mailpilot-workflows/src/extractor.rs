use crate::seed;
use mailpilot_ai::AiBackend;
use mailpilot_core::{
    filter_by_priority, flatten_action_items, priority_counts, ActionItem, ConfirmationSet,
    ExtractionBatch, ItemId, Priority, SourceItem, StatusEvent, Tally, WorkflowError,
    WorkflowStatus,
};
use mailpilot_storage::CollectionStore;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractorState {
    pub status: WorkflowStatus,
    pub items: Vec<ActionItem>,
    pub confirmed: ConfirmationSet,
    pub priority_filter: Option<Priority>,
    pub selected_email: Option<ItemId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExtractorEvent {
    Requested,
    Extracted(ExtractionBatch),
    Failed(String),
    ToggleConfirmed(String),
    DeleteItem(String),
    SetPriorityFilter(Option<Priority>),
    SelectEmail(Option<ItemId>),
    /// The source email left the collection; its items go with it.
    EmailRemoved(ItemId),
}

/// Dashboard figures over the current action items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionItemCounts {
    pub total: usize,
    pub high_priority: usize,
    pub confirmed: usize,
    pub by_priority: Tally<Priority>,
}

impl ExtractorState {
    pub fn apply(&self, event: ExtractorEvent) -> Result<Self, WorkflowError> {
        let mut next = self.clone();
        match event {
            ExtractorEvent::Requested => {
                next.status = self.status.transition(StatusEvent::Request)?;
            }
            ExtractorEvent::Extracted(batch) => {
                next.status = self.status.transition(StatusEvent::Succeed)?;
                next.items = flatten_action_items(batch.results);
                next.confirmed.clear();
                next.selected_email = None;
            }
            ExtractorEvent::Failed(message) => {
                next.status = self.status.transition(StatusEvent::Fail(message))?;
            }
            ExtractorEvent::ToggleConfirmed(id) => {
                if !self.has_item(&id) {
                    return Err(WorkflowError::UnknownItem(id));
                }
                next.confirmed.toggle(&id);
            }
            ExtractorEvent::DeleteItem(id) => {
                if !self.has_item(&id) {
                    return Err(WorkflowError::UnknownItem(id));
                }
                next.items.retain(|item| item.unique_id != id);
                next.confirmed.remove(&id);
            }
            ExtractorEvent::SetPriorityFilter(filter) => next.priority_filter = filter,
            ExtractorEvent::SelectEmail(id) => next.selected_email = id,
            ExtractorEvent::EmailRemoved(id) => {
                next.items.retain(|item| item.source_email_id != id);
                let remaining = &next.items;
                next.confirmed
                    .retain_existing(|uid| remaining.iter().any(|item| item.unique_id == uid));
                if self.selected_email == Some(id) {
                    next.selected_email = None;
                }
            }
        }
        Ok(next)
    }

    fn has_item(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.unique_id == id)
    }

    pub fn visible(&self) -> Vec<&ActionItem> {
        filter_by_priority(&self.items, self.priority_filter)
    }

    pub fn counts(&self) -> ActionItemCounts {
        let by_priority = priority_counts(&self.items);
        ActionItemCounts {
            total: by_priority.total,
            high_priority: by_priority.count(&Priority::High),
            confirmed: self.confirmed.len(),
            by_priority,
        }
    }
}

/// Pulls action items out of a batch of emails.
pub struct ActionItemExtractor {
    backend: Arc<dyn AiBackend>,
    emails: CollectionStore,
    state: ExtractorState,
}

impl ActionItemExtractor {
    pub fn new(backend: Arc<dyn AiBackend>, emails: CollectionStore) -> Self {
        Self {
            backend,
            emails,
            state: ExtractorState::default(),
        }
    }

    pub fn with_seed(backend: Arc<dyn AiBackend>) -> Self {
        Self::new(backend, CollectionStore::in_memory(seed::action_emails()))
    }

    pub fn state(&self) -> &ExtractorState {
        &self.state
    }

    pub fn emails(&self) -> &[SourceItem] {
        self.emails.list()
    }

    pub fn visible(&self) -> Vec<&ActionItem> {
        self.state.visible()
    }

    pub fn counts(&self) -> ActionItemCounts {
        self.state.counts()
    }

    pub fn is_confirmed(&self, unique_id: &str) -> bool {
        self.state.confirmed.contains(unique_id)
    }

    pub fn toggle_confirmed(&mut self, unique_id: &str) -> Result<bool, WorkflowError> {
        self.dispatch(ExtractorEvent::ToggleConfirmed(unique_id.to_string()))?;
        Ok(self.is_confirmed(unique_id))
    }

    pub fn delete_item(&mut self, unique_id: &str) -> Result<(), WorkflowError> {
        self.dispatch(ExtractorEvent::DeleteItem(unique_id.to_string()))
    }

    pub fn set_priority_filter(&mut self, filter: Option<Priority>) -> Result<(), WorkflowError> {
        self.dispatch(ExtractorEvent::SetPriorityFilter(filter))
    }

    pub fn select_email(&mut self, id: Option<ItemId>) -> Result<(), WorkflowError> {
        if let Some(id) = id {
            if !self.emails.contains(id) {
                return Err(WorkflowError::UnknownItem(id.to_string()));
            }
        }
        self.dispatch(ExtractorEvent::SelectEmail(id))
    }

    pub async fn remove_email(&mut self, id: ItemId) -> Result<SourceItem, WorkflowError> {
        let removed = self
            .emails
            .remove(id)
            .await
            .ok_or_else(|| WorkflowError::UnknownItem(id.to_string()))?;
        self.dispatch(ExtractorEvent::EmailRemoved(id))?;
        Ok(removed)
    }

    pub async fn extract(&mut self) -> Result<(), WorkflowError> {
        if self.emails.is_empty() {
            return Err(WorkflowError::InvalidInput(
                "there are no emails to extract from".to_string(),
            ));
        }
        self.dispatch(ExtractorEvent::Requested)?;

        let emails = self.emails.list().to_vec();
        tracing::info!(workflow = "extract", emails = emails.len(), "extracting action items");
        match self.backend.extract_action_items(&emails).await {
            Ok(batch) => self.dispatch(ExtractorEvent::Extracted(batch)),
            Err(err) => {
                tracing::warn!(workflow = "extract", "extraction failed: {err}");
                self.dispatch(ExtractorEvent::Failed(err.to_string()))
            }
        }
    }

    fn dispatch(&mut self, event: ExtractorEvent) -> Result<(), WorkflowError> {
        self.state = self.state.apply(event)?;
        Ok(())
    }
}
