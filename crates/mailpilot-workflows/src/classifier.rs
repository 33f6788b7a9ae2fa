use crate::seed;
use mailpilot_ai::AiBackend;
use mailpilot_core::{
    category_counts, filter_by_category, toggle_filter, Category, ClassificationBatch,
    ClassificationStats, ClassifiedEmail, ItemId, SourceItem, StatusEvent, Tally, WorkflowError,
    WorkflowStatus,
};
use mailpilot_storage::CollectionStore;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifierState {
    pub status: WorkflowStatus,
    pub results: Vec<ClassifiedEmail>,
    /// Totals reported by the service with the last successful batch.
    pub stats: Option<ClassificationStats>,
    pub category_filter: Option<Category>,
    pub selected: Option<ItemId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierEvent {
    Requested,
    Classified(ClassificationBatch),
    Failed(String),
    SetFilter(Option<Category>),
    ToggleFilter(Category),
    Select(Option<ItemId>),
    EmailRemoved(ItemId),
}

impl ClassifierState {
    pub fn apply(&self, event: ClassifierEvent) -> Result<Self, WorkflowError> {
        let mut next = self.clone();
        match event {
            ClassifierEvent::Requested => {
                next.status = self.status.transition(StatusEvent::Request)?;
            }
            ClassifierEvent::Classified(batch) => {
                next.status = self.status.transition(StatusEvent::Succeed)?;
                next.results = batch.classified_emails;
                next.stats = Some(batch.stats);
                next.selected = None;
            }
            ClassifierEvent::Failed(message) => {
                next.status = self.status.transition(StatusEvent::Fail(message))?;
            }
            ClassifierEvent::SetFilter(filter) => next.category_filter = filter,
            ClassifierEvent::ToggleFilter(category) => {
                next.category_filter = toggle_filter(self.category_filter, category);
            }
            ClassifierEvent::Select(Some(id)) => {
                if !self.results.iter().any(|result| result.email.id == id) {
                    return Err(WorkflowError::UnknownItem(id.to_string()));
                }
                next.selected = Some(id);
            }
            ClassifierEvent::Select(None) => next.selected = None,
            ClassifierEvent::EmailRemoved(id) => {
                if self.selected == Some(id) {
                    next.selected = None;
                }
            }
        }
        Ok(next)
    }

    /// Results under the active category filter, in service order.
    pub fn visible(&self) -> Vec<&ClassifiedEmail> {
        filter_by_category(&self.results, self.category_filter)
    }

    pub fn counts(&self) -> Tally<Category> {
        category_counts(&self.results)
    }

    pub fn selected_result(&self) -> Option<&ClassifiedEmail> {
        let id = self.selected?;
        self.results.iter().find(|result| result.email.id == id)
    }
}

/// Sorts an inbox into categories in one batch call.
pub struct Classifier {
    backend: Arc<dyn AiBackend>,
    inbox: CollectionStore,
    state: ClassifierState,
}

impl Classifier {
    pub fn new(backend: Arc<dyn AiBackend>, inbox: CollectionStore) -> Self {
        Self {
            backend,
            inbox,
            state: ClassifierState::default(),
        }
    }

    pub fn with_seed(backend: Arc<dyn AiBackend>) -> Self {
        Self::new(backend, CollectionStore::in_memory(seed::inbox()))
    }

    pub fn state(&self) -> &ClassifierState {
        &self.state
    }

    pub fn inbox(&self) -> &[SourceItem] {
        self.inbox.list()
    }

    pub fn visible(&self) -> Vec<&ClassifiedEmail> {
        self.state.visible()
    }

    pub fn counts(&self) -> Tally<Category> {
        self.state.counts()
    }

    pub fn set_filter(&mut self, filter: Option<Category>) -> Result<(), WorkflowError> {
        self.dispatch(ClassifierEvent::SetFilter(filter))
    }

    pub fn toggle_filter(&mut self, category: Category) -> Result<(), WorkflowError> {
        self.dispatch(ClassifierEvent::ToggleFilter(category))
    }

    pub fn select(&mut self, id: Option<ItemId>) -> Result<(), WorkflowError> {
        self.dispatch(ClassifierEvent::Select(id))
    }

    pub async fn remove_email(&mut self, id: ItemId) -> Result<SourceItem, WorkflowError> {
        let removed = self
            .inbox
            .remove(id)
            .await
            .ok_or_else(|| WorkflowError::UnknownItem(id.to_string()))?;
        self.dispatch(ClassifierEvent::EmailRemoved(id))?;
        Ok(removed)
    }

    /// Submits the whole inbox. On success the previous results are replaced.
    pub async fn classify(&mut self) -> Result<(), WorkflowError> {
        if self.inbox.is_empty() {
            return Err(WorkflowError::InvalidInput(
                "there are no emails to classify".to_string(),
            ));
        }
        self.dispatch(ClassifierEvent::Requested)?;

        let emails = self.inbox.list().to_vec();
        tracing::info!(workflow = "classify", emails = emails.len(), "classifying inbox");
        match self.backend.classify_emails(&emails).await {
            Ok(batch) => {
                tracing::debug!(
                    workflow = "classify",
                    results = batch.classified_emails.len(),
                    "classification received"
                );
                self.dispatch(ClassifierEvent::Classified(batch))
            }
            Err(err) => {
                tracing::warn!(workflow = "classify", "classification failed: {err}");
                self.dispatch(ClassifierEvent::Failed(err.to_string()))
            }
        }
    }

    fn dispatch(&mut self, event: ClassifierEvent) -> Result<(), WorkflowError> {
        self.state = self.state.apply(event)?;
        Ok(())
    }
}
