use crate::seed;
use mailpilot_ai::AiBackend;
use mailpilot_core::{ItemId, SourceItem, StatusEvent, WorkflowError, WorkflowStatus};
use mailpilot_storage::{CollectionStore, KeyValueStore, THREADS_KEY};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadSummary {
    pub thread_id: ItemId,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingCall {
    Summary(ItemId),
    Threads,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummarizerState {
    pub status: WorkflowStatus,
    pub selected: Option<ItemId>,
    pub summary: Option<ThreadSummary>,
    pending: Option<PendingCall>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarizerEvent {
    Select(Option<ItemId>),
    ThreadRemoved(ItemId),
    SummaryRequested(ItemId),
    Summarized(String),
    ThreadsRequested,
    /// The thread list was replaced by a fresh remote listing.
    ThreadsLoaded,
    Failed(String),
}

impl SummarizerState {
    pub fn apply(&self, event: SummarizerEvent) -> Result<Self, WorkflowError> {
        let mut next = self.clone();
        match event {
            SummarizerEvent::Select(id) => {
                if next.selected != id {
                    next.summary = None;
                }
                next.selected = id;
            }
            SummarizerEvent::ThreadRemoved(id) => {
                if next.selected == Some(id) {
                    next.selected = None;
                }
                if next.summary.as_ref().map(|s| s.thread_id) == Some(id) {
                    next.summary = None;
                }
            }
            SummarizerEvent::SummaryRequested(id) => {
                next.status = self.status.transition(StatusEvent::Request)?;
                next.pending = Some(PendingCall::Summary(id));
            }
            SummarizerEvent::Summarized(text) => {
                let Some(PendingCall::Summary(thread_id)) = self.pending else {
                    return Err(WorkflowError::NothingInFlight);
                };
                next.status = self.status.transition(StatusEvent::Succeed)?;
                next.pending = None;
                next.summary = Some(ThreadSummary { thread_id, text });
            }
            SummarizerEvent::ThreadsRequested => {
                next.status = self.status.transition(StatusEvent::Request)?;
                next.pending = Some(PendingCall::Threads);
            }
            SummarizerEvent::ThreadsLoaded => {
                if self.pending != Some(PendingCall::Threads) {
                    return Err(WorkflowError::NothingInFlight);
                }
                next.status = self.status.transition(StatusEvent::Succeed)?;
                next.pending = None;
                next.selected = None;
                next.summary = None;
            }
            SummarizerEvent::Failed(message) => {
                next.status = self.status.transition(StatusEvent::Fail(message))?;
                next.pending = None;
            }
        }
        Ok(next)
    }
}

/// Summarizes one thread at a time from a locally managed, mirrored list.
pub struct Summarizer {
    backend: Arc<dyn AiBackend>,
    threads: CollectionStore,
    state: SummarizerState,
}

impl Summarizer {
    pub fn new(backend: Arc<dyn AiBackend>, threads: CollectionStore) -> Self {
        Self {
            backend,
            threads,
            state: SummarizerState::default(),
        }
    }

    /// Hydrates the thread list from `store`, seeding it on first use.
    pub async fn with_store(backend: Arc<dyn AiBackend>, store: Arc<dyn KeyValueStore>) -> Self {
        let threads = CollectionStore::hydrate(store, THREADS_KEY, seed::summary_threads()).await;
        Self::new(backend, threads)
    }

    pub fn state(&self) -> &SummarizerState {
        &self.state
    }

    pub fn threads(&self) -> &[SourceItem] {
        self.threads.list()
    }

    pub fn selected_thread(&self) -> Option<&SourceItem> {
        self.state.selected.and_then(|id| self.threads.get(id))
    }

    /// The summary of the selected thread, if one has been produced.
    pub fn current_summary(&self) -> Option<&str> {
        match (&self.state.summary, self.state.selected) {
            (Some(summary), Some(selected)) if summary.thread_id == selected => {
                Some(&summary.text)
            }
            _ => None,
        }
    }

    pub fn select(&mut self, id: Option<ItemId>) -> Result<(), WorkflowError> {
        if let Some(id) = id {
            if !self.threads.contains(id) {
                return Err(WorkflowError::UnknownItem(id.to_string()));
            }
        }
        self.dispatch(SummarizerEvent::Select(id))
    }

    pub async fn add_thread(&mut self, subject: &str, content: &str) -> Result<ItemId, WorkflowError> {
        self.threads.create(subject, "", content).await
    }

    pub async fn remove_thread(&mut self, id: ItemId) -> Result<SourceItem, WorkflowError> {
        let removed = self
            .threads
            .remove(id)
            .await
            .ok_or_else(|| WorkflowError::UnknownItem(id.to_string()))?;
        self.dispatch(SummarizerEvent::ThreadRemoved(id))?;
        Ok(removed)
    }

    pub async fn summarize(&mut self) -> Result<(), WorkflowError> {
        let thread = self
            .selected_thread()
            .cloned()
            .ok_or(WorkflowError::MissingSelection("thread"))?;
        self.dispatch(SummarizerEvent::SummaryRequested(thread.id))?;

        tracing::info!(workflow = "summarize", thread = %thread.id, "requesting summary");
        match self.backend.summarize_thread(&thread.content).await {
            Ok(text) => self.dispatch(SummarizerEvent::Summarized(text)),
            Err(err) => {
                tracing::warn!(workflow = "summarize", thread = %thread.id, "summary failed: {err}");
                self.dispatch(SummarizerEvent::Failed(err.to_string()))
            }
        }
    }

    /// Replaces the local thread list with the service's listing.
    pub async fn refresh_threads(&mut self) -> Result<(), WorkflowError> {
        self.dispatch(SummarizerEvent::ThreadsRequested)?;

        match self.backend.list_threads().await {
            Ok(threads) => {
                tracing::info!(workflow = "summarize", items = threads.len(), "threads loaded");
                self.threads.replace_all(threads).await;
                self.dispatch(SummarizerEvent::ThreadsLoaded)
            }
            Err(err) => {
                tracing::warn!(workflow = "summarize", "thread listing failed: {err}");
                self.dispatch(SummarizerEvent::Failed(err.to_string()))
            }
        }
    }

    fn dispatch(&mut self, event: SummarizerEvent) -> Result<(), WorkflowError> {
        self.state = self.state.apply(event)?;
        Ok(())
    }
}
