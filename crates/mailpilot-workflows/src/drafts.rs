use crate::seed;
use mailpilot_ai::AiBackend;
use mailpilot_core::{
    Draft, DraftBatch, DraftRequest, ItemId, RefineRequest, RefinedDraft, SourceItem,
    StatusEvent, Tone, WorkflowError, WorkflowStatus,
};
use mailpilot_storage::CollectionStore;
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingDraft {
    Generate,
    Refine(Tone),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftState {
    pub status: WorkflowStatus,
    pub selected_thread: Option<ItemId>,
    /// One draft per tone, in the order the service returned them.
    pub drafts: Vec<Draft>,
    pub active_tone: Option<Tone>,
    pending: Option<PendingDraft>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DraftEvent {
    SelectThread(Option<ItemId>),
    GenerateRequested,
    Generated(DraftBatch),
    RefineRequested(Tone),
    Refined(RefinedDraft),
    Failed(String),
    SelectDraft(Tone),
}

impl DraftState {
    pub fn apply(&self, event: DraftEvent) -> Result<Self, WorkflowError> {
        let mut next = self.clone();
        match event {
            DraftEvent::SelectThread(id) => {
                if self.status.is_in_flight() {
                    return Err(WorkflowError::AlreadyInFlight);
                }
                if self.selected_thread != id {
                    next.drafts.clear();
                    next.active_tone = None;
                }
                next.selected_thread = id;
            }
            DraftEvent::GenerateRequested => {
                if self.selected_thread.is_none() {
                    return Err(WorkflowError::MissingSelection("thread"));
                }
                next.status = self.status.transition(StatusEvent::Request)?;
                next.pending = Some(PendingDraft::Generate);
            }
            DraftEvent::Generated(batch) => {
                if self.pending != Some(PendingDraft::Generate) {
                    return Err(WorkflowError::NothingInFlight);
                }
                next.pending = None;
                match repeated_tone(&batch.drafts) {
                    Some(tone) => {
                        next.status = self.status.transition(StatusEvent::Fail(format!(
                            "draft batch contains tone `{tone}` more than once"
                        )))?;
                    }
                    None => {
                        next.status = self.status.transition(StatusEvent::Succeed)?;
                        next.active_tone = batch.drafts.first().map(|draft| draft.tone);
                        next.drafts = batch.drafts;
                    }
                }
            }
            DraftEvent::RefineRequested(tone) => {
                if self.draft(tone).is_none() {
                    return Err(WorkflowError::UnknownTone(tone));
                }
                next.status = self.status.transition(StatusEvent::Request)?;
                next.pending = Some(PendingDraft::Refine(tone));
            }
            DraftEvent::Refined(refined) => {
                let Some(PendingDraft::Refine(tone)) = self.pending else {
                    return Err(WorkflowError::NothingInFlight);
                };
                next.status = self.status.transition(StatusEvent::Succeed)?;
                next.pending = None;
                if let Some(draft) = next.drafts.iter_mut().find(|draft| draft.tone == tone) {
                    draft.body = refined.body;
                    draft.preview = refined.preview;
                }
            }
            DraftEvent::Failed(message) => {
                next.status = self.status.transition(StatusEvent::Fail(message))?;
                next.pending = None;
            }
            DraftEvent::SelectDraft(tone) => {
                if self.draft(tone).is_none() {
                    return Err(WorkflowError::UnknownTone(tone));
                }
                next.active_tone = Some(tone);
            }
        }
        Ok(next)
    }

    pub fn draft(&self, tone: Tone) -> Option<&Draft> {
        self.drafts.iter().find(|draft| draft.tone == tone)
    }

    pub fn active_draft(&self) -> Option<&Draft> {
        self.active_tone.and_then(|tone| self.draft(tone))
    }
}

fn repeated_tone(drafts: &[Draft]) -> Option<Tone> {
    let mut seen = BTreeSet::new();
    drafts
        .iter()
        .map(|draft| draft.tone)
        .find(|tone| !seen.insert(*tone))
}

/// Generates one reply per tone for a thread, then refines the active one.
pub struct DraftGenerator {
    backend: Arc<dyn AiBackend>,
    threads: CollectionStore,
    context: String,
    state: DraftState,
}

impl DraftGenerator {
    pub fn new(
        backend: Arc<dyn AiBackend>,
        threads: CollectionStore,
        context: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            threads,
            context: context.into(),
            state: DraftState::default(),
        }
    }

    pub fn with_seed(backend: Arc<dyn AiBackend>, context: impl Into<String>) -> Self {
        Self::new(
            backend,
            CollectionStore::in_memory(seed::reply_threads()),
            context,
        )
    }

    pub fn state(&self) -> &DraftState {
        &self.state
    }

    pub fn threads(&self) -> &[SourceItem] {
        self.threads.list()
    }

    pub fn drafts(&self) -> &[Draft] {
        &self.state.drafts
    }

    pub fn active_draft(&self) -> Option<&Draft> {
        self.state.active_draft()
    }

    pub fn selected_thread(&self) -> Option<&SourceItem> {
        self.state.selected_thread.and_then(|id| self.threads.get(id))
    }

    pub fn select_thread(&mut self, id: Option<ItemId>) -> Result<(), WorkflowError> {
        if let Some(id) = id {
            if !self.threads.contains(id) {
                return Err(WorkflowError::UnknownItem(id.to_string()));
            }
        }
        self.dispatch(DraftEvent::SelectThread(id))
    }

    pub fn select_draft(&mut self, tone: Tone) -> Result<(), WorkflowError> {
        self.dispatch(DraftEvent::SelectDraft(tone))
    }

    pub async fn generate(&mut self) -> Result<(), WorkflowError> {
        let thread = self
            .selected_thread()
            .cloned()
            .ok_or(WorkflowError::MissingSelection("thread"))?;
        self.dispatch(DraftEvent::GenerateRequested)?;

        let request = DraftRequest {
            original_subject: thread.subject,
            original_sender: thread.sender,
            thread_content: thread.content,
            context: self.context.clone(),
        };
        tracing::info!(workflow = "draft", thread = %thread.id, "generating drafts");
        match self.backend.generate_drafts(&request).await {
            Ok(batch) => {
                self.dispatch(DraftEvent::Generated(batch))?;
                if let Some(message) = self.state.status.error_message() {
                    tracing::warn!(workflow = "draft", thread = %thread.id, "{message}");
                }
                Ok(())
            }
            Err(err) => {
                tracing::warn!(workflow = "draft", thread = %thread.id, "generation failed: {err}");
                self.dispatch(DraftEvent::Failed(err.to_string()))
            }
        }
    }

    /// Rewrites the active draft according to `feedback`.
    pub async fn refine(&mut self, feedback: &str) -> Result<(), WorkflowError> {
        let draft = self
            .active_draft()
            .cloned()
            .ok_or(WorkflowError::MissingSelection("draft"))?;
        let feedback = feedback.trim();
        if feedback.is_empty() {
            return Err(WorkflowError::EmptyFeedback);
        }
        self.dispatch(DraftEvent::RefineRequested(draft.tone))?;

        let request = RefineRequest {
            current_draft: draft.body,
            feedback: feedback.to_string(),
            tone: draft.tone,
        };
        tracing::info!(workflow = "draft", tone = %draft.tone, "refining draft");
        match self.backend.refine_draft(&request).await {
            Ok(refined) => self.dispatch(DraftEvent::Refined(refined)),
            Err(err) => {
                tracing::warn!(workflow = "draft", tone = %draft.tone, "refinement failed: {err}");
                self.dispatch(DraftEvent::Failed(err.to_string()))
            }
        }
    }

    fn dispatch(&mut self, event: DraftEvent) -> Result<(), WorkflowError> {
        self.state = self.state.apply(event)?;
        Ok(())
    }
}
