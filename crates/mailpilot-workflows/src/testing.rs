use async_trait::async_trait;
use mailpilot_ai::{AiBackend, AiError};
use mailpilot_core::{
    ClassificationBatch, DraftBatch, DraftRequest, ExtractionBatch, RefineRequest, RefinedDraft,
    SourceItem,
};
use std::collections::VecDeque;
use std::sync::Mutex;

pub(crate) enum Reply {
    Threads(Vec<SourceItem>),
    Summary(String),
    Classified(ClassificationBatch),
    Extracted(ExtractionBatch),
    Drafts(DraftBatch),
    Refined(RefinedDraft),
    Fail(AiError),
}

/// Backend that answers calls from a fixed script, in order.
#[derive(Default)]
pub(crate) struct ScriptedBackend {
    replies: Mutex<VecDeque<Reply>>,
    pub(crate) summarized: Mutex<Vec<String>>,
    pub(crate) submitted: Mutex<Vec<Vec<SourceItem>>>,
    pub(crate) draft_requests: Mutex<Vec<DraftRequest>>,
    pub(crate) refine_requests: Mutex<Vec<RefineRequest>>,
}

impl ScriptedBackend {
    pub(crate) fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Self::default()
        }
    }

    fn next(&self) -> Result<Reply, AiError> {
        match self.replies.lock().expect("script lock").pop_front() {
            Some(Reply::Fail(err)) => Err(err),
            Some(reply) => Ok(reply),
            None => Err(AiError::Shape("script exhausted".to_string())),
        }
    }
}

fn unexpected<T>() -> Result<T, AiError> {
    Err(AiError::Shape("reply does not match call".to_string()))
}

pub(crate) fn server_error() -> AiError {
    AiError::Protocol {
        status: 500,
        message: "model unavailable".to_string(),
    }
}

#[async_trait]
impl AiBackend for ScriptedBackend {
    async fn list_threads(&self) -> Result<Vec<SourceItem>, AiError> {
        match self.next()? {
            Reply::Threads(threads) => Ok(threads),
            _ => unexpected(),
        }
    }

    async fn summarize_thread(&self, thread_content: &str) -> Result<String, AiError> {
        self.summarized
            .lock()
            .expect("summarized lock")
            .push(thread_content.to_string());
        match self.next()? {
            Reply::Summary(summary) => Ok(summary),
            _ => unexpected(),
        }
    }

    async fn classify_emails(&self, emails: &[SourceItem]) -> Result<ClassificationBatch, AiError> {
        self.submitted.lock().expect("submitted lock").push(emails.to_vec());
        match self.next()? {
            Reply::Classified(batch) => Ok(batch),
            _ => unexpected(),
        }
    }

    async fn extract_action_items(
        &self,
        emails: &[SourceItem],
    ) -> Result<ExtractionBatch, AiError> {
        self.submitted.lock().expect("submitted lock").push(emails.to_vec());
        match self.next()? {
            Reply::Extracted(batch) => Ok(batch),
            _ => unexpected(),
        }
    }

    async fn generate_drafts(&self, request: &DraftRequest) -> Result<DraftBatch, AiError> {
        self.draft_requests
            .lock()
            .expect("draft lock")
            .push(request.clone());
        match self.next()? {
            Reply::Drafts(batch) => Ok(batch),
            _ => unexpected(),
        }
    }

    async fn refine_draft(&self, request: &RefineRequest) -> Result<RefinedDraft, AiError> {
        self.refine_requests
            .lock()
            .expect("refine lock")
            .push(request.clone());
        match self.next()? {
            Reply::Refined(refined) => Ok(refined),
            _ => unexpected(),
        }
    }
}
