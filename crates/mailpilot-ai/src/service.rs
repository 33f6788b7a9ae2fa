use crate::AiError;
use async_trait::async_trait;
use mailpilot_core::{
    ClassificationBatch, DraftBatch, DraftRequest, ExtractionBatch, RefineRequest, RefinedDraft,
    SourceItem,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

const THREADS: &str = "threads";
const SUMMARIZE_THREAD: &str = "summarize-thread";
const CLASSIFY_EMAILS: &str = "classify-emails";
const EXTRACT_ACTION_ITEMS_BATCH: &str = "extract-action-items-batch";
const DRAFT_ALL_TONES: &str = "draft-reply-all-tones";
const REFINE_DRAFT: &str = "refine-draft";

/// Longest slice of a non-JSON error body kept in a protocol error.
const MAX_ERROR_BODY: usize = 200;

/// The remote service that performs summarization, classification,
/// extraction and drafting.
#[async_trait]
pub trait AiBackend: Send + Sync {
    async fn list_threads(&self) -> Result<Vec<SourceItem>, AiError>;

    async fn summarize_thread(&self, thread_content: &str) -> Result<String, AiError>;

    async fn classify_emails(&self, emails: &[SourceItem]) -> Result<ClassificationBatch, AiError>;

    async fn extract_action_items(&self, emails: &[SourceItem])
        -> Result<ExtractionBatch, AiError>;

    async fn generate_drafts(&self, request: &DraftRequest) -> Result<DraftBatch, AiError>;

    async fn refine_draft(&self, request: &RefineRequest) -> Result<RefinedDraft, AiError>;
}

#[derive(Serialize)]
struct SummarizeBody<'a> {
    thread_content: &'a str,
}

#[derive(Serialize)]
struct EmailsBody<'a> {
    emails: &'a [SourceItem],
}

#[derive(Deserialize)]
struct SummaryResponse {
    summary: String,
}

#[derive(Clone)]
pub struct HttpAiBackend {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpAiBackend {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, AiError> {
        self.base_url
            .join(path)
            .map_err(|err| AiError::Config(format!("cannot build `{path}` url: {err}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AiError> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "GET");
        let response = self.http.get(url).send().await?;
        read_json(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, AiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "POST");
        let response = self.http.post(url).json(body).send().await?;
        read_json(response).await
    }
}

#[async_trait]
impl AiBackend for HttpAiBackend {
    async fn list_threads(&self) -> Result<Vec<SourceItem>, AiError> {
        self.get_json(THREADS).await
    }

    async fn summarize_thread(&self, thread_content: &str) -> Result<String, AiError> {
        let response: SummaryResponse = self
            .post_json(SUMMARIZE_THREAD, &SummarizeBody { thread_content })
            .await?;
        Ok(response.summary)
    }

    async fn classify_emails(&self, emails: &[SourceItem]) -> Result<ClassificationBatch, AiError> {
        self.post_json(CLASSIFY_EMAILS, &EmailsBody { emails }).await
    }

    async fn extract_action_items(
        &self,
        emails: &[SourceItem],
    ) -> Result<ExtractionBatch, AiError> {
        self.post_json(EXTRACT_ACTION_ITEMS_BATCH, &EmailsBody { emails })
            .await
    }

    async fn generate_drafts(&self, request: &DraftRequest) -> Result<DraftBatch, AiError> {
        self.post_json(DRAFT_ALL_TONES, request).await
    }

    async fn refine_draft(&self, request: &RefineRequest) -> Result<RefinedDraft, AiError> {
        self.post_json(REFINE_DRAFT, request).await
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, AiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(AiError::Protocol {
            status: status.as_u16(),
            message: error_message(status, &body),
        });
    }

    serde_json::from_str(&body).map_err(|err| AiError::Shape(err.to_string()))
}

/// Prefers the `detail` field of a JSON error body, then the raw body.
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.pointer("/detail")
                .and_then(|value| value.as_str())
                .map(str::to_string)
        });
    if let Some(detail) = detail {
        return detail;
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_BODY).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn error_message_prefers_detail() {
        let message = error_message(
            StatusCode::BAD_REQUEST,
            r#"{"detail":"Email thread cannot be empty"}"#,
        );
        assert_eq!(message, "Email thread cannot be empty");
    }

    #[test]
    fn error_message_falls_back_to_reason() {
        assert_eq!(
            error_message(StatusCode::SERVICE_UNAVAILABLE, "  "),
            "Service Unavailable"
        );
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, "upstream died"), "upstream died");
    }

    #[test]
    fn endpoints_join_under_the_base_path() {
        let backend =
            HttpAiBackend::new(Url::parse("http://localhost:8000/api/").expect("valid url"));
        assert_eq!(
            backend.endpoint(REFINE_DRAFT).expect("endpoint").as_str(),
            "http://localhost:8000/api/refine-draft"
        );
    }
}
