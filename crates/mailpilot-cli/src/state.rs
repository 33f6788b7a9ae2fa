use anyhow::Context;
use mailpilot_ai::{AiBackend, HttpAiBackend};
use mailpilot_config::{AppConfig, ConfigManager};
use mailpilot_core::SourceItem;
use mailpilot_storage::{CollectionStore, KeyValueStore, Storage};
use mailpilot_workflows::{ActionItemExtractor, Classifier, DraftGenerator, Summarizer};
use std::path::Path;
use std::sync::Arc;

pub struct AppState {
    pub(crate) config_manager: ConfigManager,
    pub(crate) config: AppConfig,
    storage: Storage,
    backend: Arc<dyn AiBackend>,
}

impl AppState {
    pub async fn initialize(api_url: Option<String>) -> anyhow::Result<Self> {
        let config_manager = ConfigManager::new().context("initialize config manager")?;
        let mut config = config_manager.load().context("load app config")?;
        if let Some(api_url) = api_url {
            config.service.base_url = api_url;
        }

        let base_url = config
            .service
            .parsed_base_url()
            .context("parse AI service base url")?;

        let db_path = config_manager.data_dir().join(&config.storage.file_name);
        let storage = Storage::connect(&db_path)
            .await
            .context("initialize sqlite storage")?;

        let backend = HttpAiBackend::new(base_url);
        tracing::debug!(service = %backend.base_url(), db = %db_path.display(), "app state ready");

        Ok(Self {
            config_manager,
            config,
            storage,
            backend: Arc::new(backend),
        })
    }

    pub async fn summarizer(&self) -> Summarizer {
        let store: Arc<dyn KeyValueStore> = Arc::new(self.storage.clone());
        Summarizer::with_store(self.backend.clone(), store).await
    }

    pub fn classifier(&self, input: Option<&Path>) -> anyhow::Result<Classifier> {
        Ok(match input {
            Some(path) => Classifier::new(self.backend.clone(), load_emails(path)?),
            None => Classifier::with_seed(self.backend.clone()),
        })
    }

    pub fn extractor(&self, input: Option<&Path>) -> anyhow::Result<ActionItemExtractor> {
        Ok(match input {
            Some(path) => ActionItemExtractor::new(self.backend.clone(), load_emails(path)?),
            None => ActionItemExtractor::with_seed(self.backend.clone()),
        })
    }

    pub fn draft_generator(&self) -> DraftGenerator {
        DraftGenerator::with_seed(self.backend.clone(), self.config.service.draft_context.clone())
    }
}

/// Reads a JSON array of emails into an unmirrored collection.
pub(crate) fn load_emails(path: &Path) -> anyhow::Result<CollectionStore> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read emails from {}", path.display()))?;
    let emails: Vec<SourceItem> = serde_json::from_str(&raw)
        .with_context(|| format!("parse emails in {}", path.display()))?;
    Ok(CollectionStore::in_memory(emails))
}
