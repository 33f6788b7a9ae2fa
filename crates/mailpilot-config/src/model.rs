use crate::ConfigError;
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:8000/";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub version: u32,
    pub profile_name: String,
    pub service: ServiceConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
    /// Organization context sent along with every draft generation.
    pub draft_context: String,
}

impl ServiceConfig {
    /// Parsed base URL, always ending in `/` so endpoint paths join under it.
    pub fn parsed_base_url(&self) -> Result<Url, ConfigError> {
        let trimmed = self.base_url.trim();
        if trimmed.ends_with('/') {
            Ok(Url::parse(trimmed)?)
        } else {
            Ok(Url::parse(&format!("{trimmed}/"))?)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub file_name: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVICE_URL.to_string(),
            draft_context: "Professional software development company".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            profile_name: "default".to_string(),
            service: ServiceConfig::default(),
            storage: StorageConfig {
                file_name: "mailpilot.sqlite3".to_string(),
            },
        }
    }
}
