//! Configuration types.
//!
//! `config.toml` carries non-secret settings; `secret.json` carries the
//! Gemini credential. Loading from disk lives in `rythu-interaction`.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::Result;
use crate::language::Language;
use crate::session::MAX_HISTORY;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Root structure of secret.json
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
}

/// Gemini API credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

impl SecretConfig {
    /// The configured key, ignoring blank values.
    pub fn gemini_api_key(&self) -> Option<&str> {
        self.gemini
            .as_ref()
            .map(|g| g.api_key.trim())
            .filter(|key| !key.is_empty())
    }

    pub fn gemini_model(&self) -> Option<&str> {
        self.gemini.as_ref().and_then(|g| g.model_name.as_deref())
    }
}

/// `[chat]` section of config.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSettings {
    pub model: String,
    /// Previous turns forwarded with each request.
    pub max_history: usize,
    /// Client-side bound on one AI round-trip. Zero disables it.
    pub request_timeout_secs: u64,
    /// Enable search grounding on requests.
    pub enable_search: bool,
    pub default_language: Language,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_GEMINI_MODEL.to_string(),
            max_history: MAX_HISTORY,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            enable_search: true,
            default_language: Language::DEFAULT,
        }
    }
}

impl ChatSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

/// Root structure of config.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub chat: ChatSettings,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            chat: ChatSettings::default(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
