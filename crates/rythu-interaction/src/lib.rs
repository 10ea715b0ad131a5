//! Session orchestration and the Gemini backend for Rythu Mitra.
//!
//! - `chat_session`: [`ChatSession`], the single-flight conversation driver
//! - `gemini_api_agent`: [`GeminiApiAgent`], the Gemini REST backend
//! - `config`: loading `config.toml` / `secret.json`

pub mod chat_session;
pub mod config;
pub mod gemini_api_agent;

use std::sync::Arc;

use rythu_core::agent::Dispatcher;
use rythu_core::config::{AppConfig, SecretConfig};
use rythu_core::i18n::Catalog;
use tracing::{info, warn};

pub use chat_session::ChatSession;
pub use gemini_api_agent::GeminiApiAgent;

/// Wires a [`ChatSession`] to Gemini using the loaded configuration.
///
/// A missing credential is not an error here; every message then receives
/// the "not configured" notice.
pub fn gemini_session(config: &AppConfig, secrets: &SecretConfig) -> ChatSession {
    let settings = &config.chat;
    let model = secrets.gemini_model().unwrap_or(&settings.model);
    let agent = GeminiApiAgent::from_secrets(secrets).with_model(model);
    if agent.has_credential() {
        info!(model, "Gemini backend ready");
    } else {
        warn!("No Gemini API key configured; replies will report it");
    }

    let catalog = Arc::new(Catalog::builtin());
    let dispatcher = Dispatcher::new(Arc::new(agent), Arc::clone(&catalog))
        .with_search(settings.enable_search)
        .with_timeout(settings.request_timeout());

    ChatSession::new(dispatcher, catalog, settings, settings.default_language)
}
