use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use super::persona::{Persona, RYTHU_MITRA};
use super::{ChatBackend, GenerateRequest};
use crate::error::{DispatchError, DispatchErrorKind};
use crate::i18n::{Catalog, TextKey, Translator};
use crate::language::Language;
use crate::session::{self, ChatTurn, Citation};

/// Outcome of one dispatch, always renderable as an AI turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiReply {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<Citation>>,
    /// Set when `text` is a failure notice rather than model output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<DispatchErrorKind>,
}

impl AiReply {
    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }

    pub fn into_turn(self) -> ChatTurn {
        match self.sources {
            Some(sources) => ChatTurn::ai_with_sources(self.text, sources),
            None => ChatTurn::ai(self.text),
        }
    }
}

/// Performs one round-trip to the backend per user message.
///
/// Holds no conversation state. Callers must keep at most one call
/// outstanding per conversation; nothing here enforces it.
#[derive(Clone)]
pub struct Dispatcher {
    backend: Arc<dyn ChatBackend>,
    catalog: Arc<Catalog>,
    persona: Persona,
    enable_search: bool,
    timeout: Option<Duration>,
}

impl Dispatcher {
    pub fn new(backend: Arc<dyn ChatBackend>, catalog: Arc<Catalog>) -> Self {
        Self {
            backend,
            catalog,
            persona: RYTHU_MITRA.clone(),
            enable_search: true,
            timeout: None,
        }
    }

    pub fn with_persona(mut self, persona: Persona) -> Self {
        self.persona = persona;
        self
    }

    pub fn with_search(mut self, enabled: bool) -> Self {
        self.enable_search = enabled;
        self
    }

    /// Bounds each backend call; `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Assembles the request: system instruction, `history` in order, then
    /// the prompt as the final user entry.
    pub fn build_request(
        &self,
        prompt: &str,
        history: &[ChatTurn],
        language: Language,
    ) -> GenerateRequest {
        let contents =
            session::with_prompt(session::window(history, history.len()), prompt.trim());
        GenerateRequest {
            system_instruction: self.persona.system_instruction(language),
            contents,
            enable_search: self.enable_search,
        }
    }

    /// Sends `prompt` with the already-bounded `history` and normalizes the
    /// result. Failures come back as a localized reply, never as an error.
    pub async fn generate_content(
        &self,
        prompt: &str,
        history: &[ChatTurn],
        language: Language,
    ) -> AiReply {
        let request = self.build_request(prompt, history, language);
        debug!(
            backend = self.backend.name(),
            history_len = history.len(),
            language = %language,
            "Dispatching chat request"
        );

        let call = self.backend.generate_content(request);
        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .unwrap_or(Err(DispatchError::Timeout(limit))),
            None => call.await,
        };

        match result {
            Ok(response) => {
                let sources: Vec<Citation> = response
                    .grounding_chunks
                    .iter()
                    .filter_map(Citation::from_chunk)
                    .collect();
                debug!(citations = sources.len(), "Chat request completed");
                AiReply {
                    text: response.text,
                    sources: (!sources.is_empty()).then_some(sources),
                    failure: None,
                }
            }
            Err(err) => self.failure_reply(&err, language),
        }
    }

    fn failure_reply(&self, err: &DispatchError, language: Language) -> AiReply {
        let key = match err {
            DispatchError::NotConfigured => {
                warn!("AI backend has no API key configured");
                TextKey::ApiKeyNotConfigured
            }
            DispatchError::InvalidCredential(_) => {
                warn!(error = %err, "AI backend rejected the API key");
                TextKey::ApiKeyInvalid
            }
            DispatchError::MalformedResponse(_) => {
                error!(error = %err, "AI backend returned an unexpected response");
                TextKey::ErrorFetchingResponse
            }
            DispatchError::Transport { .. } | DispatchError::Timeout(_) => {
                warn!(error = %err, "AI request failed");
                TextKey::ErrorFetchingResponse
            }
        };

        AiReply {
            text: Translator::new(language, Arc::clone(&self.catalog)).t(key),
            sources: None,
            failure: Some(err.kind()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::GenerateResponse;
    use crate::session::{GroundingChunk, GroundingSource, HistoryRole};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct ScriptedBackend {
        result: Result<GenerateResponse, DispatchError>,
        seen: Mutex<Vec<GenerateRequest>>,
    }

    impl ScriptedBackend {
        fn new(result: Result<GenerateResponse, DispatchError>) -> Arc<Self> {
            Arc::new(Self {
                result,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ChatBackend for ScriptedBackend {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn generate_content(
            &self,
            request: GenerateRequest,
        ) -> Result<GenerateResponse, DispatchError> {
            self.seen.lock().unwrap().push(request);
            self.result.clone()
        }
    }

    fn dispatcher(backend: Arc<ScriptedBackend>) -> Dispatcher {
        Dispatcher::new(backend, Arc::new(Catalog::builtin()))
    }

    #[tokio::test]
    async fn test_request_shape() {
        let backend = ScriptedBackend::new(Ok(GenerateResponse {
            text: "Sow in June.".into(),
            grounding_chunks: Vec::new(),
        }));
        let history = vec![ChatTurn::ai("Namaste"), ChatTurn::user("hi"), ChatTurn::ai("hello")];

        let reply = dispatcher(backend.clone())
            .generate_content("  when to sow cotton?  ", &history, Language::Telugu)
            .await;

        assert_eq!(reply.text, "Sow in June.");
        assert!(reply.sources.is_none());
        assert!(!reply.is_failure());

        let seen = backend.seen.lock().unwrap();
        let request = &seen[0];
        assert!(request.enable_search);
        assert!(request.system_instruction.contains("respond in Telugu"));
        assert_eq!(request.contents.len(), 4);
        assert_eq!(request.contents[0].role, HistoryRole::Model);
        let last = request.contents.last().unwrap();
        assert_eq!(last.role, HistoryRole::User);
        assert_eq!(last.content, "when to sow cotton?");
    }

    #[tokio::test]
    async fn test_citations_keep_order_and_duplicates() {
        let web = |uri: &str, title: Option<&str>| GroundingChunk {
            web: Some(GroundingSource {
                uri: Some(uri.into()),
                title: title.map(Into::into),
            }),
            retrieved_context: None,
        };
        let backend = ScriptedBackend::new(Ok(GenerateResponse {
            text: "grounded".into(),
            grounding_chunks: vec![
                web("https://a", Some("A")),
                web("https://a", Some("A")),
                GroundingChunk::default(),
                web("https://c", None),
            ],
        }));

        let reply = dispatcher(backend)
            .generate_content("q", &[], Language::English)
            .await;

        let sources = reply.sources.unwrap();
        let uris: Vec<&str> = sources.iter().map(|c| c.uri.as_str()).collect();
        assert_eq!(uris, ["https://a", "https://a", "https://c"]);
        assert_eq!(sources[2].display_title(), "https://c");
    }

    #[tokio::test]
    async fn test_not_configured_returns_fixed_text() {
        let backend = ScriptedBackend::new(Err(DispatchError::NotConfigured));
        let reply = dispatcher(backend)
            .generate_content("hello", &[], Language::English)
            .await;

        assert_eq!(reply.text, "API Key not configured. Please contact support.");
        assert_eq!(reply.failure, Some(DispatchErrorKind::Configuration));
        assert!(reply.sources.is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_is_localized() {
        let backend = ScriptedBackend::new(Err(DispatchError::transport(Some(500), "boom")));
        let reply = dispatcher(backend)
            .generate_content("hello", &[], Language::Telugu)
            .await;

        let expected = Translator::builtin(Language::Telugu).t(TextKey::ErrorFetchingResponse);
        assert_eq!(reply.text, expected);
        assert!(!reply.text.contains("boom"));
        assert_eq!(reply.failure, Some(DispatchErrorKind::Transport));
    }

    #[tokio::test]
    async fn test_malformed_response_treated_like_transport_for_user() {
        let backend =
            ScriptedBackend::new(Err(DispatchError::MalformedResponse("no candidates".into())));
        let reply = dispatcher(backend)
            .generate_content("hello", &[], Language::English)
            .await;

        let expected = Translator::builtin(Language::English).t(TextKey::ErrorFetchingResponse);
        assert_eq!(reply.text, expected);
        assert_eq!(reply.failure, Some(DispatchErrorKind::MalformedResponse));
    }

    struct StalledBackend;

    #[async_trait]
    impl ChatBackend for StalledBackend {
        fn name(&self) -> &str {
            "stalled"
        }

        async fn generate_content(
            &self,
            _request: GenerateRequest,
        ) -> Result<GenerateResponse, DispatchError> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_becomes_failure_reply() {
        let dispatcher = Dispatcher::new(Arc::new(StalledBackend), Arc::new(Catalog::builtin()))
            .with_timeout(Some(Duration::from_secs(10)));

        let reply = dispatcher
            .generate_content("hello", &[], Language::English)
            .await;

        assert_eq!(reply.failure, Some(DispatchErrorKind::Transport));
        assert_eq!(
            reply.text,
            Translator::builtin(Language::English).t(TextKey::ErrorFetchingResponse)
        );
    }

    #[test]
    fn test_reply_into_turn() {
        let reply = AiReply {
            text: "answer".into(),
            sources: Some(vec![Citation::new("https://a", None)]),
            failure: None,
        };
        let turn = reply.into_turn();
        assert!(!turn.is_user());
        assert_eq!(turn.sources().unwrap().len(), 1);
    }
}
