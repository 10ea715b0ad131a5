use async_trait::async_trait;
use rythu_core::agent::{ChatBackend, Dispatcher, GenerateRequest, GenerateResponse};
use rythu_core::config::{AppConfig, ChatSettings, SecretConfig};
use rythu_core::error::{DispatchError, RythuError};
use rythu_core::i18n::{Catalog, TextKey, Translator};
use rythu_core::language::Language;
use rythu_core::session::{GroundingChunk, GroundingSource, Sender};
use rythu_interaction::{ChatSession, GeminiApiAgent, gemini_session};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

/// Backend that parks every call until released.
struct GatedBackend {
    calls: AtomicUsize,
    entered: Notify,
    release: Notify,
    response: GenerateResponse,
}

impl GatedBackend {
    fn new(response: GenerateResponse) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            entered: Notify::new(),
            release: Notify::new(),
            response,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatBackend for GatedBackend {
    fn name(&self) -> &str {
        "gated"
    }

    async fn generate_content(
        &self,
        _request: GenerateRequest,
    ) -> Result<GenerateResponse, DispatchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        self.release.notified().await;
        Ok(self.response.clone())
    }
}

fn reply(text: &str) -> GenerateResponse {
    GenerateResponse {
        text: text.to_string(),
        grounding_chunks: Vec::new(),
    }
}

fn session_with(backend: Arc<dyn ChatBackend>, language: Language) -> Arc<ChatSession> {
    let catalog = Arc::new(Catalog::builtin());
    let dispatcher = Dispatcher::new(backend, Arc::clone(&catalog));
    Arc::new(ChatSession::new(
        dispatcher,
        catalog,
        &ChatSettings::default(),
        language,
    ))
}

#[tokio::test]
async fn second_submission_is_rejected_while_first_is_pending() {
    let backend = GatedBackend::new(reply("Sow cotton after the first good rains."));
    let session = session_with(backend.clone(), Language::English);

    let first = tokio::spawn({
        let session = Arc::clone(&session);
        async move { session.send_message("When to sow cotton?").await }
    });
    backend.entered.notified().await;
    assert!(session.is_pending());

    let second = session.send_message("And paddy?").await;
    assert_eq!(second.unwrap_err(), RythuError::RequestInFlight);

    backend.release.notify_one();
    let turn = first.await.unwrap().unwrap();
    assert_eq!(turn.text(), "Sow cotton after the first good rains.");

    assert_eq!(backend.calls(), 1);
    assert!(!session.is_pending());
    let turns = session.turns().await;
    let user_turns: Vec<_> = turns.iter().filter(|t| t.is_user()).collect();
    assert_eq!(user_turns.len(), 1);
    assert_eq!(user_turns[0].text(), "When to sow cotton?");
}

#[tokio::test]
async fn missing_key_produces_fixed_notice_turn() {
    let session = gemini_session(&AppConfig::default(), &SecretConfig::default());
    session.set_language(Language::English).await;

    let turn = session.send_message("hello").await.unwrap();
    assert_eq!(turn.sender(), Sender::Ai);
    assert_eq!(turn.text(), "API Key not configured. Please contact support.");
    assert!(turn.sources().is_none());

    let turns = session.turns().await;
    assert_eq!(turns.len(), 3);
    assert_eq!(turns[1].text(), "hello");
}

#[tokio::test]
async fn agent_without_key_is_not_configured() {
    let agent = GeminiApiAgent::new(None, "gemini-2.5-flash");
    let session = session_with(Arc::new(agent), Language::Telugu);

    let turn = session.send_message("నమస్కారం").await.unwrap();
    assert_eq!(
        turn.text(),
        Translator::builtin(Language::Telugu).t(TextKey::ApiKeyNotConfigured)
    );
}

#[tokio::test]
async fn switching_language_resets_conversation() {
    let backend = GatedBackend::new(reply("Hello farmer!"));
    let session = session_with(backend.clone(), Language::English);
    let english_greeting = session.turns().await[0].text().to_string();

    backend.release.notify_one();
    session.send_message("hi").await.unwrap();
    assert_eq!(session.turns().await.len(), 3);

    session.set_language(Language::Telugu).await;

    let turns = session.turns().await;
    assert_eq!(turns.len(), 1);
    assert_eq!(turns[0].sender(), Sender::Ai);
    assert_ne!(turns[0].text(), english_greeting);
    assert_eq!(
        turns[0].text(),
        Translator::builtin(Language::Telugu).t(TextKey::ChatbotInitialMessage)
    );
    assert_eq!(session.language().await, Language::Telugu);
}

#[tokio::test]
async fn reply_arriving_after_reset_is_dropped() {
    let backend = GatedBackend::new(reply("late answer"));
    let session = session_with(backend.clone(), Language::English);

    let pending = tokio::spawn({
        let session = Arc::clone(&session);
        async move { session.send_message("hi").await }
    });
    backend.entered.notified().await;

    session.set_language(Language::Hindi).await;
    backend.release.notify_one();

    assert_eq!(pending.await.unwrap().unwrap_err(), RythuError::SessionReset);
    let turns = session.turns().await;
    assert_eq!(turns.len(), 1);
    assert!(turns.iter().all(|t| t.text() != "late answer"));
}

#[tokio::test]
async fn grounding_chunks_become_ordered_citations() {
    let web = |uri: &str, title: &str| GroundingChunk {
        web: Some(GroundingSource {
            uri: Some(uri.to_string()),
            title: Some(title.to_string()),
        }),
        retrieved_context: None,
    };
    let backend = GatedBackend::new(GenerateResponse {
        text: "Rythu Bandhu pays per acre each season.".into(),
        grounding_chunks: vec![
            web("https://a.example/scheme", "Scheme page"),
            GroundingChunk {
                web: None,
                retrieved_context: Some(GroundingSource {
                    uri: Some("https://b.example/news".into()),
                    title: None,
                }),
            },
            web("https://a.example/scheme", "Scheme page"),
        ],
    });
    let session = session_with(backend.clone(), Language::English);

    backend.release.notify_one();
    let turn = session.send_message("Tell me about Rythu Bandhu").await.unwrap();

    let sources = turn.sources().unwrap();
    assert_eq!(sources.len(), 3);
    assert_eq!(sources[0].display_title(), "Scheme page");
    assert_eq!(sources[1].title, None);
    assert_eq!(sources[1].display_title(), "https://b.example/news");
    assert_eq!(sources[2].uri, "https://a.example/scheme");

    let stored = session.turns().await;
    assert_eq!(stored.last().unwrap().sources(), Some(sources));
}

#[tokio::test]
async fn blank_message_never_reaches_backend() {
    let backend = GatedBackend::new(reply("unused"));
    let session = session_with(backend.clone(), Language::English);

    assert_eq!(
        session.send_message("   ").await.unwrap_err(),
        RythuError::EmptyMessage
    );
    assert_eq!(backend.calls(), 0);
    assert_eq!(session.turns().await.len(), 1);
}

#[tokio::test]
async fn cancelled_send_keeps_user_turn_and_frees_session() {
    let backend = GatedBackend::new(reply("Use pheromone traps."));
    let session = session_with(backend.clone(), Language::English);

    let abandoned = tokio::spawn({
        let session = Arc::clone(&session);
        async move { session.send_message("Pink bollworm?").await }
    });
    backend.entered.notified().await;
    assert!(session.is_pending());

    abandoned.abort();
    assert!(abandoned.await.unwrap_err().is_cancelled());
    assert!(!session.is_pending());

    // The unanswered question stays in the conversation.
    let turns = session.turns().await;
    assert_eq!(turns.len(), 2);
    assert!(turns[1].is_user());

    backend.release.notify_one();
    let turn = session.send_message("Pink bollworm in cotton?").await.unwrap();
    assert_eq!(turn.text(), "Use pheromone traps.");
    let turns = session.turns().await;
    assert_eq!(turns.len(), 4);
    assert!(turns[2].is_user());
    assert_eq!(backend.calls(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn pending_checks_never_block_a_send() {
    let backend = GatedBackend::new(reply("ok"));
    let session = session_with(backend.clone(), Language::English);

    let watcher = tokio::spawn({
        let session = Arc::clone(&session);
        async move {
            for _ in 0..10_000 {
                let _ = session.is_pending();
                tokio::task::yield_now().await;
            }
        }
    });

    for i in 0..50 {
        backend.release.notify_one();
        let turn = session.send_message(&format!("q{i}")).await.unwrap();
        assert_eq!(turn.text(), "ok");
    }
    watcher.await.unwrap();
    assert!(!session.is_pending());
}
