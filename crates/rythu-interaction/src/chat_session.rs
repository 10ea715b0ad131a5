//! One conversation session: the store, the active language and the
//! single outstanding AI request.

use rythu_core::agent::Dispatcher;
use rythu_core::config::ChatSettings;
use rythu_core::error::{Result, RythuError};
use rythu_core::i18n::{Catalog, TextKey, Translator};
use rythu_core::language::Language;
use rythu_core::session::{ChatTurn, ConversationStore};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

/// Number of turns up to which quick questions are still offered.
const SUGGESTION_TURN_LIMIT: usize = 2;

struct SessionState {
    store: ConversationStore,
    language: Language,
    /// Bumped on every reset so replies from a discarded conversation can be
    /// recognized and dropped.
    epoch: u64,
}

/// Clears the pending flag when a dispatch settles or its future is dropped.
struct PendingFlag<'a>(&'a AtomicBool);

impl<'a> PendingFlag<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Release);
        Self(flag)
    }
}

impl Drop for PendingFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Manages a chat conversation against one AI backend.
///
/// At most one dispatch runs at a time. A second `send_message` while one is
/// outstanding fails with [`RythuError::RequestInFlight`] instead of queueing.
pub struct ChatSession {
    dispatcher: Dispatcher,
    catalog: Arc<Catalog>,
    max_history: usize,
    state: RwLock<SessionState>,
    dispatch_guard: Mutex<()>,
    pending: AtomicBool,
}

impl ChatSession {
    /// Creates a session seeded with the greeting for `language`.
    pub fn new(
        dispatcher: Dispatcher,
        catalog: Arc<Catalog>,
        settings: &ChatSettings,
        language: Language,
    ) -> Self {
        let mut store = ConversationStore::new();
        let greeting = Translator::new(language, Arc::clone(&catalog));
        store.reset(greeting.t(TextKey::ChatbotInitialMessage));

        Self {
            dispatcher,
            catalog,
            max_history: settings.max_history,
            state: RwLock::new(SessionState {
                store,
                language,
                epoch: 0,
            }),
            dispatch_guard: Mutex::new(()),
            pending: AtomicBool::new(false),
        }
    }

    /// Sends a user message and appends exactly one AI turn for it.
    ///
    /// The returned turn is either the model's answer or a localized failure
    /// notice; dispatch failures never surface as `Err`.
    ///
    /// # Errors
    ///
    /// - [`RythuError::EmptyMessage`] for blank input
    /// - [`RythuError::RequestInFlight`] when another message is outstanding
    /// - [`RythuError::SessionReset`] when the language changed mid-request;
    ///   the reply is discarded
    ///
    /// # Cancellation
    ///
    /// The user turn is appended before the backend is called. Dropping the
    /// returned future after that point leaves it in the conversation without
    /// an AI turn, and later requests carry it as history. The session is
    /// released either way.
    pub async fn send_message(&self, text: &str) -> Result<ChatTurn> {
        let prompt = text.trim();
        if prompt.is_empty() {
            return Err(RythuError::EmptyMessage);
        }

        let _in_flight = self
            .dispatch_guard
            .try_lock()
            .map_err(|_| RythuError::RequestInFlight)?;
        let _pending = PendingFlag::raise(&self.pending);

        let (history, language, epoch) = {
            let mut state = self.state.write().await;
            let history = state.store.recent(self.max_history).to_vec();
            state.store.append(ChatTurn::user(prompt))?;
            (history, state.language, state.epoch)
        };

        debug!(history = history.len(), language = %language, "Sending chat message");
        let reply = self
            .dispatcher
            .generate_content(prompt, &history, language)
            .await;

        let mut state = self.state.write().await;
        if state.epoch != epoch {
            info!(
                started_in = %language,
                now = %state.language,
                "Conversation was reset during the request; dropping reply"
            );
            return Err(RythuError::SessionReset);
        }

        if reply.is_failure() {
            warn!(kind = ?reply.failure, "Appending failure notice to conversation");
        }
        let turn = reply.into_turn();
        state.store.append(turn.clone())?;
        Ok(turn)
    }

    /// Switches the active language. Any change clears the conversation and
    /// seeds the new language's greeting.
    pub async fn set_language(&self, language: Language) {
        let mut state = self.state.write().await;
        if state.language == language {
            return;
        }

        info!(from = %state.language, to = %language, "Switching language; conversation reset");
        let greeting = self.translator_for(language).t(TextKey::ChatbotInitialMessage);
        state.store.reset(greeting);
        state.language = language;
        state.epoch += 1;
    }

    /// Snapshot of all turns in display order.
    pub async fn turns(&self) -> Vec<ChatTurn> {
        self.state.read().await.store.turns().to_vec()
    }

    pub async fn language(&self) -> Language {
        self.state.read().await.language
    }

    /// True while a dispatch is outstanding; callers disable input on it.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    pub async fn translator(&self) -> Translator {
        self.translator_for(self.language().await)
    }

    /// Localized quick questions, offered only at the start of a conversation.
    pub async fn suggested_questions(&self) -> Vec<String> {
        let state = self.state.read().await;
        if state.store.len() > SUGGESTION_TURN_LIMIT {
            return Vec::new();
        }

        let t = self.translator_for(state.language);
        [
            TextKey::ChatbotSuggestedQuestion1,
            TextKey::ChatbotSuggestedQuestion2,
            TextKey::ChatbotSuggestedQuestion3,
        ]
        .into_iter()
        .map(|key| t.t(key))
        .collect()
    }

    /// Speech-recognition locale for the active language.
    pub async fn voice_locale(&self) -> &'static str {
        self.language().await.speech_locale()
    }

    fn translator_for(&self, language: Language) -> Translator {
        Translator::new(language, Arc::clone(&self.catalog))
    }
}
