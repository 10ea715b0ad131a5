//! Chat turn and citation types.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

/// A source reference attached to a grounded AI answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// One variant payload of a grounding chunk as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// A grounding chunk; carries either a `web` or a `retrievedContext` source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingChunk {
    #[serde(default)]
    pub web: Option<GroundingSource>,
    #[serde(default)]
    pub retrieved_context: Option<GroundingSource>,
}

impl Citation {
    pub fn new(uri: impl Into<String>, title: Option<String>) -> Self {
        Self {
            uri: uri.into(),
            title,
        }
    }

    /// Builds a citation from a grounding chunk. `web` is preferred over
    /// `retrievedContext`; chunks without any URI yield `None`.
    pub fn from_chunk(chunk: &GroundingChunk) -> Option<Self> {
        let web = chunk.web.as_ref();
        let retrieved = chunk.retrieved_context.as_ref();

        let uri = web
            .and_then(|s| s.uri.clone())
            .or_else(|| retrieved.and_then(|s| s.uri.clone()))
            .filter(|uri| !uri.trim().is_empty())?;
        let title = web
            .and_then(|s| s.title.clone())
            .or_else(|| retrieved.and_then(|s| s.title.clone()))
            .filter(|title| !title.trim().is_empty());

        Some(Self { uri, title })
    }

    /// Title to show, falling back to the URI.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.uri)
    }
}

/// A single message in a conversation.
///
/// Turns are immutable once created; fields are only readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    id: Uuid,
    text: String,
    sender: Sender,
    timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sources: Option<Vec<Citation>>,
}

impl ChatTurn {
    fn new(text: impl Into<String>, sender: Sender, sources: Option<Vec<Citation>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender,
            timestamp: Utc::now(),
            sources,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Sender::User, None)
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Ai, None)
    }

    /// An AI turn with citations; an empty list is stored as `None`.
    pub fn ai_with_sources(text: impl Into<String>, sources: Vec<Citation>) -> Self {
        let sources = if sources.is_empty() {
            None
        } else {
            Some(sources)
        };
        Self::new(text, Sender::Ai, sources)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn sources(&self) -> Option<&[Citation]> {
        self.sources.as_deref()
    }

    /// Local wall-clock time as `HH:MM`.
    pub fn display_time(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format("%H:%M")
            .to_string()
    }
}
