//! History windowing: the bounded request context sent to the AI backend.

use serde::{Deserialize, Serialize};

use super::message::{ChatTurn, Sender};

/// Default number of previous turns forwarded with each request.
pub const MAX_HISTORY: usize = 10;

/// Role names expected by the generative-language API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryRole {
    User,
    Model,
}

impl HistoryRole {
    pub fn as_str(self) -> &'static str {
        match self {
            HistoryRole::User => "user",
            HistoryRole::Model => "model",
        }
    }
}

impl From<Sender> for HistoryRole {
    fn from(sender: Sender) -> Self {
        match sender {
            Sender::User => HistoryRole::User,
            Sender::Ai => HistoryRole::Model,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: HistoryRole,
    pub content: String,
}

impl HistoryEntry {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: HistoryRole::User,
            content: content.into(),
        }
    }
}

impl From<&ChatTurn> for HistoryEntry {
    fn from(turn: &ChatTurn) -> Self {
        Self {
            role: turn.sender().into(),
            content: turn.text().to_string(),
        }
    }
}

/// Maps the last `max` turns to request entries. Trimming is by turn count
/// only; turn length is not bounded here.
pub fn window(turns: &[ChatTurn], max: usize) -> Vec<HistoryEntry> {
    let start = turns.len().saturating_sub(max);
    turns[start..].iter().map(HistoryEntry::from).collect()
}

/// Appends the outbound prompt as the trailing `user` entry.
pub fn with_prompt(mut history: Vec<HistoryEntry>, prompt: impl Into<String>) -> Vec<HistoryEntry> {
    history.push(HistoryEntry::user(prompt));
    history
}
