//! Append-only conversation store.

use super::message::ChatTurn;
use crate::error::{Result, RythuError};

/// Ordered sequence of turns for the active session.
///
/// Insertion order is display order. Turns are never removed individually or
/// reordered; the only way to drop turns is [`ConversationStore::reset`].
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    turns: Vec<ChatTurn>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a turn at the end. User turns must have non-blank text.
    pub fn append(&mut self, turn: ChatTurn) -> Result<()> {
        if turn.is_user() && turn.text().trim().is_empty() {
            return Err(RythuError::EmptyMessage);
        }
        self.turns.push(turn);
        Ok(())
    }

    /// The last `n` turns in insertion order, or all of them when fewer exist.
    pub fn recent(&self, n: usize) -> &[ChatTurn] {
        let start = self.turns.len().saturating_sub(n);
        &self.turns[start..]
    }

    /// Clears the conversation and seeds it with a single AI greeting.
    pub fn reset(&mut self, greeting: impl Into<String>) {
        self.turns.clear();
        self.turns.push(ChatTurn::ai(greeting));
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
