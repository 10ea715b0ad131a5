//! Conversation domain module.
//!
//! # Module Structure
//!
//! - `message`: chat turns and grounding citations (`ChatTurn`, `Citation`)
//! - `store`: append-only ordered turn sequence (`ConversationStore`)
//! - `history`: bounded request context for the AI backend (`HistoryEntry`)

mod history;
mod message;
mod store;

pub use history::{HistoryEntry, HistoryRole, MAX_HISTORY, window, with_prompt};
pub use message::{ChatTurn, Citation, GroundingChunk, GroundingSource, Sender};
pub use store::ConversationStore;
