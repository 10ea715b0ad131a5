//! AI request dispatch.
//!
//! - `ChatBackend`: the seam to a generative-language service
//! - `persona`: the assistant persona and per-language response hints
//! - `dispatcher`: one stateless round-trip per user message (`Dispatcher`)

mod dispatcher;
pub mod persona;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DispatchError;
use crate::session::{GroundingChunk, HistoryEntry};

pub use dispatcher::{AiReply, Dispatcher};
pub use persona::{Persona, RYTHU_MITRA};

/// A fully assembled request: history with the prompt as the final entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub system_instruction: String,
    pub contents: Vec<HistoryEntry>,
    /// Ask the backend to ground its answer with web search.
    pub enable_search: bool,
}

/// Normalized backend response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub text: String,
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

/// A generative-language service that can answer one request at a time.
///
/// Implementations hold no conversation state; everything they need arrives in
/// the [`GenerateRequest`].
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Short identifier for logs (e.g. the model name).
    fn name(&self) -> &str;

    async fn generate_content(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerateResponse, DispatchError>;
}
