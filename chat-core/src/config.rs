use serde::{Deserialize, Serialize};

use crate::{REVEAL_CHUNK_SIZE, REVEAL_INTERVAL_MS, STORAGE_KEY, WELCOME_TEXT};

/// Tunables for a chat session.
///
/// Missing fields fall back to the defaults, so a partial JSON object is a
/// valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub storage_key: String,
    pub welcome_text: String,
    pub reveal_interval_ms: u32,
    pub reveal_chunk_size: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            welcome_text: WELCOME_TEXT.to_string(),
            reveal_interval_ms: REVEAL_INTERVAL_MS,
            reveal_chunk_size: REVEAL_CHUNK_SIZE,
        }
    }
}

impl ChatConfig {
    /// Chunk size clamped to at least one character so a reveal always
    /// makes progress.
    pub fn chunk_size(&self) -> usize {
        self.reveal_chunk_size.max(1)
    }
}
