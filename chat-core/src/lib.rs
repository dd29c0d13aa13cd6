//! Core of Light Chat
//!
//! Everything both front ends share lives here:
//! - the persisted data model (messages + uploaded files)
//! - the controller that owns the state and persists after every mutation
//! - the simulated, chunk-by-chunk assistant reply
//! - file ingestion into self-contained data URLs
//! - the pure projection the renderers draw from
//!
//! The crate builds natively so all of the logic is testable without a
//! browser. Enable the `web` feature for the `localStorage` and `File`
//! adapters.

pub mod config;
pub mod controller;
pub mod error;
pub mod ingest;
pub mod model;
pub mod reply;
pub mod store;
pub mod view;

#[cfg(feature = "web")]
pub mod web;

pub use config::ChatConfig;
pub use controller::{ChatController, StreamHandle, StreamTick};
pub use error::{ChatError, Result};
pub use ingest::{encode_data_url, ingest, next_file_id, unique_file_id, FileSource};
pub use model::{ChatState, FileRecord, Message, Role};
pub use reply::{compose_reply, AssistantMode, RevealStream, StreamPhase};
pub use store::{decode_state, Decoded, KeyValueStore, MemoryStore, StateStore};
pub use view::{project_files, project_messages, FileView, MessageView, SidebarTab};

// ============================================================================
// Constants
// ============================================================================

/// Single `localStorage` key, shared by both front ends
pub const STORAGE_KEY: &str = "light_chat_state_v2";

/// Seeded assistant greeting on first run and after "clear all"
pub const WELCOME_TEXT: &str = "Hello! Ask me anything.";

pub const REVEAL_INTERVAL_MS: u32 = 25;
pub const REVEAL_CHUNK_SIZE: usize = 3;
