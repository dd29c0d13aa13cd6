//! Chat State controller
//!
//! Owns the [`ChatState`], the store it persists to and any in-flight reply
//! reveals. Every mutation persists immediately; a failed write is logged
//! and the in-memory state stays authoritative.

use std::collections::BTreeMap;

use crate::config::ChatConfig;
use crate::ingest::{next_file_id, unique_file_id};
use crate::model::{ChatState, FileRecord, Message, Role};
use crate::reply::{compose_reply, AssistantMode, RevealStream, StreamPhase};
use crate::store::{KeyValueStore, StateStore};
use crate::view::{project_files, project_messages, FileView, MessageView};

/// Outcome of advancing one reveal stream by a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamTick {
    /// A chunk was revealed and more remain.
    Revealed,
    /// The last chunk was revealed (or the stream was already done); the
    /// stream has been removed.
    Finished,
    /// No stream is registered for that handle, either because it ended or
    /// because its message slot now belongs to a newer stream.
    Unknown,
}

/// Identifies one reveal stream. `index` is the assistant message being
/// revealed; `id` is unique for the controller's lifetime, so a handle held
/// across `clear_all` never drives a stream that reuses the same index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamHandle {
    pub index: usize,
    id: u64,
}

pub struct ChatController<S> {
    state: ChatState,
    store: StateStore<S>,
    config: ChatConfig,
    streams: BTreeMap<usize, (u64, RevealStream)>,
    next_stream_id: u64,
}

impl<S: KeyValueStore> ChatController<S> {
    /// Load state from `store`, seeding the greeting on first run.
    pub fn hydrate(store: S, config: ChatConfig) -> Self {
        let store = StateStore::new(store, config.storage_key.clone());
        let state = store.load();
        let mut controller = Self {
            state,
            store,
            config,
            streams: BTreeMap::new(),
            next_stream_id: 0,
        };

        if controller.state.messages.is_empty() {
            log::info!("Seeding welcome message");
            controller
                .state
                .messages
                .push(Message::new(Role::Assistant, &controller.config.welcome_text));
            controller.persist();
        }
        controller
    }

    pub fn state(&self) -> &ChatState {
        &self.state
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    pub fn store(&self) -> &StateStore<S> {
        &self.store
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.state) {
            log::error!("Failed to persist chat state: {}", e);
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    pub fn append_message(&mut self, role: Role, text: &str, file: Option<&FileRecord>) -> usize {
        let mut msg = Message::new(role, text);
        if let Some(file) = file {
            msg = msg.with_file(file.id.clone());
        }
        self.state.messages.push(msg);
        self.persist();
        let index = self.state.messages.len() - 1;
        log::debug!("Appended {} message #{}", role.as_str(), index);
        index
    }

    pub fn begin_assistant_reply(&mut self) -> usize {
        self.append_message(Role::Assistant, "", None)
    }

    pub fn update_message_text(&mut self, index: usize, text: &str) {
        let Some(msg) = self.state.messages.get_mut(index) else {
            log::warn!("Ignoring text update for missing message #{}", index);
            return;
        };
        msg.text.clear();
        msg.text.push_str(text);
        self.persist();
    }

    /// Prepend `record`, re-suffixing its id if it collides. Returns the
    /// id it was stored under.
    pub fn add_file(&mut self, mut record: FileRecord) -> String {
        let id = unique_file_id(record.id.clone(), &self.state.files);
        if id != record.id {
            log::warn!("File id {} already taken, storing as {}", record.id, id);
            record.id = id.clone();
        }
        log::debug!("Adding file {} ({})", record.id, record.name);
        self.state.files.insert(0, record);
        self.persist();
        id
    }

    /// Remove a file. Messages referencing it are left as they are.
    pub fn delete_file(&mut self, id: &str) -> bool {
        let before = self.state.files.len();
        self.state.files.retain(|f| f.id != id);
        let removed = self.state.files.len() != before;
        if removed {
            log::debug!("Deleted file {}", id);
        }
        self.persist();
        removed
    }

    pub fn clear_all(&mut self) {
        self.streams.clear();
        self.state = ChatState::seeded(&self.config.welcome_text);
        self.persist();
        log::info!("Cleared all messages and files");
    }

    /// Post a user message that links to an uploaded file.
    pub fn attach_file(&mut self, id: &str) -> Option<usize> {
        let file = self.state.find_file(id)?.clone();
        Some(self.append_message(
            Role::User,
            &format!("Attached file: {}", file.name),
            Some(&file),
        ))
    }

    pub fn next_file_id(&self, now_millis: i64) -> String {
        next_file_id(now_millis, &self.state.files)
    }

    // ========================================================================
    // Reply streaming
    // ========================================================================

    /// Post the user's message and start the simulated reply. Returns the
    /// handle of the reveal stream for the new assistant message. Blank
    /// input is ignored.
    ///
    /// A send while another reply is still streaming starts a second,
    /// independent stream.
    pub fn send(&mut self, mode: AssistantMode, raw_text: &str) -> Option<StreamHandle> {
        let text = raw_text.trim();
        if text.is_empty() {
            return None;
        }

        self.append_message(Role::User, text, None);
        let full = compose_reply(mode, text);
        let index = self.begin_assistant_reply();
        let id = self.next_stream_id;
        self.next_stream_id += 1;
        self.streams.insert(
            index,
            (id, RevealStream::new(index, full, self.config.chunk_size())),
        );
        log::debug!("Started {} reply stream #{} for message #{}", mode, id, index);
        Some(StreamHandle { index, id })
    }

    pub fn advance_stream(&mut self, handle: StreamHandle) -> StreamTick {
        let index = handle.index;
        let stream = match self.streams.get_mut(&index) {
            Some((id, stream)) if *id == handle.id => stream,
            _ => return StreamTick::Unknown,
        };

        let prefix = stream.tick().map(str::to_owned);
        let done = stream.phase() == StreamPhase::Idle;
        if let Some(prefix) = prefix {
            self.update_message_text(index, &prefix);
        }

        if done {
            self.streams.remove(&index);
            log::debug!("Reply stream for message #{} finished", index);
            StreamTick::Finished
        } else {
            StreamTick::Revealed
        }
    }

    pub fn cancel_stream(&mut self, handle: StreamHandle) -> bool {
        match self.streams.get(&handle.index) {
            Some((id, _)) if *id == handle.id => {}
            _ => return false,
        }
        if let Some((_, mut stream)) = self.streams.remove(&handle.index) {
            stream.cancel();
        }
        true
    }

    pub fn is_streaming(&self, index: usize) -> bool {
        self.streams.contains_key(&index)
    }

    pub fn active_streams(&self) -> Vec<usize> {
        self.streams.keys().copied().collect()
    }

    // ========================================================================
    // Projection
    // ========================================================================

    pub fn messages_view(&self) -> Vec<MessageView> {
        project_messages(&self.state, |i| self.is_streaming(i))
    }

    pub fn files_view(&self) -> Vec<FileView> {
        project_files(&self.state)
    }
}
