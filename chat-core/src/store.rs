//! Persistent Store Adapter
//!
//! The whole [`ChatState`] is one JSON blob under one key. Loading never
//! fails: anything unreadable is replaced by an empty list for the
//! offending field and logged.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ChatError, Result};
use crate::model::{ChatState, FileRecord, Message};

/// Synchronous string key-value store (`localStorage` in the browser).
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }
}

/// In-memory store for tests and for running without browser storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Result of decoding a stored blob: the usable state plus every problem
/// that was papered over.
#[derive(Debug, Default)]
pub struct Decoded {
    pub state: ChatState,
    pub issues: Vec<ChatError>,
}

/// Decode a stored blob with per-field tolerance.
pub fn decode_state(raw: &str) -> Decoded {
    let mut decoded = Decoded::default();

    let value = match serde_json::from_str::<Value>(raw) {
        Ok(value) => value,
        Err(e) => {
            decoded
                .issues
                .push(ChatError::PersistenceParse(format!("invalid JSON: {e}")));
            return decoded;
        }
    };

    let Value::Object(mut root) = value else {
        decoded.issues.push(ChatError::PersistenceParse(
            "top-level value is not an object".to_string(),
        ));
        return decoded;
    };

    decoded.state.messages =
        decode_list::<Message>(root.remove("messages"), "messages", &mut decoded.issues);
    decoded.state.files =
        decode_list::<FileRecord>(root.remove("files"), "files", &mut decoded.issues);
    decoded
}

fn decode_list<T: DeserializeOwned>(
    value: Option<Value>,
    field: &str,
    issues: &mut Vec<ChatError>,
) -> Vec<T> {
    let items = match value {
        Some(Value::Array(items)) => items,
        Some(_) => {
            issues.push(ChatError::PersistenceParse(format!(
                "`{field}` is not an array"
            )));
            return Vec::new();
        }
        None => {
            issues.push(ChatError::PersistenceParse(format!("`{field}` is missing")));
            return Vec::new();
        }
    };

    match items
        .into_iter()
        .map(serde_json::from_value::<T>)
        .collect::<std::result::Result<Vec<_>, _>>()
    {
        Ok(list) => list,
        Err(e) => {
            issues.push(ChatError::PersistenceParse(format!(
                "`{field}` has an invalid entry: {e}"
            )));
            Vec::new()
        }
    }
}

/// Binds a [`KeyValueStore`] to the fixed state key.
#[derive(Debug)]
pub struct StateStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> StateStore<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    pub fn load(&self) -> ChatState {
        let Some(raw) = self.store.get_item(&self.key) else {
            log::info!("No stored chat state under '{}', starting empty", self.key);
            return ChatState::default();
        };

        let decoded = decode_state(&raw);
        for issue in &decoded.issues {
            log::warn!("Recovered from stored state problem: {}", issue);
        }
        log::info!(
            "Loaded chat state: {} messages, {} files",
            decoded.state.messages.len(),
            decoded.state.files.len()
        );
        decoded.state
    }

    pub fn save(&self, state: &ChatState) -> Result<()> {
        let json = serde_json::to_string(state)
            .map_err(|e| ChatError::Storage(format!("serialize failed: {e}")))?;
        self.store.set_item(&self.key, &json)
    }
}
