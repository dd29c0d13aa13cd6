use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Messages
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    /// Display name used in the message meta line
    pub fn author(&self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Assistant => "Assistant",
        }
    }
}

/// A chat message.
///
/// `file_id` is a weak reference: it is resolved against [`ChatState::files`]
/// at render time and may dangle after the file is deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub role: Role,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_loose_id"
    )]
    pub file_id: Option<String>,
}

impl Message {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: Some(display_time()),
            file_id: None,
        }
    }

    pub fn with_file(mut self, file_id: impl Into<String>) -> Self {
        self.file_id = Some(file_id.into());
        self
    }
}

// ============================================================================
// Files
// ============================================================================

/// An uploaded file with its payload embedded as a data URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    #[serde(deserialize_with = "loose_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(rename = "type", default)]
    pub mime: String,
    /// Older records may carry no payload.
    #[serde(default)]
    pub data_url: String,
}

// ============================================================================
// Aggregate
// ============================================================================

/// The single rendering source of truth: messages in chronological order,
/// files most-recent-first.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatState {
    pub messages: Vec<Message>,
    pub files: Vec<FileRecord>,
}

impl ChatState {
    /// State after first run or "clear all": one greeting, no files.
    pub fn seeded(welcome_text: &str) -> Self {
        Self {
            messages: vec![Message::new(Role::Assistant, welcome_text)],
            files: Vec::new(),
        }
    }

    pub fn find_file(&self, id: &str) -> Option<&FileRecord> {
        self.files.iter().find(|f| f.id == id)
    }
}

pub fn display_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

// Some writers store the id as a bare `Date.now()` number.
fn loose_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

fn optional_loose_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) => Ok(Some(s)),
        serde_json::Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
    }

    #[test]
    fn message_omits_absent_optionals() {
        let msg = Message {
            role: Role::User,
            text: "hi".to_string(),
            timestamp: None,
            file_id: None,
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"role":"user","text":"hi"}"#);
    }

    #[test]
    fn message_uses_camel_case_file_id() {
        let msg = Message::new(Role::User, "see attached").with_file("file_1");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["fileId"], "file_1");
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn file_record_uses_js_field_names() {
        let record = FileRecord {
            id: "file_1".to_string(),
            name: "a.txt".to_string(),
            size: 3,
            mime: "text/plain".to_string(),
            data_url: "data:text/plain;base64,YWJj".to_string(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "text/plain");
        assert_eq!(json["dataUrl"], "data:text/plain;base64,YWJj");
    }

    #[test]
    fn numeric_ids_are_read_as_strings() {
        let record: FileRecord =
            serde_json::from_str(r#"{"id": 1718000000000, "name": "a.txt", "size": 1, "type": ""}"#)
                .unwrap();
        assert_eq!(record.id, "1718000000000");
        assert_eq!(record.data_url, "");

        let msg: Message =
            serde_json::from_str(r#"{"role": "user", "text": "x", "fileId": 42}"#).unwrap();
        assert_eq!(msg.file_id.as_deref(), Some("42"));
    }

    #[test]
    fn boolean_id_is_rejected() {
        let result = serde_json::from_str::<FileRecord>(r#"{"id": true, "name": "a"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn seeded_state_has_single_greeting() {
        let state = ChatState::seeded("Hello!");
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.messages[0].role, Role::Assistant);
        assert_eq!(state.messages[0].text, "Hello!");
        assert!(state.files.is_empty());
    }
}
