//! Pure projection of [`ChatState`] into what the front ends draw.

use crate::model::{ChatState, FileRecord, Role};

pub const EMPTY_MESSAGES_HINT: &str = "No messages yet — type below to start the conversation.";
pub const EMPTY_FILES_HINT: &str = "(no files uploaded)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileView {
    pub id: String,
    pub name: String,
    pub size_label: String,
    pub data_url: String,
}

impl From<&FileRecord> for FileView {
    fn from(file: &FileRecord) -> Self {
        Self {
            id: file.id.clone(),
            name: file.name.clone(),
            size_label: format_size(file.size),
            data_url: file.data_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub index: usize,
    pub role: Role,
    pub author: &'static str,
    pub meta: String,
    pub text: String,
    /// `None` when the message has no file or its file was deleted.
    pub attachment: Option<FileView>,
    pub streaming: bool,
}

impl MessageView {
    pub fn css_class(&self) -> String {
        let mut class = format!("message {}", self.role.as_str());
        if self.streaming {
            class.push_str(" typing");
        }
        class
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SidebarTab {
    #[default]
    Files,
    Assistants,
}

impl SidebarTab {
    pub fn as_str(&self) -> &'static str {
        match self {
            SidebarTab::Files => "files",
            SidebarTab::Assistants => "assistants",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SidebarTab::Files => "Files",
            SidebarTab::Assistants => "Assistants",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "files" => Some(SidebarTab::Files),
            "assistants" => Some(SidebarTab::Assistants),
            _ => None,
        }
    }
}

pub fn project_messages(
    state: &ChatState,
    is_streaming: impl Fn(usize) -> bool,
) -> Vec<MessageView> {
    state
        .messages
        .iter()
        .enumerate()
        .map(|(index, msg)| {
            let author = msg.role.author();
            let meta = match &msg.timestamp {
                Some(ts) => format!("{author} • {ts}"),
                None => author.to_string(),
            };
            let attachment = msg
                .file_id
                .as_deref()
                .and_then(|id| state.find_file(id))
                .map(FileView::from);

            MessageView {
                index,
                role: msg.role,
                author,
                meta,
                text: msg.text.clone(),
                attachment,
                streaming: is_streaming(index),
            }
        })
        .collect()
}

pub fn project_files(state: &ChatState) -> Vec<FileView> {
    state.files.iter().map(FileView::from).collect()
}

pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Message;

    fn file(id: &str, name: &str) -> FileRecord {
        FileRecord {
            id: id.to_string(),
            name: name.to_string(),
            size: 2048,
            mime: "text/plain".to_string(),
            data_url: "data:text/plain;base64,".to_string(),
        }
    }

    #[test]
    fn resolves_attachment_by_id() {
        let state = ChatState {
            messages: vec![Message::new(Role::User, "Attached file: a.txt").with_file("f1")],
            files: vec![file("f1", "a.txt")],
        };
        let views = project_messages(&state, |_| false);
        let attachment = views[0].attachment.as_ref().expect("attachment");
        assert_eq!(attachment.name, "a.txt");
        assert_eq!(attachment.size_label, "2.0 KB");
    }

    #[test]
    fn dangling_reference_renders_text_only() {
        let state = ChatState {
            messages: vec![Message::new(Role::User, "Attached file: gone.txt").with_file("f9")],
            files: vec![file("f1", "a.txt")],
        };
        let views = project_messages(&state, |_| false);
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].text, "Attached file: gone.txt");
        assert!(views[0].attachment.is_none());
    }

    #[test]
    fn meta_falls_back_to_author_without_timestamp() {
        let state = ChatState {
            messages: vec![Message {
                role: Role::Assistant,
                text: "hi".to_string(),
                timestamp: None,
                file_id: None,
            }],
            files: vec![],
        };
        let views = project_messages(&state, |_| false);
        assert_eq!(views[0].meta, "Assistant");

        let state = ChatState {
            messages: vec![Message {
                timestamp: Some("10:00:00".to_string()),
                ..state.messages[0].clone()
            }],
            files: vec![],
        };
        assert_eq!(project_messages(&state, |_| false)[0].meta, "Assistant • 10:00:00");
    }

    #[test]
    fn streaming_flag_marks_typing_class() {
        let state = ChatState::seeded("hello");
        let views = project_messages(&state, |i| i == 0);
        assert!(views[0].streaming);
        assert_eq!(views[0].css_class(), "message assistant typing");
    }

    #[test]
    fn size_labels() {
        assert_eq!(format_size(12), "12 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn sidebar_tab_values() {
        assert_eq!(SidebarTab::from_value("assistants"), Some(SidebarTab::Assistants));
        assert_eq!(SidebarTab::from_value("other"), None);
        assert_eq!(SidebarTab::default().as_str(), "files");
    }
}
