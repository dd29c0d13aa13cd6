// Light Chat CSS. The plain DOM front end serves the same file from its
// index.html.
pub const CHAT_STYLES: &str = include_str!("../../chat-dom/style.css");
