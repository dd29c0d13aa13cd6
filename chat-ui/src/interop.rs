use chat_core::web::LocalStorage;
use chat_core::{KeyValueStore, MemoryStore};
use wasm_bindgen::JsCast;
use web_sys::{window, File, HtmlInputElement};

/// Open `localStorage`, falling back to an in-memory store when the browser
/// refuses (private mode, sandboxed iframe). History then lasts only for the
/// page's lifetime.
pub fn open_store() -> Box<dyn KeyValueStore> {
    match LocalStorage::open() {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            dioxus_logger::tracing::error!("{}; chat history will not be saved", e);
            Box::new(MemoryStore::new())
        }
    }
}

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Scroll an element to its bottom edge
pub fn scroll_to_bottom(element_id: &str) {
    if let Some(el) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(element_id))
    {
        el.set_scroll_top(el.scroll_height());
    }
}

/// Blocking `window.confirm`; `false` if no window is available.
pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Take the first picked file out of a file input and reset the input so
/// the same file can be picked again.
pub fn take_picked_file(input_id: &str) -> Option<File> {
    let input = window()?
        .document()?
        .get_element_by_id(input_id)?
        .dyn_into::<HtmlInputElement>()
        .ok()?;
    let file = input.files().and_then(|files| files.get(0));
    input.set_value("");
    file
}
