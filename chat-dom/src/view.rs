use chat_core::view::{EMPTY_FILES_HINT, EMPTY_MESSAGES_HINT};
use chat_core::{AssistantMode, ChatError, FileView, MessageView, Result, SidebarTab};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement};

pub const CHAT_TITLE: &str = "Chat";

/// Every page region the app needs, resolved once at startup.
pub struct DomView {
    pub document: Document,
    pub messages: Element,
    pub input: HtmlInputElement,
    pub send_button: HtmlElement,
    pub files_list: Element,
    pub assistants_list: Element,
    pub toggle_sidebar: HtmlElement,
    pub file_input: HtmlInputElement,
    pub chat_title: Element,
    pub assistant_select: HtmlSelectElement,
    pub clear_all: HtmlElement,
    pub sidebar: Option<Element>,
}

impl DomView {
    /// Resolve every required region and set the static header text.
    pub fn bind(document: Document) -> Result<Self> {
        let view = Self {
            messages: required(&document, "messages")?,
            input: required_as(&document, "message-input")?,
            send_button: required_as(&document, "send-button")?,
            files_list: required(&document, "files-list")?,
            assistants_list: required(&document, "assistants-list")?,
            toggle_sidebar: required_as(&document, "toggle-sidebar")?,
            file_input: required_as(&document, "file-input")?,
            chat_title: required(&document, "chat-title")?,
            assistant_select: required_as(&document, "assistant-select")?,
            clear_all: required_as(&document, "clear-all-btn")?,
            sidebar: document.query_selector(".sidebar").ok().flatten(),
            document,
        };
        view.chat_title.set_text_content(Some(CHAT_TITLE));
        Ok(view)
    }

    pub fn selected_mode(&self) -> AssistantMode {
        AssistantMode::from_value(&self.assistant_select.value())
    }

    pub fn select_mode(&self, mode: AssistantMode) {
        self.assistant_select.set_value(mode.as_str());
    }

    // ========================================================================
    // Messages
    // ========================================================================

    /// Rebuild the message list and scroll to the newest entry.
    pub fn render_messages(&self, views: &[MessageView]) -> std::result::Result<(), JsValue> {
        self.messages.set_inner_html("");

        if views.is_empty() {
            let hint = self.element("div", "muted")?;
            hint.set_text_content(Some(EMPTY_MESSAGES_HINT));
            self.messages.append_child(&hint)?;
            return Ok(());
        }

        for view in views {
            let bubble = self.message_bubble(view)?;
            self.messages.append_child(&bubble)?;
        }
        self.messages.set_scroll_top(self.messages.scroll_height());
        Ok(())
    }

    fn message_bubble(&self, view: &MessageView) -> std::result::Result<Element, JsValue> {
        let wrapper = self.element("div", &view.css_class())?;

        let meta = self.element("div", "meta")?;
        meta.set_text_content(Some(&view.meta));

        let content = self.document.create_element("div")?;
        content.set_text_content(Some(&view.text));

        if let Some(file) = &view.attachment {
            let br = self.document.create_element("br")?;
            content.append_child(&br)?;
            let link = self.element("a", "file-link")?;
            link.set_attribute("href", &file.data_url)?;
            link.set_attribute("download", &file.name)?;
            link.set_text_content(Some(&format!("📎 {}", file.name)));
            content.append_child(&link)?;
        }

        wrapper.append_child(&meta)?;
        wrapper.append_child(&content)?;
        Ok(wrapper)
    }

    // ========================================================================
    // Sidebar
    // ========================================================================

    pub fn render_files(&self, files: &[FileView]) -> std::result::Result<(), JsValue> {
        self.files_list.set_inner_html("");

        if files.is_empty() {
            let hint = self.element("div", "muted")?;
            hint.set_text_content(Some(EMPTY_FILES_HINT));
            self.files_list.append_child(&hint)?;
            return Ok(());
        }

        for file in files {
            let row = self.element("div", "file-item")?;

            let info = self.document.create_element("div")?;
            let name = self.element("div", "file-name")?;
            name.set_text_content(Some(&file.name));
            name.set_attribute("title", &file.name)?;
            let size = self.element("div", "file-size")?;
            size.set_text_content(Some(&file.size_label));
            info.append_child(&name)?;
            info.append_child(&size)?;

            let actions = self.element("div", "file-actions")?;
            let attach = self.file_button("attach", "attach-btn", "Attach", "Attach file", &file.id)?;
            let delete = self.file_button("delete", "delete-btn", "✕", "Delete file", &file.id)?;
            actions.append_child(&attach)?;
            actions.append_child(&delete)?;

            row.append_child(&info)?;
            row.append_child(&actions)?;
            self.files_list.append_child(&row)?;
        }
        Ok(())
    }

    fn file_button(
        &self,
        action: &str,
        class: &str,
        label: &str,
        title: &str,
        file_id: &str,
    ) -> std::result::Result<Element, JsValue> {
        let button = self.element("button", class)?;
        button.set_attribute("data-action", action)?;
        button.set_attribute("data-file-id", file_id)?;
        button.set_attribute("title", title)?;
        button.set_text_content(Some(label));
        Ok(button)
    }

    pub fn render_assistants(&self, selected: AssistantMode) -> std::result::Result<(), JsValue> {
        self.assistants_list.set_inner_html("");
        for mode in AssistantMode::ALL {
            let class = if mode == selected { "item selected" } else { "item" };
            let item = self.element("div", class)?;
            item.set_attribute("data-mode", mode.as_str())?;
            item.set_text_content(Some(mode.label()));
            self.assistants_list.append_child(&item)?;
        }
        Ok(())
    }

    /// Show one sidebar panel and highlight its tab.
    pub fn show_tab(&self, tab: SidebarTab) -> std::result::Result<(), JsValue> {
        let tabs = self.document.query_selector_all(".tab")?;
        for i in 0..tabs.length() {
            let Some(el) = tabs.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let active = el.get_attribute("data-tab").as_deref() == Some(tab.as_str());
            el.class_list().toggle_with_force("active", active)?;
        }

        self.files_list
            .class_list()
            .toggle_with_force("hidden", tab != SidebarTab::Files)?;
        self.assistants_list
            .class_list()
            .toggle_with_force("hidden", tab != SidebarTab::Assistants)?;
        Ok(())
    }

    pub fn toggle_sidebar(&self) {
        if let Some(sidebar) = &self.sidebar {
            let _ = sidebar.class_list().toggle("hidden");
        }
    }

    fn element(&self, tag: &str, class: &str) -> std::result::Result<Element, JsValue> {
        let el = self.document.create_element(tag)?;
        el.set_class_name(class);
        Ok(el)
    }
}

fn required(document: &Document, id: &str) -> Result<Element> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| ChatError::MissingRegion(id.to_string()))
}

fn required_as<T: JsCast>(document: &Document, id: &str) -> Result<T> {
    required(document, id)?
        .dyn_into::<T>()
        .map_err(|_| ChatError::MissingRegion(format!("{id} (unexpected element type)")))
}
