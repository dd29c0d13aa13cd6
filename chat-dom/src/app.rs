use std::cell::RefCell;
use std::rc::Rc;

use chat_core::web::{BrowserFile, LocalStorage};
use chat_core::{
    ingest, ChatConfig, ChatController, ChatError, Result, SidebarTab, StreamHandle, StreamTick,
};
use futures_util::StreamExt;
use gloo_timers::future::IntervalStream;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, KeyboardEvent};

use crate::events::{listen, mode_from_event, tab_from_element, FileAction};
use crate::view::DomView;

/// Controller plus the page it draws on. Lives for the page lifetime.
pub struct DomApp {
    view: DomView,
    controller: RefCell<ChatController<LocalStorage>>,
}

impl DomApp {
    /// Bind the page, hydrate state, wire listeners and draw once.
    pub fn mount() -> Result<Rc<Self>> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| ChatError::MissingRegion("document".to_string()))?;
        let view = DomView::bind(document)?;
        let controller = ChatController::hydrate(LocalStorage::open()?, ChatConfig::default());

        let app = Rc::new(Self {
            view,
            controller: RefCell::new(controller),
        });
        app.wire();
        app.render_sidebar();
        app.render_messages();
        Ok(app)
    }

    fn wire(self: &Rc<Self>) {
        let view = &self.view;

        let app = Rc::clone(self);
        listen(&view.send_button, "click", move |_: Event| app.handle_send());

        let app = Rc::clone(self);
        listen(&view.input, "keydown", move |e: KeyboardEvent| {
            if e.key() == "Enter" && !e.shift_key() {
                e.prevent_default();
                app.handle_send();
            }
        });

        let app = Rc::clone(self);
        listen(&view.file_input, "change", move |_: Event| app.handle_upload());

        let app = Rc::clone(self);
        listen(&view.files_list, "click", move |e: Event| {
            let Some(action) = FileAction::from_event(&e) else {
                return;
            };
            e.stop_propagation();
            app.handle_file_action(action);
        });

        let app = Rc::clone(self);
        listen(&view.assistants_list, "click", move |e: Event| {
            if let Some(mode) = mode_from_event(&e) {
                app.view.select_mode(mode);
                app.render_sidebar();
            }
        });

        let app = Rc::clone(self);
        listen(&view.assistant_select, "change", move |_: Event| app.render_sidebar());

        let app = Rc::clone(self);
        listen(&view.toggle_sidebar, "click", move |_: Event| app.view.toggle_sidebar());

        let app = Rc::clone(self);
        listen(&view.clear_all, "click", move |_: Event| {
            if confirm("Delete all chats and files?") {
                app.controller.borrow_mut().clear_all();
                app.render_sidebar();
                app.render_messages();
            }
        });

        if let Ok(tabs) = view.document.query_selector_all(".tab") {
            for i in 0..tabs.length() {
                let Some(tab_el) = tabs.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                    continue;
                };
                let Some(tab) = tab_from_element(&tab_el) else {
                    continue;
                };
                let app = Rc::clone(self);
                listen(&tab_el, "click", move |_: Event| app.show_tab(tab));
            }
        }
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    fn render_messages(&self) {
        let views = self.controller.borrow().messages_view();
        if let Err(e) = self.view.render_messages(&views) {
            log::error!("Failed to render messages: {:?}", e);
        }
    }

    fn render_sidebar(&self) {
        let files = self.controller.borrow().files_view();
        if let Err(e) = self.view.render_files(&files) {
            log::error!("Failed to render files: {:?}", e);
        }
        if let Err(e) = self.view.render_assistants(self.view.selected_mode()) {
            log::error!("Failed to render assistants: {:?}", e);
        }
    }

    fn show_tab(&self, tab: SidebarTab) {
        if let Err(e) = self.view.show_tab(tab) {
            log::error!("Failed to switch to {} tab: {:?}", tab.as_str(), e);
        }
    }

    // ========================================================================
    // Actions
    // ========================================================================

    fn handle_send(self: &Rc<Self>) {
        let text = self.view.input.value();
        let mode = self.view.selected_mode();
        let Some(handle) = self.controller.borrow_mut().send(mode, &text) else {
            return;
        };
        self.view.input.set_value("");
        let _ = self.view.input.focus();
        self.render_messages();
        self.start_stream(handle);
    }

    /// Drive the reveal behind `handle` until it finishes or is cancelled
    /// through the controller.
    fn start_stream(self: &Rc<Self>, handle: StreamHandle) {
        let app = Rc::clone(self);
        let interval_ms = self.controller.borrow().config().reveal_interval_ms;

        spawn_local(async move {
            let mut ticks = IntervalStream::new(interval_ms);
            while ticks.next().await.is_some() {
                let tick = app.controller.borrow_mut().advance_stream(handle);
                if tick == StreamTick::Unknown {
                    break;
                }
                app.render_messages();
                if tick == StreamTick::Finished {
                    break;
                }
            }
        });
    }

    fn handle_upload(self: &Rc<Self>) {
        let file = self.view.file_input.files().and_then(|files| files.get(0));
        self.view.file_input.set_value("");
        let Some(file) = file else {
            return;
        };

        let app = Rc::clone(self);
        spawn_local(async move {
            let source = BrowserFile::new(file);
            let id = app
                .controller
                .borrow()
                .next_file_id(chrono::Utc::now().timestamp_millis());
            match ingest(&source, id).await {
                Ok(record) => {
                    app.controller.borrow_mut().add_file(record);
                    app.render_sidebar();
                    app.show_tab(SidebarTab::Files);
                }
                Err(e) => log::error!("Failed to upload file: {}", e),
            }
        });
    }

    fn handle_file_action(&self, action: FileAction) {
        match action {
            FileAction::Attach(id) => {
                if self.controller.borrow_mut().attach_file(&id).is_some() {
                    self.render_messages();
                }
            }
            FileAction::Delete(id) => {
                if confirm("Delete this file?") {
                    self.controller.borrow_mut().delete_file(&id);
                    self.render_sidebar();
                    self.render_messages();
                }
            }
        }
    }
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}
