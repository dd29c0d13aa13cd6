use chat_core::web::BrowserFile;
use chat_core::{
    ingest, AssistantMode, ChatConfig, ChatController, KeyValueStore, SidebarTab, StreamTick,
};
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

use crate::components::{ChatWindow, MESSAGES_ID};
use crate::interop::{now_millis, open_store, scroll_to_bottom, take_picked_file};
use crate::sidebar::{Sidebar, FILE_INPUT_ID};
use crate::styles::CHAT_STYLES;

pub type Controller = ChatController<Box<dyn KeyValueStore>>;

#[component]
pub fn App() -> Element {
    let mut controller = use_signal(|| {
        let controller = Controller::hydrate(open_store(), ChatConfig::default());
        dioxus_logger::tracing::info!(
            "Chat ready with {} messages",
            controller.state().messages.len()
        );
        controller
    });
    let mut mode = use_signal(AssistantMode::default);
    let mut active_tab = use_signal(SidebarTab::default);
    let mut sidebar_open = use_signal(|| true);

    // Keep the latest message in view after every state change
    use_effect(move || {
        let _ = controller.read().state().messages.len();
        scroll_to_bottom(MESSAGES_ID);
    });

    let on_send = use_callback(move |text: String| {
        let Some(handle) = controller.write().send(mode(), &text) else {
            return;
        };
        let interval_ms = controller.peek().config().reveal_interval_ms;

        spawn(async move {
            loop {
                TimeoutFuture::new(interval_ms).await;
                if controller.write().advance_stream(handle) != StreamTick::Revealed {
                    break;
                }
            }
        });
    });

    let on_upload = use_callback(move |_: ()| {
        let Some(file) = take_picked_file(FILE_INPUT_ID) else {
            return;
        };

        spawn(async move {
            let source = BrowserFile::new(file);
            let id = controller.peek().next_file_id(now_millis());
            match ingest(&source, id).await {
                Ok(record) => {
                    controller.write().add_file(record);
                    active_tab.set(SidebarTab::Files);
                }
                Err(e) => {
                    dioxus_logger::tracing::error!("Failed to upload file: {}", e);
                }
            }
        });
    });

    let messages = controller.read().messages_view();
    let files = controller.read().files_view();

    rsx! {
        style { {CHAT_STYLES} }

        div {
            class: "container dashboard",
            if sidebar_open() {
                Sidebar {
                    files,
                    active_tab: active_tab(),
                    mode: mode(),
                    on_tab_change: move |tab| active_tab.set(tab),
                    on_upload,
                    on_attach: move |id: String| {
                        controller.write().attach_file(&id);
                    },
                    on_delete: move |id: String| {
                        controller.write().delete_file(&id);
                    },
                    on_mode_change: move |m| mode.set(m),
                    on_clear_all: move |_| controller.write().clear_all(),
                }
            }
            ChatWindow {
                messages,
                mode: mode(),
                on_send,
                on_mode_change: move |m| mode.set(m),
                on_toggle_sidebar: move |_| sidebar_open.toggle(),
            }
        }
    }
}
