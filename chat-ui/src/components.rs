use chat_core::view::EMPTY_MESSAGES_HINT;
use chat_core::{AssistantMode, FileView, MessageView};
use dioxus::prelude::*;

pub const MESSAGES_ID: &str = "messages";

#[component]
pub fn ChatWindow(
    messages: Vec<MessageView>,
    mode: AssistantMode,
    on_send: EventHandler<String>,
    on_mode_change: EventHandler<AssistantMode>,
    on_toggle_sidebar: EventHandler<()>,
) -> Element {
    rsx! {
        section {
            class: "main",
            div {
                class: "main-top",
                div { class: "chat-title", "Chat" }
                div {
                    class: "chat-actions",
                    button {
                        class: "small ghost",
                        onclick: move |_| on_toggle_sidebar.call(()),
                        "Toggle"
                    }
                }
            }

            MessageList { messages }

            InputForm { mode, on_send, on_mode_change }

            footer {
                class: "footer",
                small { class: "muted", "Light Chat — Dioxus version" }
            }
        }
    }
}

#[component]
pub fn MessageList(messages: Vec<MessageView>) -> Element {
    rsx! {
        div {
            id: MESSAGES_ID,
            class: "messages",
            "aria-live": "polite",
            if messages.is_empty() {
                div { class: "muted", "{EMPTY_MESSAGES_HINT}" }
            } else {
                for message in messages {
                    MessageBubble { key: "{message.index}", message }
                }
            }
        }
    }
}

#[component]
pub fn MessageBubble(message: MessageView) -> Element {
    rsx! {
        div {
            class: message.css_class(),
            div { class: "meta", "{message.meta}" }
            div {
                "{message.text}"
                if let Some(file) = message.attachment.as_ref() {
                    br {}
                    AttachmentLink { file: file.clone() }
                }
            }
        }
    }
}

#[component]
fn AttachmentLink(file: FileView) -> Element {
    rsx! {
        a {
            class: "file-link",
            href: "{file.data_url}",
            download: "{file.name}",
            title: "{file.size_label}",
            "📎 {file.name}"
        }
    }
}

#[component]
pub fn InputForm(
    mode: AssistantMode,
    on_send: EventHandler<String>,
    on_mode_change: EventHandler<AssistantMode>,
) -> Element {
    let mut input_text = use_signal(String::new);

    let submit = use_callback(move |_| {
        let text = input_text.to_string();
        if text.trim().is_empty() {
            return;
        }
        on_send.call(text);
        input_text.set(String::new());
    });

    let onkeydown = move |e: KeyboardEvent| {
        if e.key() == Key::Enter && !e.modifiers().shift() {
            e.prevent_default();
            submit.call(());
        }
    };

    rsx! {
        div {
            class: "input-form",
            textarea {
                class: "input",
                rows: "1",
                placeholder: "Ask anything — press Enter to send",
                "aria-label": "Message",
                value: "{input_text}",
                oninput: move |e: FormEvent| input_text.set(e.value()),
                onkeydown,
            }
            select {
                class: "assistant-select",
                "aria-label": "Assistant",
                onchange: move |e: FormEvent| on_mode_change.call(AssistantMode::from_value(&e.value())),
                for option_mode in AssistantMode::ALL {
                    option {
                        key: "{option_mode}",
                        value: option_mode.as_str(),
                        selected: option_mode == mode,
                        "{option_mode.label()}"
                    }
                }
            }
            button {
                class: "send",
                disabled: input_text.read().trim().is_empty(),
                onclick: move |_| submit.call(()),
                "Send"
            }
        }
    }
}
