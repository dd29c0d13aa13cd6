use chat_core::view::EMPTY_FILES_HINT;
use chat_core::{AssistantMode, FileView, SidebarTab};
use dioxus::prelude::*;

use crate::interop::confirm;

pub const FILE_INPUT_ID: &str = "file-input";

#[component]
pub fn Sidebar(
    files: Vec<FileView>,
    active_tab: SidebarTab,
    mode: AssistantMode,
    on_tab_change: EventHandler<SidebarTab>,
    on_upload: EventHandler<()>,
    on_attach: EventHandler<String>,
    on_delete: EventHandler<String>,
    on_mode_change: EventHandler<AssistantMode>,
    on_clear_all: EventHandler<()>,
) -> Element {
    rsx! {
        aside {
            class: "sidebar",
            div {
                class: "workspace",
                div { class: "brand", "Light Chat" }
                div { class: "workspace-switch", "Default Workspace" }
            }

            div {
                class: "sidebar-tabs",
                for tab in [SidebarTab::Files, SidebarTab::Assistants] {
                    button {
                        key: "{tab.as_str()}",
                        class: tab_class(tab, active_tab),
                        "data-tab": tab.as_str(),
                        onclick: move |_| on_tab_change.call(tab),
                        "{tab.label()}"
                    }
                }
            }

            div {
                class: "sidebar-content",
                FilesList {
                    files,
                    hidden: active_tab != SidebarTab::Files,
                    on_attach,
                    on_delete,
                }
                AssistantsList {
                    selected: mode,
                    hidden: active_tab != SidebarTab::Assistants,
                    on_select: on_mode_change,
                }
            }

            div {
                class: "sidebar-actions",
                input {
                    id: FILE_INPUT_ID,
                    class: "file-input",
                    r#type: "file",
                    title: "Upload a file",
                    onchange: move |_| on_upload.call(()),
                }
                label { r#for: FILE_INPUT_ID, class: "small file-upload-label", "Upload" }
                button {
                    class: "small ghost",
                    onclick: move |_| {
                        if confirm("Delete all chats and files?") {
                            on_clear_all.call(());
                        }
                    },
                    "Clear all"
                }
            }
        }
    }
}

#[component]
pub fn FilesList(
    files: Vec<FileView>,
    hidden: bool,
    on_attach: EventHandler<String>,
    on_delete: EventHandler<String>,
) -> Element {
    rsx! {
        div {
            class: panel_class(hidden),
            if files.is_empty() {
                div { class: "muted", "{EMPTY_FILES_HINT}" }
            }
            for file in files {
                FileRow { key: "{file.id}", file, on_attach, on_delete }
            }
        }
    }
}

#[component]
fn FileRow(
    file: FileView,
    on_attach: EventHandler<String>,
    on_delete: EventHandler<String>,
) -> Element {
    let attach_id = file.id.clone();
    let delete_id = file.id.clone();

    rsx! {
        div {
            class: "file-item",
            div {
                div { class: "file-name", title: "{file.name}", "{file.name}" }
                div { class: "file-size", "{file.size_label}" }
            }
            div {
                class: "file-actions",
                button {
                    class: "attach-btn",
                    title: "Attach file",
                    onclick: move |_| on_attach.call(attach_id.clone()),
                    "Attach"
                }
                button {
                    class: "delete-btn",
                    title: "Delete file",
                    onclick: move |e: MouseEvent| {
                        e.stop_propagation();
                        if confirm("Delete this file?") {
                            on_delete.call(delete_id.clone());
                        }
                    },
                    "✕"
                }
            }
        }
    }
}

#[component]
pub fn AssistantsList(
    selected: AssistantMode,
    hidden: bool,
    on_select: EventHandler<AssistantMode>,
) -> Element {
    rsx! {
        div {
            class: panel_class(hidden),
            for mode in AssistantMode::ALL {
                div {
                    key: "{mode}",
                    class: if mode == selected { "item selected" } else { "item" },
                    onclick: move |_| on_select.call(mode),
                    "{mode.label()}"
                }
            }
        }
    }
}

pub fn tab_class(tab: SidebarTab, active: SidebarTab) -> &'static str {
    if tab == active {
        "tab active"
    } else {
        "tab"
    }
}

pub fn panel_class(hidden: bool) -> &'static str {
    if hidden {
        "list hidden"
    } else {
        "list"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_active_tab_is_highlighted() {
        assert_eq!(tab_class(SidebarTab::Files, SidebarTab::Files), "tab active");
        assert_eq!(tab_class(SidebarTab::Assistants, SidebarTab::Files), "tab");
    }

    #[test]
    fn hidden_panels_get_hidden_class() {
        assert_eq!(panel_class(true), "list hidden");
        assert_eq!(panel_class(false), "list");
    }
}
