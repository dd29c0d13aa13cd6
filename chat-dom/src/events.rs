use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget};

use chat_core::{AssistantMode, SidebarTab};

/// Attach a listener for the lifetime of the page.
pub fn listen<E, F>(target: &EventTarget, event: &str, handler: F)
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        log::error!("Failed to add {} listener: {:?}", event, e);
    }
    // Page-lifetime listener; reclaimed on unload
    closure.forget();
}

/// Click on a per-file button in the files list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileAction {
    Attach(String),
    Delete(String),
}

impl FileAction {
    pub fn parse(action: &str, file_id: Option<String>) -> Option<Self> {
        let file_id = file_id.filter(|id| !id.is_empty())?;
        match action {
            "attach" => Some(FileAction::Attach(file_id)),
            "delete" => Some(FileAction::Delete(file_id)),
            _ => None,
        }
    }

    /// Resolve a delegated click to the nearest `[data-action]` button.
    pub fn from_event(event: &Event) -> Option<Self> {
        let button = closest(event, "[data-action]")?;
        Self::parse(
            &button.get_attribute("data-action")?,
            button.get_attribute("data-file-id"),
        )
    }
}

pub fn mode_from_event(event: &Event) -> Option<AssistantMode> {
    closest(event, "[data-mode]")?
        .get_attribute("data-mode")?
        .parse()
        .ok()
}

pub fn tab_from_element(element: &Element) -> Option<SidebarTab> {
    SidebarTab::from_value(&element.get_attribute("data-tab")?)
}

fn closest(event: &Event, selector: &str) -> Option<Element> {
    event
        .target()?
        .dyn_into::<Element>()
        .ok()?
        .closest(selector)
        .ok()
        .flatten()
}
