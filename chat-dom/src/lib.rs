//! Plain-DOM front end for Light Chat
//!
//! Binds to the elements in `index.html`, wires listeners with
//! `wasm-bindgen` closures and redraws message and sidebar regions from
//! [`chat_core::ChatController`] after every mutation.

pub mod app;
pub mod events;
pub mod view;

use wasm_bindgen::prelude::*;

pub use app::DomApp;
pub use view::DomView;

#[wasm_bindgen(start)]
pub fn start() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Initializing Light Chat");

    match DomApp::mount() {
        Ok(_) => log::info!("Initialization complete"),
        Err(e) => log::error!("Initialization error: {}", e),
    }
}
