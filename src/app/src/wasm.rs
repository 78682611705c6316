//! WebAssembly FFI bindings for the Crux Core
//!
//! The web shell sends serialized events, receives serialized effects and
//! reads the serialized view model through these functions.

use lazy_static::lazy_static;
use wasm_bindgen::prelude::wasm_bindgen;

use crux_core::{bridge::Bridge, Core};

use crate::App;

lazy_static! {
    static ref CORE: Bridge<App> = Bridge::new(Core::new());
}

/// Initialize the WASM module and set up logging
#[wasm_bindgen(start)]
pub fn init_wasm() {
    // Init only fails when a logger is already installed (e.g. hot reload), so
    // the error goes to that logger
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        log::debug!("keeping existing logger: {e}");
    }
}

/// Process an event from JavaScript
///
/// Takes a serialized Event and returns serialized Effects. A payload the
/// bridge cannot decode yields no effects.
#[wasm_bindgen]
pub fn process_event(event_bytes: &[u8]) -> Vec<u8> {
    let mut effects = Vec::new();
    if let Err(e) = CORE.update(event_bytes, &mut effects) {
        log::error!("failed to process event: {e}");
    }
    effects
}

/// Get the current view model
#[wasm_bindgen]
pub fn view() -> Vec<u8> {
    let mut view = Vec::new();
    if let Err(e) = CORE.view(&mut view) {
        log::error!("failed to serialize view model: {e}");
    }
    view
}

/// Handle a response to an effect
///
/// Takes an effect ID and serialized response data, returns the serialized
/// Effects that follow from it.
#[wasm_bindgen]
pub fn handle_response(id: u32, response_bytes: &[u8]) -> Vec<u8> {
    let mut effects = Vec::new();
    if let Err(e) = CORE.resolve(
        crux_core::bridge::EffectId(id),
        response_bytes,
        &mut effects,
    ) {
        log::error!("failed to handle response for effect {id}: {e}");
    }
    effects
}
