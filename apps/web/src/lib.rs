// Browser logic for the KRYVE landing page: the new-drops pipeline plus
// the surrounding page chrome.
pub mod domain;
pub mod drops;
pub mod error;
pub mod net;
pub mod ui;

use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen_futures::spawn_local;
use web_sys::console;

/// Entry point for the hosting page, called once its DOM is ready.
///
/// Wires the page chrome and starts the new-drops pipeline. Nothing here
/// throws back into the page; failures end up on the console or in the
/// grid's failed state.
#[wasm_bindgen(js_name = initLandingPage)]
pub fn init_landing_page() {
    let Some(window) = web_sys::window() else {
        console::error_1(&"No window object; landing page left uninitialized".into());
        return;
    };
    let Some(document) = window.document() else {
        console::error_1(&"No document object; landing page left uninitialized".into());
        return;
    };

    ui::chrome::wire_page(&window, &document);
    spawn_local(ui::load_and_render_drops(window));
}

/// Re-runs just the drops pipeline against the current page.
///
/// Each invocation replaces the grid content wholesale, so calling this
/// again simply renders the newer result (last writer wins).
#[wasm_bindgen(js_name = loadNewDrops)]
pub fn load_new_drops() {
    let Some(window) = web_sys::window() else {
        console::error_1(&"No window object; cannot load new drops".into());
        return;
    };

    spawn_local(ui::load_and_render_drops(window));
}
