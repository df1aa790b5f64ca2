pub mod card;
pub mod chrome;

use wasm_bindgen::JsValue;
use web_sys::{console, Document, Element, Window};

use crate::domain::ProductRecord;
use crate::error::DropsError;
use crate::{drops, net};

const GRID_SELECTOR: &str = "#new-drops .grid";

/// Drives the new-drops grid through its loading, populated, and failed
/// states.
///
/// Invoked once per page load. Each invocation owns the grid's content
/// from the moment it resolves, so overlapping invocations degrade to
/// last writer wins. Every failure is converted into either the failed
/// state or a console diagnostic; nothing escapes into the page.
pub async fn load_and_render_drops(window: Window) {
    let Some(document) = window.document() else {
        console::error_1(&"Window has no document; cannot render new drops".into());
        return;
    };

    let grid = match resolve_grid(&document) {
        Ok(grid) => grid,
        Err(err) => {
            console::error_1(&err.to_string().into());
            return;
        }
    };

    if let Err(err) = show_loading(&document, &grid) {
        console::error_1(&err);
        return;
    }

    match net::fetch_drops(&window).await {
        Ok(catalog) => {
            let selection = drops::select_drops(catalog.products, catalog.source);
            if let Err(err) = populate(&document, &grid, &selection) {
                console::error_1(&err);
            }
        }
        Err(err) => {
            console::error_1(&format!("Error loading new drops: {err}").into());
            if let Err(dom_err) = show_failure(&document, &grid, &err) {
                console::error_1(&dom_err);
            }
        }
    }
}

fn resolve_grid(document: &Document) -> Result<Element, DropsError> {
    document
        .query_selector(GRID_SELECTOR)
        .ok()
        .flatten()
        .ok_or(DropsError::ContainerMissing)
}

/// Spinner and caption shown before any network activity starts.
fn show_loading(document: &Document, grid: &Element) -> Result<(), JsValue> {
    grid.set_inner_html("");

    let wrapper = document.create_element("div")?;
    wrapper.set_class_name("col-span-full flex flex-col items-center justify-center py-16");

    let spinner = document.create_element("div")?;
    spinner.set_class_name("animate-spin rounded-full h-12 w-12 border-b-2 border-primary mb-4");

    let caption = document.create_element("p")?;
    caption.set_class_name("text-lg text-muted");
    caption.set_text_content(Some("Loading latest drops..."));

    wrapper.append_child(&spinner)?;
    wrapper.append_child(&caption)?;
    grid.append_child(&wrapper)?;
    Ok(())
}

fn populate(
    document: &Document,
    grid: &Element,
    selection: &[ProductRecord],
) -> Result<(), JsValue> {
    grid.set_inner_html("");

    for record in selection {
        let rendered = drops::render_card(record);
        grid.append_child(&*card::build_card(document, &rendered)?)?;
    }
    Ok(())
}

fn show_failure(document: &Document, grid: &Element, err: &DropsError) -> Result<(), JsValue> {
    grid.set_inner_html("");

    let notice = document.create_element("p")?;
    notice.set_class_name("col-span-full text-center text-red-500 py-16");
    notice.set_text_content(Some(&format!(
        "Failed to load new drops: {err}. Please check your Printify API credentials or server logs."
    )));
    grid.append_child(&notice)?;
    Ok(())
}
