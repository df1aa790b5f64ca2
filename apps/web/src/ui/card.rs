use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlImageElement};

use crate::domain::{ImageSlot, RenderedCard};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const PLACEHOLDER_ICON_PATH: &str = "M4 16l4.586-4.586a2 2 0 012.828 0L16 16m-2-2l1.586-1.586a2 2 0 012.828 0L20 14m-6-6h.01M6 20h12a2 2 0 002-2V6a2 2 0 00-2-2H6a2 2 0 00-2 2v12a2 2 0 002 2z";

/// Builds the DOM node for one product card.
///
/// Nodes are constructed structurally; title, price, and link values
/// never pass through markup strings.
pub fn build_card(document: &Document, card: &RenderedCard) -> Result<Element, JsValue> {
    let root = document.create_element("div")?;
    root.set_class_name("group relative");

    let link = document.create_element("a")?;
    link.set_class_name("block");
    link.set_attribute("href", &card.detail_href)?;

    let body = document.create_element("div")?;
    body.set_class_name(
        "bg-white rounded-2xl overflow-hidden shadow-lg hover:shadow-2xl transition-all \
         duration-300 transform hover:-translate-y-1",
    );

    body.append_child(&*build_image_container(document, card)?)?;
    body.append_child(&*build_info(document, card)?)?;

    link.append_child(&body)?;
    root.append_child(&link)?;
    Ok(root)
}

fn build_image_container(document: &Document, card: &RenderedCard) -> Result<Element, JsValue> {
    let container = document.create_element("div")?;
    container.set_class_name("relative overflow-hidden aspect-square bg-gray-100");

    match &card.image {
        ImageSlot::Remote(url) => {
            let image: HtmlImageElement = document.create_element("img")?.dyn_into()?;
            image.set_class_name(
                "w-full h-full object-cover transition-transform duration-500 \
                 group-hover:scale-110",
            );
            image.set_src(url);
            image.set_alt(&card.full_title);
            attach_image_fallback(document, &container, &image);
            container.append_child(&image)?;
        }
        ImageSlot::Placeholder => {
            container.append_child(&*build_placeholder(document)?)?;
        }
    }

    container.append_child(&*build_badge(document)?)?;
    container.append_child(&*build_overlay(document)?)?;
    Ok(container)
}

/// Swaps a failed image load for the "No Image Available" panel.
fn attach_image_fallback(document: &Document, container: &Element, image: &HtmlImageElement) {
    let document = document.clone();
    let container = container.clone();
    let on_error = Closure::<dyn FnMut()>::new(move || {
        container.set_inner_html("");
        if let Ok(panel) = document.create_element("div") {
            panel.set_class_name("w-full h-full flex items-center justify-center text-gray-400");
            panel.set_text_content(Some("No Image Available"));
            let _ = container.append_child(&panel);
        }
    });
    image.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    // The handler lives as long as the card; never dropped.
    on_error.forget();
}

fn build_placeholder(document: &Document) -> Result<Element, JsValue> {
    let holder = document.create_element("div")?;
    holder.set_class_name("w-full h-full flex items-center justify-center text-gray-400");

    let svg = document.create_element_ns(Some(SVG_NS), "svg")?;
    svg.set_attribute("class", "h-20 w-20")?;
    svg.set_attribute("fill", "none")?;
    svg.set_attribute("viewBox", "0 0 24 24")?;
    svg.set_attribute("stroke", "currentColor")?;

    let path = document.create_element_ns(Some(SVG_NS), "path")?;
    path.set_attribute("stroke-linecap", "round")?;
    path.set_attribute("stroke-linejoin", "round")?;
    path.set_attribute("stroke-width", "1")?;
    path.set_attribute("d", PLACEHOLDER_ICON_PATH)?;

    svg.append_child(&path)?;
    holder.append_child(&svg)?;
    Ok(holder)
}

fn build_badge(document: &Document) -> Result<Element, JsValue> {
    let wrapper = document.create_element("div")?;
    wrapper.set_class_name("absolute top-4 left-4");

    let badge = document.create_element("span")?;
    badge.set_class_name(
        "bg-primary text-dark text-xs font-bold px-3 py-1.5 rounded-full uppercase \
         tracking-wider shadow-lg",
    );
    badge.set_text_content(Some("NEW"));

    wrapper.append_child(&badge)?;
    Ok(wrapper)
}

fn build_overlay(document: &Document) -> Result<Element, JsValue> {
    let overlay = document.create_element("div")?;
    overlay.set_class_name(
        "absolute inset-0 bg-black bg-opacity-40 flex items-center justify-center opacity-0 \
         group-hover:opacity-100 transition-opacity duration-300",
    );

    let inner = document.create_element("div")?;
    inner.set_class_name(
        "text-white text-center transform translate-y-4 group-hover:translate-y-0 \
         transition-transform duration-300",
    );

    let caption = document.create_element("p")?;
    caption.set_class_name("text-sm mb-2");
    caption.set_text_content(Some("Quick View"));

    let rule = document.create_element("div")?;
    rule.set_class_name("w-8 h-0.5 bg-primary mx-auto");

    inner.append_child(&caption)?;
    inner.append_child(&rule)?;
    overlay.append_child(&inner)?;
    Ok(overlay)
}

fn build_info(document: &Document, card: &RenderedCard) -> Result<Element, JsValue> {
    let info = document.create_element("div")?;
    info.set_class_name("p-6 text-center");

    let heading = document.create_element("h3")?;
    heading.set_class_name(
        "font-bold text-lg text-dark uppercase tracking-wide font-heading mb-2 \
         group-hover:text-primary transition-colors duration-300",
    );
    // Hover tooltip keeps the untruncated title reachable.
    heading.set_attribute("title", &card.full_title)?;
    heading.set_text_content(Some(&card.title));

    let price = document.create_element("p")?;
    price.set_class_name("text-dark font-extrabold text-xl mb-4");
    price.set_text_content(Some(&card.price_label));

    let button = document.create_element("button")?;
    button.set_class_name(
        "w-full bg-dark text-white py-3 px-6 rounded-full font-semibold text-sm \
         hover:bg-primary hover:text-dark transition-all duration-300 transform \
         hover:scale-105 shadow-lg hover:shadow-xl",
    );
    button.set_text_content(Some("ADD TO CART"));

    info.append_child(&heading)?;
    info.append_child(&price)?;
    info.append_child(&button)?;
    Ok(info)
}
