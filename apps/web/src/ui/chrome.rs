use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    console, Document, Element, Event, HtmlElement, HtmlInputElement, ScrollBehavior,
    ScrollIntoViewOptions, Window,
};

const SEARCH_FOCUS_DELAY_MS: i32 = 300;
const MESSAGE_VISIBLE_MS: i32 = 3000;

/// Page chrome around the drops pipeline: search bar toggle, newsletter
/// messaging, smooth anchor scrolling, and the animation stylesheet.
///
/// All of it is stateless wiring. Each piece tolerates missing elements
/// so a partial page never takes the rest down with it.
pub fn wire_page(window: &Window, document: &Document) {
    if let Err(err) = wire_search_bar(window, document) {
        report("search bar", &err);
    }
    if let Err(err) = wire_newsletter(window, document) {
        report("newsletter form", &err);
    }
    if let Err(err) = wire_smooth_scroll(document) {
        report("navigation links", &err);
    }
    if let Err(err) = inject_stylesheet(document) {
        report("animation stylesheet", &err);
    }
}

fn report(what: &str, err: &JsValue) {
    console::warn_2(&format!("Skipping {what} wiring:").into(), err);
}

fn wire_search_bar(window: &Window, document: &Document) -> Result<(), JsValue> {
    let (Some(icon), Some(bar), Some(close)) = (
        document.get_element_by_id("search-icon"),
        document.get_element_by_id("search-bar"),
        document.get_element_by_id("close-search"),
    ) else {
        console::warn_1(&"Search bar elements missing; search toggle disabled".into());
        return Ok(());
    };

    let open = {
        let window = window.clone();
        let bar = bar.clone();
        Closure::<dyn FnMut()>::new(move || {
            let Ok(now_active) = bar.class_list().toggle("active") else {
                return;
            };
            if now_active {
                // Focus once the CSS slide-in transition has finished.
                let bar = bar.clone();
                let focus = Closure::once_into_js(move || {
                    if let Ok(Some(input)) = bar.query_selector("input") {
                        if let Ok(input) = input.dyn_into::<HtmlElement>() {
                            let _ = input.focus();
                        }
                    }
                });
                let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    focus.unchecked_ref(),
                    SEARCH_FOCUS_DELAY_MS,
                );
            }
        })
    };
    icon.add_event_listener_with_callback("click", open.as_ref().unchecked_ref())?;
    open.forget();

    let dismiss = {
        let bar = bar.clone();
        Closure::<dyn FnMut()>::new(move || {
            let _ = bar.class_list().remove_1("active");
            if let Ok(Some(input)) = bar.query_selector("input") {
                if let Ok(input) = input.dyn_into::<HtmlInputElement>() {
                    input.set_value("");
                }
            }
        })
    };
    close.add_event_listener_with_callback("click", dismiss.as_ref().unchecked_ref())?;
    dismiss.forget();

    Ok(())
}

fn wire_newsletter(window: &Window, document: &Document) -> Result<(), JsValue> {
    let (Some(form), Some(input), Some(message_box)) = (
        document.get_element_by_id("newsletter-form"),
        document.get_element_by_id("email-input"),
        document.get_element_by_id("message-box"),
    ) else {
        console::warn_1(&"Newsletter elements missing; subscription form disabled".into());
        return Ok(());
    };
    let (Ok(input), Ok(message_box)) = (
        input.dyn_into::<HtmlInputElement>(),
        message_box.dyn_into::<HtmlElement>(),
    ) else {
        console::warn_1(&"Newsletter elements have unexpected types; form disabled".into());
        return Ok(());
    };

    let submit = {
        let window = window.clone();
        Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();

            let email = input.value();
            if email.is_empty() {
                show_message(
                    &window,
                    &message_box,
                    "Please enter a valid email address.",
                    "#ef4444",
                    "#ffffff",
                );
            } else {
                console::log_1(&format!("Subscribed with: {email}").into());
                show_message(
                    &window,
                    &message_box,
                    "Thanks for subscribing!",
                    "#00E6D2",
                    "#1C1C1C",
                );
                input.set_value("");
            }
        })
    };
    form.add_event_listener_with_callback("submit", submit.as_ref().unchecked_ref())?;
    submit.forget();

    Ok(())
}

/// Shows a transient notice in the message box, then hides it again
/// after [`MESSAGE_VISIBLE_MS`].
fn show_message(
    window: &Window,
    message_box: &HtmlElement,
    text: &str,
    background: &str,
    color: &str,
) {
    message_box.set_text_content(Some(text));
    let style = message_box.style();
    let _ = style.set_property("background-color", background);
    let _ = style.set_property("color", color);
    let _ = message_box.class_list().add_1("show");

    let hide = {
        let message_box = message_box.clone();
        Closure::once_into_js(move || {
            let _ = message_box.class_list().remove_1("show");
        })
    };
    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        hide.unchecked_ref(),
        MESSAGE_VISIBLE_MS,
    );
}

fn wire_smooth_scroll(document: &Document) -> Result<(), JsValue> {
    let links = document.query_selector_all(r##"a[href^="#"]"##)?;

    for index in 0..links.length() {
        let Some(node) = links.item(index) else {
            continue;
        };
        let Ok(link) = node.dyn_into::<Element>() else {
            continue;
        };

        let handler = {
            let document = document.clone();
            let link = link.clone();
            Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                event.prevent_default();

                let Some(target_id) = link.get_attribute("href") else {
                    return;
                };
                let Ok(Some(target)) = document.query_selector(&target_id) else {
                    return;
                };

                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            })
        };
        link.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
        handler.forget();
    }

    Ok(())
}

const PAGE_ANIMATIONS_CSS: &str = r"
    .animate-spin {
        animation: spin 1s linear infinite;
    }

    @keyframes spin {
        from { transform: rotate(0deg); }
        to { transform: rotate(360deg); }
    }

    .group:hover .group-hover\:scale-110 {
        transform: scale(1.1);
    }

    .group:hover .group-hover\:translate-y-0 {
        transform: translateY(0);
    }

    .group:hover .group-hover\:opacity-100 {
        opacity: 1;
    }

    .group:hover .group-hover\:-translate-y-1 {
        transform: translateY(-4px);
    }

    .grid > div {
        animation: fadeInUp 0.6s ease-out forwards;
        opacity: 0;
        transform: translateY(20px);
    }

    .grid > div:nth-child(1) { animation-delay: 0.1s; }
    .grid > div:nth-child(2) { animation-delay: 0.2s; }
    .grid > div:nth-child(3) { animation-delay: 0.3s; }
    .grid > div:nth-child(4) { animation-delay: 0.4s; }

    @keyframes fadeInUp {
        to {
            opacity: 1;
            transform: translateY(0);
        }
    }
";

/// Appends the spinner, hover, and stagger animation rules to `<head>`.
fn inject_stylesheet(document: &Document) -> Result<(), JsValue> {
    let Some(head) = document.head() else {
        console::warn_1(&"Document has no <head>; skipping animation styles".into());
        return Ok(());
    };

    let style = document.create_element("style")?;
    style.set_text_content(Some(PAGE_ANIMATIONS_CSS));
    head.append_child(&style)?;
    Ok(())
}
