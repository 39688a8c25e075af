use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

/// Height of the fixed navbar that anchored sections must clear.
pub const NAV_OFFSET: i32 = 80;

/// Selector for an in-page anchor, or `None` for a bare `#`.
pub fn anchor_target(href: &str) -> Option<&str> {
    match href.strip_prefix('#') {
        Some(rest) if !rest.is_empty() => Some(href),
        _ => None,
    }
}

pub fn scroll_top_for(offset_top: i32) -> f64 {
    f64::from(offset_top - NAV_OFFSET)
}

/// Intercepts every same-page anchor and scrolls smoothly instead of jumping.
pub fn install(window: &Window, document: &Document) -> Result<(), JsValue> {
    let anchors = document.query_selector_all("a[href^=\"#\"]")?;
    for index in 0..anchors.length() {
        let Some(anchor) = anchors.item(index).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let window = window.clone();
        let document = document.clone();
        let href_source = anchor.clone();
        let on_click = Closure::wrap(Box::new(move |e: Event| {
            e.prevent_default();
            let href = href_source.get_attribute("href").unwrap_or_default();
            let Some(selector) = anchor_target(&href) else {
                return;
            };
            // An href that isn't a valid selector simply finds nothing.
            let target = document
                .query_selector(selector)
                .ok()
                .flatten()
                .and_then(|t| t.dyn_into::<HtmlElement>().ok());
            if let Some(target) = target {
                let options = ScrollToOptions::new();
                options.set_top(scroll_top_for(target.offset_top()));
                options.set_behavior(ScrollBehavior::Smooth);
                window.scroll_to_with_scroll_to_options(&options);
            } else {
                debug!("No scroll target for {}", href);
            }
        }) as Box<dyn FnMut(Event)>);
        anchor.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }
    Ok(())
}
