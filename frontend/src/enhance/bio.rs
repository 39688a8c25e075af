use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Reflect;
use web_sys::{HtmlElement, Window};

/// Name under which the toggle is published for inline `onclick` handlers.
pub const GLOBAL_NAME: &str = "toggleBio";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BioState {
    pub display: &'static str,
    pub label: &'static str,
    pub expanded: bool,
}

const COLLAPSED: BioState = BioState {
    display: "none",
    label: "more",
    expanded: false,
};

const EXPANDED: BioState = BioState {
    display: "block",
    label: "less",
    expanded: true,
};

/// The block starts out visible on mobile, so an unset display counts as
/// expanded. Any other display value is treated as collapsed.
pub fn is_expanded(display: &str) -> bool {
    display.is_empty() || display == "block"
}

pub fn next_state(display: &str) -> BioState {
    if is_expanded(display) {
        COLLAPSED
    } else {
        EXPANDED
    }
}

pub fn toggle(button: &HtmlElement) -> Result<(), JsValue> {
    let Some(content) = button.previous_element_sibling() else {
        return Ok(());
    };
    if !content.class_list().contains("bio-content") {
        return Ok(());
    }
    let expandable = content
        .query_selector(".bio-expandable")?
        .and_then(|e| e.dyn_into::<HtmlElement>().ok());
    let toggle_text = button.query_selector(".bio-toggle-text")?;
    let (Some(expandable), Some(toggle_text)) = (expandable, toggle_text) else {
        debug!("Bio toggle is missing its content or label");
        return Ok(());
    };

    let style = expandable.style();
    let next = next_state(&style.get_property_value("display")?);
    style.set_property("display", next.display)?;
    toggle_text.set_text_content(Some(next.label));
    if next.expanded {
        button.class_list().add_1("expanded")
    } else {
        button.class_list().remove_1("expanded")
    }
}

/// Publishes `window.toggleBio(button)`.
pub fn install(window: &Window) -> Result<(), JsValue> {
    let callback = Closure::wrap(Box::new(move |button: JsValue| {
        if let Ok(button) = button.dyn_into::<HtmlElement>() {
            if let Err(e) = toggle(&button) {
                debug!("Bio toggle failed: {:?}", e);
            }
        }
    }) as Box<dyn FnMut(JsValue)>);
    Reflect::set(window, &JsValue::from_str(GLOBAL_NAME), callback.as_ref())?;
    callback.forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_block_collapses() {
        assert_eq!(next_state(""), COLLAPSED);
        assert_eq!(next_state("block"), COLLAPSED);
    }

    #[test]
    fn hidden_or_other_display_expands() {
        assert_eq!(next_state("none"), EXPANDED);
        assert_eq!(next_state("flex"), EXPANDED);
    }

    #[test]
    fn toggling_twice_returns_to_start() {
        let once = next_state("");
        let twice = next_state(once.display);
        assert_eq!(twice.display, "block");
        assert_eq!(twice.label, "less");
        assert!(twice.expanded);
    }
}
