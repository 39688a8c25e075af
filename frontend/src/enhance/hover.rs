//! Inline-style stand-ins for the utility-class `hover:` and `group-hover:`
//! variants that the page's stylesheet does not ship.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlElement};

const GLOW: &str = "0 0 20px -5px hsl(var(--primary) / 0.4)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverRule {
    /// Class name fragment that opts an element in.
    pub marker: &'static str,
    pub property: &'static str,
    pub value: &'static str,
}

impl HoverRule {
    const fn new(marker: &'static str, property: &'static str, value: &'static str) -> Self {
        Self {
            marker,
            property,
            value,
        }
    }

    pub fn selector(&self) -> String {
        format!("[class*=\"{}\"]", self.marker)
    }
}

pub const HOVER_RULES: [HoverRule; 6] = [
    HoverRule::new("hover:border-primary/30", "border-color", "hsl(var(--primary) / 0.3)"),
    HoverRule::new("hover:bg-secondary/50", "background-color", "hsl(var(--secondary) / 0.5)"),
    HoverRule::new("hover:border-primary/50", "border-color", "hsl(var(--primary) / 0.5)"),
    HoverRule::new("hover:text-foreground", "color", "hsl(var(--foreground))"),
    HoverRule::new("hover:bg-secondary/80", "background-color", "hsl(var(--secondary) / 0.8)"),
    HoverRule::new("hover:glow-primary-sm", "box-shadow", GLOW),
];

/// Applied to descendants while the pointer is over the enclosing `.group`.
pub const GROUP_HOVER_RULES: [HoverRule; 4] = [
    HoverRule::new("group-hover:bg-primary/20", "background-color", "hsl(var(--primary) / 0.2)"),
    HoverRule::new("group-hover:text-primary/40", "color", "hsl(var(--primary) / 0.4)"),
    HoverRule::new("group-hover:scale-110", "transform", "scale(1.1)"),
    HoverRule::new("group-hover:glow-primary-sm", "box-shadow", GLOW),
];

const LOGO_SELECTOR: &str = "nav a.group";
const LOGO_GLOW_TARGET: &str = "[class~=\"group-hover:glow-primary-sm\"]";
const LOGO_GLOW_CLASS: &str = "glow-primary-sm";

fn listen(source: &Element, event: &str, mut handler: impl FnMut() + 'static) -> Result<(), JsValue> {
    let callback = Closure::wrap(Box::new(move |_: Event| handler()) as Box<dyn FnMut(Event)>);
    source.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

fn bind_rule(source: &Element, target: HtmlElement, rule: HoverRule) -> Result<(), JsValue> {
    let enter_target = target.clone();
    listen(source, "mouseenter", move || {
        let _ = enter_target.style().set_property(rule.property, rule.value);
    })?;
    listen(source, "mouseleave", move || {
        let _ = target.style().remove_property(rule.property);
    })
}

fn elements(root: &Element, selector: &str) -> Result<Vec<Element>, JsValue> {
    let nodes = root.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect())
}

pub fn install(document: &Document) -> Result<(), JsValue> {
    let Some(root) = document.document_element() else {
        return Ok(());
    };

    for rule in HOVER_RULES {
        for element in elements(&root, &rule.selector())? {
            if let Ok(target) = element.clone().dyn_into::<HtmlElement>() {
                bind_rule(&element, target, rule)?;
            }
        }
    }

    for group in elements(&root, ".group")? {
        for rule in GROUP_HOVER_RULES {
            for child in elements(&group, &rule.selector())? {
                if let Ok(target) = child.dyn_into::<HtmlElement>() {
                    bind_rule(&group, target, rule)?;
                }
            }
        }
    }
    Ok(())
}

/// Navbar logo: toggles the glow class rather than an inline style.
pub fn install_logo_glow(document: &Document) -> Result<(), JsValue> {
    let Some(logo) = document.query_selector(LOGO_SELECTOR)? else {
        return Ok(());
    };

    let enter_logo = logo.clone();
    listen(&logo, "mouseenter", move || {
        if let Ok(Some(glow)) = enter_logo.query_selector(LOGO_GLOW_TARGET) {
            let _ = glow.class_list().add_1(LOGO_GLOW_CLASS);
        }
    })?;
    let leave_logo = logo.clone();
    listen(&logo, "mouseleave", move || {
        if let Ok(Some(glow)) = leave_logo.query_selector(LOGO_GLOW_TARGET) {
            let _ = glow.class_list().remove_1(LOGO_GLOW_CLASS);
        }
    })
}
