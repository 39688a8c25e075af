use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Event, HtmlElement};

const BUTTON_SELECTOR: &str = ".btn-primary, .btn-secondary";
const RIPPLE_LIFETIME_MS: u32 = 600;

const RIPPLE_KEYFRAMES: &str = r#"
    @keyframes ripple {
        to {
            transform: scale(4);
            opacity: 0;
        }
    }
"#;

const RIPPLE_STYLE: [(&str, &str); 11] = [
    ("position", "absolute"),
    ("border-radius", "50%"),
    ("background", "rgba(255, 255, 255, 0.3)"),
    ("transform", "scale(0)"),
    ("animation", "ripple 0.6s linear"),
    ("left", "50%"),
    ("top", "50%"),
    ("width", "20px"),
    ("height", "20px"),
    ("margin-left", "-10px"),
    ("margin-top", "-10px"),
];

fn inject_keyframes(document: &Document) -> Result<(), JsValue> {
    let style = document.create_element("style")?;
    style.set_text_content(Some(RIPPLE_KEYFRAMES));
    if let Some(head) = document.head() {
        head.append_child(&style)?;
    }
    Ok(())
}

fn spawn_ripple(document: &Document, button: &HtmlElement) -> Result<(), JsValue> {
    let ripple: HtmlElement = document.create_element("span")?.unchecked_into();
    let style = ripple.style();
    for (property, value) in RIPPLE_STYLE {
        style.set_property(property, value)?;
    }

    let button_style = button.style();
    button_style.set_property("position", "relative")?;
    button_style.set_property("overflow", "hidden")?;
    button.append_child(&ripple)?;

    Timeout::new(RIPPLE_LIFETIME_MS, move || ripple.remove()).forget();
    Ok(())
}

/// Click ripple on the primary and secondary call-to-action buttons.
pub fn install(document: &Document) -> Result<(), JsValue> {
    inject_keyframes(document)?;

    let buttons = document.query_selector_all(BUTTON_SELECTOR)?;
    for index in 0..buttons.length() {
        let Some(button) = buttons.item(index).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };
        let document = document.clone();
        let target = button.clone();
        let on_click = Closure::wrap(Box::new(move |_: Event| {
            let _ = spawn_ripple(&document, &target);
        }) as Box<dyn FnMut(Event)>);
        button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }
    Ok(())
}
