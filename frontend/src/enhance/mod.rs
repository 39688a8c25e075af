//! Cosmetic page behaviour. Each installer is independent; one failing does
//! not stop the others.

pub mod bio;
pub mod hover;
pub mod reveal;
pub mod ripple;
pub mod scroll;

use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Window};

fn report(name: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        warn!("Could not install {}: {:?}", name, e);
    }
}

pub fn install(window: &Window, document: &Document) {
    report("smooth scrolling", scroll::install(window, document));
    report("reveal on scroll", reveal::install(document));
    report("logo glow", hover::install_logo_glow(document));
    report("button ripple", ripple::install(document));
    report("bio toggle", bio::install(window));

    if document.ready_state() == "loading" {
        let ready_document = document.clone();
        let on_ready = Closure::once(move || {
            report("hover emulation", hover::install(&ready_document));
        });
        report(
            "hover emulation",
            document.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref()),
        );
        on_ready.forget();
    } else {
        report("hover emulation", hover::install(document));
    }
}
