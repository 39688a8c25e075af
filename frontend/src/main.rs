use log::{error, info, warn};

mod config;
mod contact {
    pub mod controller;
    pub mod dom;
    pub mod fallback;
    pub mod field;
    pub mod payload;
    pub mod relay;
}
mod enhance;

use config::ContactConfig;

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting page enhancements");
    let Some(window) = web_sys::window() else {
        error!("No window available");
        return;
    };
    let Some(document) = window.document() else {
        error!("No document available");
        return;
    };

    enhance::install(&window, &document);

    let config = ContactConfig::from_document(&document);
    // Listeners keep their own handles to the controller.
    if let Err(e) = contact::dom::bind(&window, &document, config) {
        warn!("Contact form left unenhanced: {}", e);
    }
}
