use log::{warn, Level};
use serde::Deserialize;
use web_sys::Document;

/// Id of the optional `<script type="application/json">` block that overrides
/// any subset of [`ContactConfig`].
pub const CONFIG_ELEMENT_ID: &str = "contact-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub form_id: String,
    pub relay_url: String,
    pub recipient: String,
    pub busy_label: String,
    pub sent_label: String,
    pub sent_tint: String,
    pub confirmation_text: String,
    pub confirmation_delay_ms: u32,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            form_id: "contact-form".to_string(),
            relay_url: "https://formspree.io/f/xlgeyqey".to_string(),
            recipient: "hello@wombatlabs.ai".to_string(),
            busy_label: "Sending...".to_string(),
            sent_label: "Message Sent!".to_string(),
            sent_tint: "#10b981".to_string(),
            confirmation_text: "Thanks! We'll get back to you shortly.".to_string(),
            confirmation_delay_ms: 5_000,
        }
    }
}

impl ContactConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Reads the embedded override block, falling back to defaults when it is
    /// missing or malformed.
    pub fn from_document(document: &Document) -> Self {
        let Some(raw) = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|element| element.text_content())
        else {
            return Self::default();
        };

        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring malformed #{}: {}", CONFIG_ELEMENT_ID, e);
                Self::default()
            }
        }
    }
}
