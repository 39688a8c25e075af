use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gloo_timers::callback::Timeout;
use log::{debug, info, warn};
use thiserror::Error;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::js_sys;
use web_sys::{
    Document, Element, Event, FormData, HtmlButtonElement, HtmlElement, HtmlFormElement,
    HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, Window,
};

use super::controller::{FormController, FormView, Scheduler};
use super::field::{FieldKind, FormField};
use super::payload::FormPayload;
use super::relay::HttpRelay;
use crate::config::ContactConfig;

const REQUIRED_SELECTOR: &str = "input[required], textarea[required], select[required]";
const NOTE_CLASSES: &str = "mt-8 text-sm text-primary text-center";

pub type ContactController = FormController<DomForm, HttpRelay, TimeoutScheduler>;

#[derive(Debug, Error)]
pub enum BindError {
    #[error("DOM operation failed: {0}")]
    Dom(String),
    #[error("#{0} is not a form element")]
    NotAForm(String),
}

impl From<JsValue> for BindError {
    fn from(value: JsValue) -> Self {
        BindError::Dom(format!("{:?}", value))
    }
}

/// `gloo` timeouts clear themselves when dropped.
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Timeout {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, task)
    }
}

/// The contact form as it exists in the page.
pub struct DomForm {
    window: Window,
    document: Document,
    form: HtmlFormElement,
    controls: Vec<(String, Element)>,
    submit: Option<HtmlButtonElement>,
    note: RefCell<Option<Element>>,
}

impl DomForm {
    fn control(&self, field: &FormField) -> Option<&Element> {
        self.controls
            .iter()
            .find(|(id, _)| *id == field.id)
            .map(|(_, element)| element)
    }

    fn error_slot(&self, field: &FormField) -> Option<Element> {
        self.document.get_element_by_id(&field.error_slot_id())
    }

    fn collect_entries(&self) -> Result<FormPayload, JsValue> {
        let data = FormData::new_with_form(&self.form)?;
        let mut payload = FormPayload::new();
        let Some(entries) = js_sys::try_iter(data.as_ref())? else {
            return Ok(payload);
        };
        for entry in entries {
            let pair: js_sys::Array = entry?.unchecked_into();
            // File inputs yield blobs, which the relay payload does not carry.
            if let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
                payload.append(name, value);
            }
        }
        Ok(payload)
    }
}

impl FormView for DomForm {
    fn value(&self, field: &FormField) -> String {
        let Some(element) = self.control(field) else {
            return String::new();
        };
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(textarea) = element.dyn_ref::<HtmlTextAreaElement>() {
            textarea.value()
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            String::new()
        }
    }

    fn set_error_text(&self, field: &FormField, text: &str) {
        if let Some(slot) = self.error_slot(field) {
            slot.set_text_content(Some(text));
        }
    }

    fn set_error_visible(&self, field: &FormField, visible: bool) {
        if let Some(slot) = self.error_slot(field) {
            let classes = slot.class_list();
            let _ = if visible {
                classes.add_1("show")
            } else {
                classes.remove_1("show")
            };
        }
    }

    fn error_visible(&self, field: &FormField) -> bool {
        self.error_slot(field)
            .map(|slot| slot.class_list().contains("show"))
            .unwrap_or(false)
    }

    fn focus(&self, field: &FormField) {
        if let Some(element) = self.control(field).and_then(|e| e.dyn_ref::<HtmlElement>()) {
            let _ = element.focus();
        }
    }

    fn entries(&self) -> FormPayload {
        self.collect_entries().unwrap_or_else(|e| {
            warn!("Could not read contact form entries: {:?}", e);
            FormPayload::new()
        })
    }

    fn reset(&self) {
        self.form.reset();
    }

    fn submit_label(&self) -> String {
        self.submit
            .as_ref()
            .map(|button| button.inner_html())
            .unwrap_or_default()
    }

    fn set_submit_label(&self, label: &str) {
        if let Some(button) = &self.submit {
            button.set_inner_html(label);
        }
    }

    fn set_submit_enabled(&self, enabled: bool) {
        if let Some(button) = &self.submit {
            button.set_disabled(!enabled);
        }
    }

    fn set_submit_tint(&self, color: Option<&str>) {
        if let Some(button) = &self.submit {
            let style = button.style();
            let _ = match color {
                Some(color) => style.set_property("background-color", color),
                None => style.remove_property("background-color").map(|_| ()),
            };
        }
    }

    fn show_note(&self, text: &str) {
        self.remove_note();
        let Ok(note) = self.document.create_element("p") else {
            return;
        };
        note.set_class_name(NOTE_CLASSES);
        let _ = note.set_attribute("style", "margin-top: 2rem;");
        note.set_text_content(Some(text));
        if self.form.append_child(&note).is_ok() {
            *self.note.borrow_mut() = Some(note);
        }
    }

    fn remove_note(&self) {
        if let Some(note) = self.note.borrow_mut().take() {
            note.remove();
        }
    }

    fn navigate(&self, url: &str) {
        if let Err(e) = self.window.location().set_href(url) {
            warn!("Could not open mail client: {:?}", e);
        }
    }
}

fn field_for(element: &Element, index: u32) -> FormField {
    let input_type = element
        .dyn_ref::<HtmlInputElement>()
        .map(|input| input.type_());
    let kind = FieldKind::classify(&element.tag_name(), input_type.as_deref());

    let mut id = element.id();
    if id.is_empty() {
        id = format!("contact-field-{}", index);
        element.set_id(&id);
    }
    FormField::new(id, kind)
}

/// Appends the hidden message slot that `show_error` fills in.
fn attach_error_slot(document: &Document, element: &Element, field: &FormField) -> Result<(), BindError> {
    let slot = document.create_element("div")?;
    slot.set_class_name("validation-message");
    slot.set_id(&field.error_slot_id());
    if let Some(parent) = element.parent_node() {
        parent.append_child(&slot)?;
    }
    Ok(())
}

/// Finds the contact form, builds its controller and wires the page events to
/// it. Returns `Ok(None)` when the page has no contact form.
pub fn bind(
    window: &Window,
    document: &Document,
    config: ContactConfig,
) -> Result<Option<Rc<ContactController>>, BindError> {
    let Some(element) = document.get_element_by_id(&config.form_id) else {
        debug!("No #{} on this page", config.form_id);
        return Ok(None);
    };
    let form: HtmlFormElement = element
        .dyn_into()
        .map_err(|_| BindError::NotAForm(config.form_id.clone()))?;

    let nodes = form.query_selector_all(REQUIRED_SELECTOR)?;
    let mut fields = Vec::new();
    let mut controls = Vec::new();
    for index in 0..nodes.length() {
        let Some(element) = nodes.item(index).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let field = field_for(&element, index);
        attach_error_slot(document, &element, &field)?;
        controls.push((field.id.clone(), element));
        fields.push(field);
    }

    let submit = form
        .query_selector("button[type=\"submit\"]")?
        .and_then(|e| e.dyn_into::<HtmlButtonElement>().ok());
    if submit.is_none() {
        warn!("#{} has no submit button", config.form_id);
    }

    let view = Rc::new(DomForm {
        window: window.clone(),
        document: document.clone(),
        form: form.clone(),
        controls: controls.clone(),
        submit,
        note: RefCell::new(None),
    });
    let relay = HttpRelay::new(config.relay_url.clone());
    let controller = Rc::new(FormController::new(
        config,
        fields,
        view,
        relay,
        TimeoutScheduler,
    ));

    for ((_, element), field) in controls.iter().zip(controller.fields().to_vec()) {
        // Suppress the browser's native validation bubble.
        let suppress_invalid = Closure::wrap(Box::new(move |e: Event| {
            e.prevent_default();
        }) as Box<dyn FnMut(Event)>);
        element.add_event_listener_with_callback("invalid", suppress_invalid.as_ref().unchecked_ref())?;
        suppress_invalid.forget();

        let input_controller = Rc::clone(&controller);
        let on_input = Closure::wrap(Box::new(move |_: Event| {
            input_controller.on_field_input(&field);
        }) as Box<dyn FnMut(Event)>);
        element.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;
        on_input.forget();
    }

    let submit_controller = Rc::clone(&controller);
    let on_submit = Closure::wrap(Box::new(move |e: Event| {
        e.prevent_default();
        let controller = Rc::clone(&submit_controller);
        spawn_local(async move {
            let outcome = controller.submit().await;
            debug!("Contact form outcome: {:?}", outcome);
        });
    }) as Box<dyn FnMut(Event)>);
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();

    let reset_controller = Rc::clone(&controller);
    let on_reset = Closure::wrap(Box::new(move |_: Event| {
        reset_controller.on_form_reset();
    }) as Box<dyn FnMut(Event)>);
    form.add_event_listener_with_callback("reset", on_reset.as_ref().unchecked_ref())?;
    on_reset.forget();

    info!(
        "Contact form bound with {} required fields",
        controller.fields().len()
    );
    Ok(Some(controller))
}
