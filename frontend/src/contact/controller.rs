use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use log::{debug, error, info, warn};

use super::fallback;
use super::field::FormField;
use super::payload::FormPayload;
use super::relay::{Delivery, Relay};
use crate::config::ContactConfig;

/// Everything the controller reads from or writes to the page.
pub trait FormView {
    fn value(&self, field: &FormField) -> String;
    fn set_error_text(&self, field: &FormField, text: &str);
    fn set_error_visible(&self, field: &FormField, visible: bool);
    fn error_visible(&self, field: &FormField) -> bool;
    fn focus(&self, field: &FormField);

    /// All named entries of the form, required or not.
    fn entries(&self) -> FormPayload;
    fn reset(&self);

    fn submit_label(&self) -> String;
    fn set_submit_label(&self, label: &str);
    fn set_submit_enabled(&self, enabled: bool);
    fn set_submit_tint(&self, color: Option<&str>);

    fn show_note(&self, text: &str);
    fn remove_note(&self);

    fn navigate(&self, url: &str);
}

pub trait Scheduler {
    /// Dropping the handle cancels the task if it has not run yet.
    type Handle;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Self::Handle;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Sent,
    ValidationFailed(FormField),
    TransportFailed,
    /// A relay call for this form was still in flight.
    Busy,
}

/// Drives validation and submission of one contact form.
///
/// All state is owned by the instance, so several forms (or tests) never
/// share error state. Methods take `&self`; no borrow is held across the
/// relay await, so input events keep flowing while a submission is pending.
pub struct FormController<V, R, S: Scheduler> {
    config: ContactConfig,
    fields: Vec<FormField>,
    view: Rc<V>,
    relay: R,
    scheduler: S,
    current_error: Cell<Option<usize>>,
    in_flight: Cell<bool>,
    // Label to put back on the submit control once the confirmation expires.
    pending_restore: Rc<RefCell<Option<String>>>,
    restore_timer: RefCell<Option<S::Handle>>,
}

impl<V, R, S> FormController<V, R, S>
where
    V: FormView + 'static,
    R: Relay,
    S: Scheduler,
{
    pub fn new(
        config: ContactConfig,
        fields: Vec<FormField>,
        view: Rc<V>,
        relay: R,
        scheduler: S,
    ) -> Self {
        Self {
            config,
            fields,
            view,
            relay,
            scheduler,
            current_error: Cell::new(None),
            in_flight: Cell::new(false),
            pending_restore: Rc::new(RefCell::new(None)),
            restore_timer: RefCell::new(None),
        }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    #[cfg(test)]
    pub fn current_error(&self) -> Option<&FormField> {
        self.current_error.get().map(|idx| &self.fields[idx])
    }

    fn position(&self, field: &FormField) -> Option<usize> {
        self.fields.iter().position(|f| f.id == field.id)
    }

    /// First field, in document order, whose value is not acceptable.
    pub fn validate_all(&self) -> Option<&FormField> {
        self.fields
            .iter()
            .find(|field| !field.kind.accepts(&self.view.value(field)))
    }

    /// Only ever clears: a field the user is correcting never gains an error
    /// from typing.
    pub fn on_field_input(&self, field: &FormField) {
        let Some(idx) = self.position(field) else {
            return;
        };
        if self.current_error.get() != Some(idx) {
            return;
        }
        let field = &self.fields[idx];
        if field.kind.accepts(&self.view.value(field)) {
            self.clear_error(field);
        }
    }

    pub fn show_error(&self, field: &FormField) {
        let Some(idx) = self.position(field) else {
            warn!("Ignoring error for untracked field #{}", field.id);
            return;
        };
        if let Some(prev) = self.current_error.get() {
            if prev != idx {
                self.clear_error(&self.fields[prev]);
            }
        }

        let field = &self.fields[idx];
        self.view.set_error_text(field, field.kind.error_message());
        self.view.set_error_visible(field, true);
        self.current_error.set(Some(idx));
        self.view.focus(field);
    }

    pub fn clear_error(&self, field: &FormField) {
        if !self.view.error_visible(field) {
            return;
        }
        self.view.set_error_visible(field, false);
        if let Some(idx) = self.position(field) {
            if self.current_error.get() == Some(idx) {
                self.current_error.set(None);
            }
        }
    }

    fn clear_current_error(&self) {
        if let Some(idx) = self.current_error.take() {
            self.view.set_error_visible(&self.fields[idx], false);
        }
    }

    /// A reset empties every field, so no error may outlive it. A pending
    /// confirmation restore is applied at once.
    pub fn on_form_reset(&self) {
        self.settle_pending_restore();
        self.clear_current_error();
    }

    /// Cancels a pending confirmation restore and applies it right away.
    fn settle_pending_restore(&self) {
        drop(self.restore_timer.borrow_mut().take());
        let label = self.pending_restore.borrow_mut().take();
        if let Some(label) = label {
            debug!("Restoring submit control ahead of schedule");
            restore_submit(&*self.view, &label);
        }
    }

    pub async fn submit(&self) -> SubmissionOutcome {
        if self.in_flight.get() {
            debug!("Contact form submission already in flight");
            return SubmissionOutcome::Busy;
        }
        self.settle_pending_restore();
        self.clear_current_error();

        if let Some(field) = self.validate_all() {
            info!("Contact form invalid at #{}", field.id);
            self.show_error(field);
            return SubmissionOutcome::ValidationFailed(field.clone());
        }

        let payload = self.view.entries().with_relay_fields(&self.config.recipient);
        let original_label = self.view.submit_label();
        self.view.set_submit_enabled(false);
        self.view.set_submit_label(&self.config.busy_label);

        self.in_flight.set(true);
        let delivery = self.relay.deliver(&payload).await;
        self.in_flight.set(false);

        match delivery {
            Delivery::Delivered => {
                info!("Contact form delivered");
                self.confirm(original_label);
                SubmissionOutcome::Sent
            }
            Delivery::Failed(e) => {
                error!("Form submission error: {}", e);
                self.view.set_submit_enabled(true);
                self.view.set_submit_label(&original_label);
                self.view
                    .navigate(&fallback::mailto_url(&self.config.recipient, &payload));
                SubmissionOutcome::TransportFailed
            }
        }
    }

    fn confirm(&self, original_label: String) {
        self.view.set_submit_label(&self.config.sent_label);
        self.view.set_submit_tint(Some(&self.config.sent_tint));
        self.view.reset();
        self.clear_current_error();
        self.view.show_note(&self.config.confirmation_text);

        *self.pending_restore.borrow_mut() = Some(original_label);
        let view = Rc::clone(&self.view);
        let pending = Rc::clone(&self.pending_restore);
        let delay = Duration::from_millis(u64::from(self.config.confirmation_delay_ms));
        let handle = self.scheduler.schedule(
            delay,
            Box::new(move || {
                let label = pending.borrow_mut().take();
                if let Some(label) = label {
                    restore_submit(&*view, &label);
                }
            }),
        );
        *self.restore_timer.borrow_mut() = Some(handle);
    }
}

fn restore_submit<V: FormView + ?Sized>(view: &V, label: &str) {
    view.set_submit_enabled(true);
    view.set_submit_label(label);
    view.set_submit_tint(None);
    view.remove_note();
}
