use std::future::Future;
use std::rc::Rc;

use dioxus::prelude::*;
use eventnow_core::form::{SyncValidator, Validate};
use eventnow_core::{Form, FormOptions, FormState, SubmitOutcome};
use eventnow_shared::{FieldErrors, FieldValue, FormValues};

use super::SignalCell;

/// A [`Form`] living in a signal, plus the event-handler glue views need.
pub struct UseForm<T: FormValues> {
    form: Form<T, SignalCell<FormState<T>>>,
    state: Signal<FormState<T>>,
}

impl<T: FormValues> Clone for UseForm<T> {
    fn clone(&self) -> Self {
        Self {
            form: self.form.clone(),
            state: self.state,
        }
    }
}

/// Form state for one component. `initial` is re-registered on every render
/// so `reset_form` restores the caller's latest initial values.
pub fn use_form<T: FormValues>(
    initial: T,
    options: FormOptions,
    validate: Option<fn(&T) -> FieldErrors>,
) -> UseForm<T> {
    let state = use_signal(|| FormState::new(initial.clone()));
    let form = use_hook(|| {
        let form = Form::new(SignalCell(state), options);
        match validate {
            Some(validate) => {
                let validator: Rc<dyn Validate<T>> = Rc::new(SyncValidator(validate));
                form.with_validator(validator)
            }
            None => form,
        }
    });
    form.sync_initial_values(&initial);
    UseForm { form, state }
}

impl<T: FormValues> UseForm<T> {
    pub fn form(&self) -> &Form<T, SignalCell<FormState<T>>> {
        &self.form
    }

    /// Subscribes the calling component.
    pub fn state(&self) -> FormState<T> {
        self.state.read().clone()
    }

    pub fn values(&self) -> T {
        self.state.read().values.clone()
    }

    pub fn text(&self, field: &str) -> String {
        self.state
            .read()
            .values
            .field(field)
            .and_then(|v| v.as_text().map(str::to_string))
            .unwrap_or_default()
    }

    pub fn checked(&self, field: &str) -> bool {
        self.state
            .read()
            .values
            .field(field)
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }

    /// The message to show under `field`, once it has been touched.
    pub fn error(&self, field: &str) -> Option<String> {
        self.state.read().visible_error(field).map(str::to_string)
    }

    pub fn is_submitting(&self) -> bool {
        self.state.read().is_submitting
    }

    pub fn is_valid(&self) -> bool {
        self.state.read().is_valid()
    }

    pub fn change(&self, field: &'static str, value: impl Into<FieldValue>) {
        if self.form.apply_change(field, value) {
            let form = self.form.clone();
            spawn(async move {
                form.validate_field(field).await;
            });
        }
    }

    pub fn blur(&self, field: &'static str) {
        if self.form.apply_blur(field) {
            let form = self.form.clone();
            spawn(async move {
                form.validate_field(field).await;
            });
        }
    }

    pub fn on_input(&self, field: &'static str) -> impl FnMut(FormEvent) + 'static {
        let this = self.clone();
        move |evt: FormEvent| this.change(field, evt.value())
    }

    pub fn on_check(&self, field: &'static str) -> impl FnMut(FormEvent) + 'static {
        let this = self.clone();
        move |evt: FormEvent| this.change(field, evt.checked())
    }

    pub fn on_blur(&self, field: &'static str) -> impl FnMut(FocusEvent) + 'static {
        let this = self.clone();
        move |_| this.blur(field)
    }

    /// `onsubmit` handler: validates, then runs `on_submit` with the values.
    pub fn on_submit<F, Fut>(&self, on_submit: F) -> impl FnMut(FormEvent) + 'static
    where
        F: Fn(T) -> Fut + Clone + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        let form = self.form.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let form = form.clone();
            let on_submit = on_submit.clone();
            spawn(async move {
                if let SubmitOutcome::Invalid(errors) = form.handle_submit(on_submit).await {
                    eventnow_core::log_debug!("Form rejected with {} error(s)", errors.len());
                }
            });
        }
    }

    pub fn reset(&self) {
        self.form.reset_form();
    }

    pub fn set_error(&self, field: &str, message: Option<String>) {
        self.form.set_field_error(field, message);
    }

    pub fn set_values(&self, values: T) {
        self.form.set_values(values);
    }
}
