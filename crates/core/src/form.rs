//! Form state machine.
//!
//! A [`Form`] drives one [`FormState`]: raw values, the error map, touched
//! flags and the submission flag. Validation may be synchronous or async.
//! Validation runs are fenced per field (and form-wide), so a slow run never
//! overwrites the result of a newer one.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

use eventnow_shared::{FieldErrors, FieldValue, FormValues, Touched};

use crate::cell::StateCell;
use crate::log_warn;

#[derive(Debug, Clone, PartialEq)]
pub struct FormState<T> {
    pub values: T,
    pub errors: FieldErrors,
    pub touched: Touched,
    pub is_submitting: bool,
    /// The last form-wide validation ran against the current values.
    pub validated: bool,
    /// A validator is attached, so an unvalidated form is not yet valid.
    pub requires_validation: bool,
}

impl<T> FormState<T> {
    pub fn new(values: T) -> Self {
        Self {
            values,
            errors: FieldErrors::new(),
            touched: Touched::default(),
            is_submitting: false,
            validated: false,
            requires_validation: false,
        }
    }

    /// No error messages, and, when a validator is attached, the current
    /// values have been through a form-wide validation.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty() && (!self.requires_validation || self.validated)
    }

    /// The error to render next to `field`: only once the field was touched.
    pub fn visible_error(&self, field: &str) -> Option<&str> {
        if self.touched.is_touched(field) {
            self.errors.get(field)
        } else {
            None
        }
    }
}

/// Checks a full set of values and reports per-field messages.
#[async_trait::async_trait(?Send)]
pub trait Validate<T: 'static> {
    async fn validate(&self, values: &T) -> FieldErrors;
}

/// Wraps a plain `Fn(&T) -> FieldErrors`.
pub struct SyncValidator<F>(pub F);

#[async_trait::async_trait(?Send)]
impl<T, F> Validate<T> for SyncValidator<F>
where
    T: 'static,
    F: Fn(&T) -> FieldErrors,
{
    async fn validate(&self, values: &T) -> FieldErrors {
        (self.0)(values)
    }
}

/// Wraps a validator that has to wait, e.g. on a server-side uniqueness check.
pub struct AsyncValidator<F>(pub F);

#[async_trait::async_trait(?Send)]
impl<T, F, Fut> Validate<T> for AsyncValidator<F>
where
    T: Clone + 'static,
    F: Fn(T) -> Fut,
    Fut: Future<Output = FieldErrors> + 'static,
{
    async fn validate(&self, values: &T) -> FieldErrors {
        (self.0)(values.clone()).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormOptions {
    pub validate_on_change: bool,
    pub validate_on_blur: bool,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            validate_on_change: false,
            validate_on_blur: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<R> {
    Submitted(R),
    Invalid(FieldErrors),
    /// A submission was already running; nothing was done.
    AlreadySubmitting,
}

const WHOLE_FORM: &str = "*";

pub struct Form<T: 'static, C> {
    state: C,
    initial: Rc<RefCell<T>>,
    validator: Option<Rc<dyn Validate<T>>>,
    options: FormOptions,
    seq: Rc<Cell<u64>>,
    latest: Rc<RefCell<HashMap<String, u64>>>,
}

impl<T: 'static, C: Clone> Clone for Form<T, C> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            initial: self.initial.clone(),
            validator: self.validator.clone(),
            options: self.options,
            seq: self.seq.clone(),
            latest: self.latest.clone(),
        }
    }
}

impl<T, C> Form<T, C>
where
    T: FormValues,
    C: StateCell<FormState<T>>,
{
    /// The current values in `state` become the initial values.
    pub fn new(state: C, options: FormOptions) -> Self {
        let initial = state.with(|s| s.values.clone());
        Self {
            state,
            initial: Rc::new(RefCell::new(initial)),
            validator: None,
            options,
            seq: Rc::new(Cell::new(0)),
            latest: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    pub fn with_validator(mut self, validator: Rc<dyn Validate<T>>) -> Self {
        self.validator = Some(validator);
        self.state.with_mut(|s| s.requires_validation = true);
        self
    }

    pub fn with_sync_validator(self, f: impl Fn(&T) -> FieldErrors + 'static) -> Self {
        self.with_validator(Rc::new(SyncValidator(f)))
    }

    pub fn state(&self) -> &C {
        &self.state
    }

    pub fn values(&self) -> T {
        self.state.with(|s| s.values.clone())
    }

    pub fn is_valid(&self) -> bool {
        self.state.with(FormState::is_valid)
    }

    /// Register the caller's latest initial values; [`Form::reset_form`]
    /// restores these.
    pub fn sync_initial_values(&self, values: &T) {
        let mut initial = self.initial.borrow_mut();
        if *initial != *values {
            *initial = values.clone();
        }
    }

    fn begin(&self, key: &str) -> u64 {
        let id = self.seq.get() + 1;
        self.seq.set(id);
        self.latest.borrow_mut().insert(key.to_string(), id);
        id
    }

    fn latest(&self, key: &str) -> u64 {
        self.latest.borrow().get(key).copied().unwrap_or(0)
    }

    /// Drop every validation still in flight.
    fn invalidate_runs(&self) {
        self.begin(WHOLE_FORM);
    }

    fn write_value(&self, field: &str, value: FieldValue, clear_error: bool) -> bool {
        self.state.with_mut(|s| {
            if !s.values.set_field(field, value) {
                return false;
            }
            s.validated = false;
            if clear_error {
                s.errors.remove(field);
            }
            true
        })
    }

    /// Input changed. Without change-validation the field's error is cleared;
    /// with it, the error is replaced by a fresh result.
    pub async fn handle_change(&self, field: &str, value: impl Into<FieldValue>) {
        if self.apply_change(field, value) {
            self.validate_field(field).await;
        }
    }

    /// The synchronous half of [`Form::handle_change`]: store the value and,
    /// without change-validation, clear the field's error. Returns whether
    /// the field should now be validated.
    pub fn apply_change(&self, field: &str, value: impl Into<FieldValue>) -> bool {
        let validate = self.options.validate_on_change && self.validator.is_some();
        if !self.write_value(field, value.into(), !validate) {
            log_warn!("Ignoring change to unknown form field '{}'", field);
            return false;
        }
        validate
    }

    /// Mark `field` touched. Returns whether it should now be validated.
    pub fn apply_blur(&self, field: &str) -> bool {
        self.state.with_mut(|s| s.touched.set(field, true));
        self.options.validate_on_blur && self.validator.is_some()
    }

    pub async fn handle_blur(&self, field: &str) {
        if self.apply_blur(field) {
            self.validate_field(field).await;
        }
    }

    /// Validate the whole form but only apply the message for `field`.
    pub async fn validate_field(&self, field: &str) {
        let Some(validator) = self.validator.clone() else {
            return;
        };
        let id = self.begin(field);
        let values = self.values();
        let errors = validator.validate(&values).await;

        if self.latest(field) != id || self.latest(WHOLE_FORM) > id {
            return;
        }
        let message = errors.get(field).map(str::to_string);
        self.state.with_mut(|s| s.errors.set(field, message));
    }

    /// Run the validator against the current values and apply its result.
    /// Returns whether that result has no errors.
    pub async fn validate_form(&self) -> bool {
        let Some(validator) = self.validator.clone() else {
            self.state.with_mut(|s| s.validated = true);
            return self.state.with(|s| s.errors.is_empty());
        };
        let id = self.begin(WHOLE_FORM);
        let values = self.values();
        let errors = validator.validate(&values).await;
        let valid = errors.is_empty();

        if self.latest(WHOLE_FORM) != id {
            return valid;
        }
        let newer_fields: Vec<String> = self
            .latest
            .borrow()
            .iter()
            .filter(|(key, run)| key.as_str() != WHOLE_FORM && **run > id)
            .map(|(key, _)| key.clone())
            .collect();

        self.state.with_mut(|s| {
            let mut next = errors;
            for field in &newer_fields {
                next.set(field.as_str(), s.errors.get(field).map(str::to_string));
            }
            s.errors = next;
            s.validated = s.values == values;
        });
        valid
    }

    /// Validate, then hand the values to `on_submit` if they pass. Invalid
    /// values touch every field so all messages show at once.
    pub async fn handle_submit<F, Fut, R>(&self, on_submit: F) -> SubmitOutcome<R>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = R>,
    {
        let already = self.state.with_mut(|s| std::mem::replace(&mut s.is_submitting, true));
        if already {
            return SubmitOutcome::AlreadySubmitting;
        }

        if self.validator.is_some() && !self.validate_form().await {
            let errors = self.state.with_mut(|s| {
                let fields = s.values.field_names();
                s.touched.touch_all(fields);
                s.is_submitting = false;
                s.errors.clone()
            });
            return SubmitOutcome::Invalid(errors);
        }

        let result = on_submit(self.values()).await;
        self.state.with_mut(|s| s.is_submitting = false);
        SubmitOutcome::Submitted(result)
    }

    /// Restore the latest initial values and clear errors and touched flags.
    pub fn reset_form(&self) {
        self.invalidate_runs();
        let initial = self.initial.borrow().clone();
        self.state.with_mut(|s| {
            s.values = initial;
            s.errors.clear();
            s.touched.clear();
            s.validated = false;
        });
    }

    /// Programmatic assignment for widgets outside the event plumbing (file
    /// pickers, custom inputs). Returns `false` for unknown fields.
    pub fn set_field_value(&self, field: &str, value: impl Into<FieldValue>) -> bool {
        self.write_value(field, value.into(), false)
    }

    pub fn set_field_touched(&self, field: &str, touched: bool) {
        self.state.with_mut(|s| s.touched.set(field, touched));
    }

    pub fn set_field_error(&self, field: &str, message: Option<String>) {
        self.state.with_mut(|s| s.errors.set(field, message));
    }

    pub fn set_values(&self, values: T) {
        self.state.with_mut(|s| {
            if s.values != values {
                s.values = values;
                s.validated = false;
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use eventnow_shared::forms::{validate_login, LoginForm};

    use super::*;
    use crate::cell::local;
    use crate::timer::sleep_ms;

    type LoginCell = Rc<RefCell<FormState<LoginForm>>>;

    fn login_form(options: FormOptions) -> Form<LoginForm, LoginCell> {
        Form::new(local(FormState::new(LoginForm::default())), options)
            .with_sync_validator(validate_login)
    }

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Signup {
        username: String,
    }

    impl FormValues for Signup {
        fn field_names(&self) -> Vec<&'static str> {
            vec!["username"]
        }

        fn field(&self, name: &str) -> Option<FieldValue> {
            (name == "username").then(|| FieldValue::text(self.username.clone()))
        }

        fn set_field(&mut self, name: &str, value: FieldValue) -> bool {
            match (name, value) {
                ("username", FieldValue::Text(v)) => {
                    self.username = v;
                    true
                }
                _ => false,
            }
        }
    }

    async fn check_username(values: Signup) -> FieldErrors {
        let delay = if values.username == "slow" { 30 } else { 5 };
        sleep_ms(delay).await;
        if values.username == "taken" || values.username == "slow" {
            FieldErrors::new().with("username", "Username is already taken")
        } else {
            FieldErrors::new()
        }
    }

    fn signup_form() -> Form<Signup, Rc<RefCell<FormState<Signup>>>> {
        Form::new(local(FormState::new(Signup::default())), FormOptions::default())
            .with_validator(Rc::new(AsyncValidator(check_username)))
    }

    #[tokio::test]
    async fn invalid_submit_touches_everything_and_skips_callback() {
        let form = login_form(FormOptions::default());
        let called = Cell::new(false);

        let outcome = form.handle_submit(|_| async { called.set(true) }).await;

        assert!(matches!(outcome, SubmitOutcome::Invalid(ref errors) if errors.contains("email")));
        assert!(!called.get());
        let state = form.state().get();
        for field in state.values.field_names() {
            assert!(state.touched.is_touched(field), "{field} not touched");
        }
        assert!(!state.is_submitting);
    }

    #[tokio::test]
    async fn valid_submit_passes_values_and_clears_flag() {
        let form = login_form(FormOptions::default());
        form.handle_change("email", "sam@example.com").await;
        form.handle_change("password", "secret").await;

        let outcome = form
            .handle_submit(|values| async move { values.email })
            .await;

        assert_eq!(outcome, SubmitOutcome::Submitted("sam@example.com".to_string()));
        assert!(!form.state().get().is_submitting);
        assert!(form.is_valid());
    }

    #[tokio::test]
    async fn second_submit_while_running_is_rejected() {
        let form = login_form(FormOptions::default());
        form.set_field_value("email", "sam@example.com");
        form.set_field_value("password", "secret");
        let (gate_tx, gate_rx) = futures_channel::oneshot::channel::<()>();

        let (first, second) = futures_util::join!(
            form.handle_submit(|_| async move {
                let _ = gate_rx.await;
                1
            }),
            async {
                let second = form.handle_submit(|_| async { 2 }).await;
                let _ = gate_tx.send(());
                second
            }
        );

        assert_eq!(first, SubmitOutcome::Submitted(1));
        assert_eq!(second, SubmitOutcome::AlreadySubmitting);
    }

    #[tokio::test]
    async fn reset_uses_latest_initial_values() {
        let form = login_form(FormOptions::default());
        form.handle_change("email", "typed@example.com").await;
        form.handle_blur("password").await;
        assert!(form.state().get().errors.contains("password"));

        let fresh = LoginForm {
            email: "prefilled@example.com".to_string(),
            ..LoginForm::default()
        };
        form.sync_initial_values(&fresh);
        form.reset_form();

        let state = form.state().get();
        assert_eq!(state.values, fresh);
        assert!(state.errors.is_empty());
        assert!(state.touched.is_empty());
    }

    #[tokio::test]
    async fn change_clears_field_error_without_change_validation() {
        let form = login_form(FormOptions::default());
        form.handle_blur("email").await;
        assert_eq!(form.state().get().errors.get("email"), Some("Email is required"));

        form.handle_change("email", "x").await;
        assert_eq!(form.state().get().errors.get("email"), None);
    }

    #[tokio::test]
    async fn change_validation_replaces_field_error() {
        let form = login_form(FormOptions {
            validate_on_change: true,
            validate_on_blur: false,
        });
        form.handle_change("email", "not-an-email").await;
        assert_eq!(
            form.state().get().errors.get("email"),
            Some("Please enter a valid email address")
        );
        assert!(!form.state().get().errors.contains("password"));

        form.handle_change("email", "sam@example.com").await;
        assert_eq!(form.state().get().errors.get("email"), None);
    }

    #[tokio::test]
    async fn validity_needs_a_validation_of_current_values() {
        let form = login_form(FormOptions::default());
        assert!(!form.is_valid());

        form.set_field_value("email", "sam@example.com");
        form.set_field_value("password", "secret");
        assert!(form.validate_form().await);
        assert!(form.is_valid());

        form.set_field_value("password", "changed");
        assert!(!form.is_valid());
    }

    #[tokio::test]
    async fn form_without_validator_is_valid_until_an_error_is_set() {
        let form = Form::new(local(FormState::new(LoginForm::default())), FormOptions::default());
        assert!(form.is_valid());
        form.set_field_error("email", Some("Already registered".to_string()));
        assert!(!form.is_valid());
        form.set_field_error("email", None);
        assert!(form.validate_form().await);
    }

    #[tokio::test]
    async fn async_validator_reports_taken_then_available() {
        let form = signup_form();

        form.set_field_value("username", "taken");
        assert!(!form.validate_form().await);
        assert_eq!(
            form.state().get().errors.get("username"),
            Some("Username is already taken")
        );

        form.set_field_value("username", "available");
        assert!(form.validate_form().await);
        assert!(form.is_valid());
        assert_eq!(form.state().get().errors.get("username"), None);
    }

    #[tokio::test]
    async fn slower_stale_validation_is_discarded() {
        let form = signup_form();
        form.set_field_value("username", "slow");

        let (stale, fresh) = futures_util::join!(form.validate_form(), async {
            form.set_field_value("username", "available");
            form.validate_form().await
        });

        assert!(!stale);
        assert!(fresh);
        let state = form.state().get();
        assert!(state.errors.is_empty());
        assert!(state.is_valid());
    }

    #[tokio::test]
    async fn unknown_fields_are_ignored() {
        let form = login_form(FormOptions::default());
        assert!(!form.set_field_value("nickname", "x"));
        assert!(!form.set_field_value("remember_me", "yes"));
        assert!(form.set_field_value("remember_me", true));
        assert!(form.values().remember_me);
    }

    #[test]
    fn visible_errors_wait_for_touch() {
        let mut state = FormState::new(LoginForm::default());
        state.errors.set("email", Some("Email is required".to_string()));
        assert_eq!(state.visible_error("email"), None);
        state.touched.set("email", true);
        assert_eq!(state.visible_error("email"), Some("Email is required"));
    }
}
