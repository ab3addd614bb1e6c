//! Form State Controller
//!
//! Generic values/errors/touched/submitting state shared by every data-entry
//! form. Validation timing is an explicit policy: with the default
//! [`ValidateOn::Blur`], an error message is recomputed only when the field
//! loses focus or the form is submitted, so it lags edits made in between.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::cell::StateCell;

/// Field name to current value
pub type FormValues = BTreeMap<String, String>;

/// Returns an error message, or an empty string when the value is valid.
pub type Validator = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// When field validators run, besides submit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidateOn {
    /// On every change and on blur
    Change,
    /// On blur only
    #[default]
    Blur,
    /// Only when the form is submitted
    Submit,
}

#[derive(Clone)]
pub struct FormController {
    initial: FormValues,
    values: FormValues,
    errors: BTreeMap<String, String>,
    touched: BTreeSet<String>,
    is_submitting: bool,
    validators: BTreeMap<String, Validator>,
    policy: ValidateOn,
}

impl fmt::Debug for FormController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormController")
            .field("values", &self.values)
            .field("errors", &self.errors)
            .field("touched", &self.touched)
            .field("is_submitting", &self.is_submitting)
            .field("validators", &self.validators.keys().collect::<Vec<_>>())
            .field("policy", &self.policy)
            .finish()
    }
}

impl Default for FormController {
    fn default() -> Self {
        Self::new(std::iter::empty::<(String, String)>())
    }
}

impl FormController {
    pub fn new<I, K, V>(initial: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let initial: FormValues = initial.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self {
            values: initial.clone(),
            initial,
            errors: BTreeMap::new(),
            touched: BTreeSet::new(),
            is_submitting: false,
            validators: BTreeMap::new(),
            policy: ValidateOn::default(),
        }
    }

    /// Register a validator. A field without an initial value starts empty.
    pub fn with_validator(mut self, field: &str, validator: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.initial.entry(field.to_string()).or_default();
        self.values.entry(field.to_string()).or_default();
        self.validators.insert(field.to_string(), Arc::new(validator));
        self
    }

    pub fn validate_on(mut self, policy: ValidateOn) -> Self {
        self.policy = policy;
        self
    }

    // ========================
    // Accessors
    // ========================

    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or_default()
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    /// Error to render: only once the field has been touched.
    pub fn visible_error(&self, field: &str) -> Option<&str> {
        if self.is_touched(field) {
            self.error(field)
        } else {
            None
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn policy(&self) -> ValidateOn {
        self.policy
    }

    // ========================
    // Events
    // ========================

    pub fn handle_change(&mut self, field: &str, value: impl Into<String>) {
        self.values.insert(field.to_string(), value.into());
        if self.policy == ValidateOn::Change {
            self.validate_field(field);
        }
    }

    pub fn handle_blur(&mut self, field: &str) {
        if !self.values.contains_key(field) {
            log::debug!("[FORM] Ignoring blur on unknown field {}", field);
            return;
        }
        self.touched.insert(field.to_string());
        if self.policy != ValidateOn::Submit {
            self.validate_field(field);
        }
    }

    /// Validate every field and mark all of them touched. Returns the values
    /// to submit when nothing failed, and flags the form as submitting.
    pub fn begin_submit(&mut self) -> Option<FormValues> {
        self.errors = self
            .validators
            .iter()
            .filter_map(|(field, validator)| {
                let message = validator(self.value(field));
                (!message.is_empty()).then(|| (field.clone(), message))
            })
            .collect();
        self.touched = self.values.keys().cloned().collect();

        if !self.errors.is_empty() {
            return None;
        }
        self.is_submitting = true;
        Some(self.values.clone())
    }

    pub fn finish_submit(&mut self) {
        self.is_submitting = false;
    }

    /// Overwrite several values at once, without validating.
    pub fn set_values<I, K, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in values {
            self.values.insert(k.into(), v.into());
        }
    }

    /// Back to the initial values with no errors or touched fields.
    pub fn reset(&mut self) {
        self.values = self.initial.clone();
        self.errors.clear();
        self.touched.clear();
        self.is_submitting = false;
    }

    fn validate_field(&mut self, field: &str) {
        let Some(validator) = self.validators.get(field) else {
            return;
        };
        let message = validator(self.value(field));
        if message.is_empty() {
            self.errors.remove(field);
        } else {
            self.errors.insert(field.to_string(), message);
        }
    }
}

/// How a submit attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; the callback was not invoked
    Invalid,
    /// The callback completed
    Submitted,
    /// The callback failed; the failure was logged and swallowed
    Failed,
}

/// Run a submit attempt against the form held in `cell`.
///
/// `is_submitting` is true for exactly the duration of `on_submit`. A failing
/// callback leaves values and errors as they were.
pub async fn submit<C, F, Fut, E>(cell: &C, on_submit: F) -> SubmitOutcome
where
    C: StateCell<FormController>,
    F: FnOnce(FormValues) -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: fmt::Display,
{
    let Some(values) = cell.update(|form| form.begin_submit()) else {
        return SubmitOutcome::Invalid;
    };

    let result = on_submit(values).await;
    cell.update(|form| form.finish_submit());

    match result {
        Ok(()) => SubmitOutcome::Submitted,
        Err(e) => {
            log::error!("[FORM] Form submission error: {}", e);
            SubmitOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn required(message: &'static str) -> impl Fn(&str) -> String + Send + Sync {
        move |v: &str| if v.is_empty() { message.to_string() } else { String::new() }
    }

    fn task_form() -> FormController {
        FormController::new([("title", ""), ("description", "")])
            .with_validator("title", required("Task title is required"))
    }

    #[test]
    fn test_initial_state() {
        let form = FormController::new([("email", "a@b.c"), ("password", "")]);
        assert_eq!(form.value("email"), "a@b.c");
        assert_eq!(form.value("password"), "");
        assert!(!form.is_touched("email"));
        assert!(form.error("email").is_none());
        assert!(!form.is_submitting());
        assert_eq!(form.policy(), ValidateOn::Blur);
    }

    #[test]
    fn test_change_does_not_validate_or_touch() {
        let mut form = task_form();
        form.handle_change("title", "");
        assert!(form.error("title").is_none());
        assert!(!form.is_touched("title"));
    }

    #[test]
    fn test_blur_validates_current_value() {
        let mut form = task_form();
        form.handle_blur("title");
        assert!(form.is_touched("title"));
        assert_eq!(form.error("title"), Some("Task title is required"));
        assert_eq!(form.visible_error("title"), Some("Task title is required"));
    }

    #[test]
    fn test_error_lags_until_next_blur() {
        let mut form = task_form();
        form.handle_blur("title");
        form.handle_change("title", "Write docs");
        assert_eq!(form.error("title"), Some("Task title is required"));

        form.handle_blur("title");
        assert!(form.error("title").is_none());
    }

    #[test]
    fn test_blur_without_validator_only_touches() {
        let mut form = task_form();
        form.handle_blur("description");
        assert!(form.is_touched("description"));
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_blur_on_unknown_field_is_ignored() {
        let mut form = task_form();
        form.handle_blur("nope");
        assert!(!form.is_touched("nope"));
    }

    #[test]
    fn test_change_policy_validates_each_edit() {
        let mut form = task_form().validate_on(ValidateOn::Change);
        form.handle_change("title", "");
        assert_eq!(form.error("title"), Some("Task title is required"));
        assert!(form.visible_error("title").is_none());
        form.handle_change("title", "x");
        assert!(form.error("title").is_none());
    }

    #[test]
    fn test_submit_policy_skips_blur_validation() {
        let mut form = task_form().validate_on(ValidateOn::Submit);
        form.handle_blur("title");
        assert!(form.is_touched("title"));
        assert!(form.error("title").is_none());
        assert!(form.begin_submit().is_none());
        assert_eq!(form.error("title"), Some("Task title is required"));
    }

    #[test]
    fn test_validator_field_is_seeded() {
        let form = FormController::new([("a", "1")]).with_validator("b", required("b"));
        assert_eq!(form.value("b"), "");
        assert!(form.values().contains_key("b"));
    }

    #[test]
    fn test_reset_restores_initial() {
        let mut form = task_form();
        form.handle_change("title", "Draft");
        form.handle_blur("title");
        form.reset();
        assert_eq!(form.value("title"), "");
        assert!(!form.is_touched("title"));
        assert!(form.errors().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_submit_skips_callback() {
        let cell = Rc::new(RefCell::new(
            FormController::new([("email", ""), ("password", "")])
                .with_validator("email", required("Email is required"))
                .with_validator("password", required("Password is required")),
        ));
        let calls = Cell::new(0);

        let outcome = submit(&cell, |_values| {
            calls.set(calls.get() + 1);
            async { Ok::<(), String>(()) }
        })
        .await;

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert_eq!(calls.get(), 0);
        let form = cell.borrow();
        assert_eq!(form.error("email"), Some("Email is required"));
        assert_eq!(form.error("password"), Some("Password is required"));
        assert!(form.is_touched("email") && form.is_touched("password"));
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_valid_submit_runs_callback_once() {
        let cell = Rc::new(RefCell::new(task_form()));
        cell.borrow_mut().handle_change("title", "Ship it");
        let calls = Cell::new(0);
        let seen_submitting = Cell::new(false);
        let observer = cell.clone();

        let outcome = submit(&cell, |values| {
            calls.set(calls.get() + 1);
            seen_submitting.set(observer.borrow().is_submitting());
            assert_eq!(values.get("title").map(String::as_str), Some("Ship it"));
            async { Ok::<(), String>(()) }
        })
        .await;

        assert_eq!(outcome, SubmitOutcome::Submitted);
        assert_eq!(calls.get(), 1);
        assert!(seen_submitting.get());
        assert!(!cell.borrow().is_submitting());
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_values_and_errors() {
        let cell = Rc::new(RefCell::new(task_form()));
        cell.borrow_mut().handle_change("title", "Ship it");

        let outcome = submit(&cell, |_values| async { Err::<(), String>("boom".into()) }).await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        let form = cell.borrow();
        assert!(!form.is_submitting());
        assert_eq!(form.value("title"), "Ship it");
        assert!(form.errors().is_empty());
    }
}
