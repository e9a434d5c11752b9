// File: src/form.rs
// Purpose: Form state and the all-or-nothing submission gate

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::SubmissionError;
use crate::field::Field;
use crate::notify::{NotificationLevel, Notifier};
use crate::validation::ValidationRules;

pub const INVALID_FORM_MESSAGE: &str = "Please fix the errors before submitting.";
pub const SUBMITTED_MESSAGE: &str = "Form submitted successfully!";

/// Field name to submitted value
pub type FormValues = BTreeMap<String, String>;

/// What a submission should do with the values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "action", content = "id", rename_all = "lowercase")]
pub enum SubmitIntent {
    #[default]
    Create,
    Update(i64),
    Delete(i64),
}

/// State of the submit control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitState {
    #[default]
    Idle,
    Saving,
}

impl SubmitState {
    /// The control is disabled while a submission is in flight
    pub fn is_disabled(&self) -> bool {
        matches!(self, SubmitState::Saving)
    }

    /// Label override while saving; `None` keeps the original label
    pub fn label(&self) -> Option<&'static str> {
        match self {
            SubmitState::Idle => None,
            SubmitState::Saving => Some("Saving..."),
        }
    }
}

/// Hands validated values to whatever persists them
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(
        &self,
        intent: SubmitIntent,
        values: &FormValues,
    ) -> Result<(), SubmissionError>;
}

/// An ordered set of fields plus a submit control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub fields: Vec<Field>,
    pub intent: SubmitIntent,
    submit_state: SubmitState,
    rules: ValidationRules,
}

impl Form {
    pub fn new(fields: Vec<Field>) -> Self {
        Self {
            fields,
            intent: SubmitIntent::Create,
            submit_state: SubmitState::Idle,
            rules: ValidationRules::default(),
        }
    }

    pub fn with_intent(mut self, intent: SubmitIntent) -> Self {
        self.intent = intent;
        self
    }

    pub fn with_rules(mut self, rules: ValidationRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    pub fn submit_state(&self) -> SubmitState {
        self.submit_state
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// Input event routed to a named field; unknown names are ignored
    pub fn input(&mut self, name: &str, value: impl Into<String>) {
        let rules = self.rules;
        if let Some(field) = self.field_mut(name) {
            field.on_input(value, &rules);
        }
    }

    /// Blur event routed to a named field
    pub fn blur(&mut self, name: &str) -> Option<bool> {
        let rules = self.rules;
        self.field_mut(name).map(|f| f.on_blur(&rules))
    }

    /// Validate every field, without stopping at the first failure
    ///
    /// Every field gets a fresh pass so all errors show at once.
    pub fn validate_all(&mut self) -> bool {
        let rules = self.rules;
        self.fields
            .iter_mut()
            .fold(true, |all_valid, field| field.validate_with(&rules) && all_valid)
    }

    /// Current values keyed by field name
    pub fn values(&self) -> FormValues {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }

    /// Empty every field and clear all validation state
    pub fn reset(&mut self) {
        self.fields.iter_mut().for_each(Field::reset);
    }

    /// Number of fields currently showing an error
    pub fn error_count(&self) -> usize {
        self.fields.iter().filter(|f| f.status().is_error()).count()
    }
}

/// Outcome of one submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent
    Rejected,
    /// Validation passed and the collaborator succeeded
    Submitted,
    /// Validation passed but the collaborator failed
    Failed(String),
}

impl SubmitOutcome {
    /// True when validation passed and values were handed off
    pub fn accepted(&self) -> bool {
        !matches!(self, SubmitOutcome::Rejected)
    }
}

/// Blocks submission until every field validates
///
/// Submission is split in two halves so a renderer can show the saving state
/// between them: [`FormGate::begin`] validates and flips the control to saving,
/// [`FormGate::finish`] applies the collaborator's result. [`FormGate::submit`]
/// runs both around the injected [`Submitter`].
#[derive(Clone)]
pub struct FormGate {
    submitter: Arc<dyn Submitter>,
    notifier: Arc<dyn Notifier>,
}

impl FormGate {
    pub fn new(submitter: Arc<dyn Submitter>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            submitter,
            notifier,
        }
    }

    /// Validate everything; on success mark the form as saving and return its values
    ///
    /// A form that is already saving is left alone, like a disabled submit button.
    pub fn begin(&self, form: &mut Form) -> Option<FormValues> {
        if form.submit_state.is_disabled() {
            debug!("submission ignored while saving");
            return None;
        }
        if !form.validate_all() {
            info!(errors = form.error_count(), "submission blocked by validation");
            self.notifier
                .notify(INVALID_FORM_MESSAGE, NotificationLevel::Error);
            return None;
        }
        form.submit_state = SubmitState::Saving;
        Some(form.values())
    }

    /// Apply the collaborator's result; the submit control is always restored
    pub fn finish(&self, form: &mut Form, result: Result<(), SubmissionError>) -> SubmitOutcome {
        form.submit_state = SubmitState::Idle;
        match result {
            Ok(()) => {
                info!(intent = ?form.intent, "form submitted");
                form.reset();
                self.notifier
                    .notify(SUBMITTED_MESSAGE, NotificationLevel::Success);
                SubmitOutcome::Submitted
            }
            Err(err) => {
                warn!(intent = ?form.intent, error = %err, "form submission failed");
                let reason = err.to_string();
                self.notifier.notify(
                    &format!("Submission failed: {}", reason),
                    NotificationLevel::Error,
                );
                SubmitOutcome::Failed(reason)
            }
        }
    }

    /// Validate, hand off, and apply the result
    pub async fn submit(&self, form: &mut Form) -> SubmitOutcome {
        let Some(values) = self.begin(form) else {
            return SubmitOutcome::Rejected;
        };
        let result = self.submitter.submit(form.intent, &values).await;
        self.finish(form, result)
    }
}

/// Whether a key press should submit the enclosing form
///
/// Enter submits from any control except a button (buttons handle Enter
/// themselves), and only when the control sits inside a form.
pub fn submits_on_key(key: &str, target_is_button: bool, inside_form: bool) -> bool {
    key == "Enter" && !target_is_button && inside_form
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::field::{FieldKind, FieldStatus};
    use crate::notify::NotificationCenter;
    use crate::validation::{EMAIL_MESSAGE, REQUIRED_MESSAGE};
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeSubmitter {
        calls: Mutex<Vec<(SubmitIntent, FormValues)>>,
        fail_with: Option<SubmissionError>,
    }

    #[async_trait]
    impl Submitter for FakeSubmitter {
        async fn submit(
            &self,
            intent: SubmitIntent,
            values: &FormValues,
        ) -> Result<(), SubmissionError> {
            self.calls.lock().unwrap().push((intent, values.clone()));
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }
    }

    fn tender_form() -> Form {
        Form::new(vec![
            Field::new("title", FieldKind::Text).required(),
            Field::new("contact", FieldKind::Email),
            Field::new("description", FieldKind::TextArea).required(),
        ])
    }

    fn gate(submitter: Arc<FakeSubmitter>) -> (FormGate, Arc<NotificationCenter<ManualClock>>) {
        let center = Arc::new(NotificationCenter::new(ManualClock::new()));
        (FormGate::new(submitter, center.clone()), center)
    }

    #[tokio::test]
    async fn test_all_invalid_fields_are_reported_at_once() {
        let submitter = Arc::new(FakeSubmitter::default());
        let (gate, center) = gate(submitter.clone());

        let mut form = tender_form();
        form.input("contact", "a@b.c");

        let outcome = gate.submit(&mut form).await;
        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert!(!outcome.accepted());

        assert_eq!(form.field("title").unwrap().status().annotation(), Some(REQUIRED_MESSAGE));
        assert_eq!(form.field("contact").unwrap().status(), &FieldStatus::Valid);
        assert_eq!(
            form.field("description").unwrap().status().annotation(),
            Some(REQUIRED_MESSAGE)
        );
        assert_eq!(form.error_count(), 2);

        assert!(submitter.calls.lock().unwrap().is_empty());
        let toasts = center.tick();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].message, INVALID_FORM_MESSAGE);
        assert_eq!(toasts[0].level, NotificationLevel::Error);
    }

    #[tokio::test]
    async fn test_repeated_submits_never_stack_errors() {
        let submitter = Arc::new(FakeSubmitter::default());
        let (gate, _center) = gate(submitter);

        let mut form = tender_form();
        form.field_mut("contact").unwrap().value = "broken".to_string();
        gate.submit(&mut form).await;
        gate.submit(&mut form).await;

        assert_eq!(form.error_count(), 3);
        assert_eq!(form.field("contact").unwrap().status().annotation(), Some(EMAIL_MESSAGE));
    }

    #[tokio::test]
    async fn test_valid_form_is_submitted_and_reset() {
        let submitter = Arc::new(FakeSubmitter::default());
        let (gate, center) = gate(submitter.clone());

        let mut form = tender_form().with_intent(SubmitIntent::Update(7));
        form.input("title", "Bridge Repair");
        form.input("description", "Replace the deck joints");

        let outcome = gate.submit(&mut form).await;
        assert_eq!(outcome, SubmitOutcome::Submitted);

        let calls = submitter.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, SubmitIntent::Update(7));
        assert_eq!(calls[0].1.get("title").map(String::as_str), Some("Bridge Repair"));
        assert_eq!(calls[0].1.get("contact").map(String::as_str), Some(""));

        assert!(form.fields.iter().all(|f| f.value.is_empty()));
        assert!(form.fields.iter().all(|f| f.status() == &FieldStatus::Untouched));
        assert_eq!(form.submit_state(), SubmitState::Idle);
        assert_eq!(center.tick()[0].message, SUBMITTED_MESSAGE);
    }

    #[tokio::test]
    async fn test_failed_submission_keeps_values_and_restores_control() {
        let submitter = Arc::new(FakeSubmitter {
            fail_with: Some(SubmissionError::transport("connection refused")),
            ..Default::default()
        });
        let (gate, center) = gate(submitter);

        let mut form = tender_form();
        form.input("title", "Road Maintenance");
        form.input("description", "Resurface 4km of road");

        let outcome = gate.submit(&mut form).await;
        assert_eq!(
            outcome,
            SubmitOutcome::Failed("network error: connection refused".to_string())
        );
        assert!(outcome.accepted());
        assert_eq!(form.submit_state(), SubmitState::Idle);
        assert_eq!(form.field("title").unwrap().value, "Road Maintenance");

        let toasts = center.tick();
        assert_eq!(toasts[0].level, NotificationLevel::Error);
        assert_eq!(
            toasts[0].message,
            "Submission failed: network error: connection refused"
        );
    }

    #[test]
    fn test_begin_marks_form_as_saving() {
        let (gate, _center) = gate(Arc::new(FakeSubmitter::default()));
        let mut form = tender_form();
        form.input("title", "Road Construction");
        form.input("description", "New ring road, phase one");

        let values = gate.begin(&mut form).expect("form is valid");
        assert_eq!(values.len(), 3);
        assert_eq!(form.submit_state(), SubmitState::Saving);
        assert!(form.submit_state().is_disabled());
        assert_eq!(form.submit_state().label(), Some("Saving..."));

        gate.finish(&mut form, Ok(()));
        assert_eq!(form.submit_state(), SubmitState::Idle);
    }

    #[test]
    fn test_begin_is_ignored_while_saving() {
        let (gate, center) = gate(Arc::new(FakeSubmitter::default()));
        let mut form = tender_form();
        form.input("title", "Road Construction");
        form.input("description", "New ring road, phase one");

        assert!(gate.begin(&mut form).is_some());
        form.input("title", "");
        assert_eq!(gate.begin(&mut form), None);
        assert_eq!(form.submit_state(), SubmitState::Saving);
        assert!(!form.field("title").unwrap().status().is_error());
        assert!(center.tick().is_empty());

        gate.finish(&mut form, Err(SubmissionError::transport("timeout")));
        assert_eq!(form.submit_state(), SubmitState::Idle);
        assert_eq!(gate.begin(&mut form), None);
        assert!(form.field("title").unwrap().status().is_error());
    }

    #[test]
    fn test_submits_on_key() {
        assert!(submits_on_key("Enter", false, true));
        assert!(!submits_on_key("Enter", true, true));
        assert!(!submits_on_key("Enter", false, false));
        assert!(!submits_on_key("Tab", false, true));
    }
}
