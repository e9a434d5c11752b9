// File: src/field.rs
// Purpose: Form field state and per-field validation events

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::validation::{ValidationResult, ValidationRules};

/// Attribute that opts a field into validation on every input event
pub const VALIDATE_ON_INPUT_ATTR: &str = "data-validate-on-input";

/// What kind of control a field is, as far as validation cares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Date,
    #[serde(rename = "textarea")]
    TextArea,
    Other,
}

impl FieldKind {
    /// Derive the kind from an element tag name and its `type` attribute
    ///
    /// A `<textarea>` is always `TextArea`; inputs go by their `type`.
    /// Anything unrecognised (select, number, tel, ...) is `Other`.
    pub fn from_html(tag: &str, type_attr: Option<&str>) -> Self {
        if tag.eq_ignore_ascii_case("textarea") {
            return FieldKind::TextArea;
        }
        if !tag.eq_ignore_ascii_case("input") {
            return FieldKind::Other;
        }
        match type_attr.map(|t| t.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") | Some("text") | Some("search") => FieldKind::Text,
            Some("email") => FieldKind::Email,
            Some("date") => FieldKind::Date,
            Some(_) => FieldKind::Other,
        }
    }
}

/// Visual validation state of a field
///
/// An invalid field carries exactly one message, so a field can never show
/// two error annotations at once.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum FieldStatus {
    #[default]
    Untouched,
    Valid,
    Invalid { message: String },
}

impl FieldStatus {
    pub fn is_error(&self) -> bool {
        matches!(self, FieldStatus::Invalid { .. })
    }

    /// Error annotation text, if one is attached
    pub fn annotation(&self) -> Option<&str> {
        match self {
            FieldStatus::Invalid { message } => Some(message),
            _ => None,
        }
    }

    /// Style class a renderer should put on the control
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            FieldStatus::Untouched => None,
            FieldStatus::Valid => Some("valid"),
            FieldStatus::Invalid { .. } => Some("error"),
        }
    }
}

impl From<ValidationResult> for FieldStatus {
    fn from(result: ValidationResult) -> Self {
        if result.valid {
            FieldStatus::Valid
        } else {
            FieldStatus::Invalid {
                message: result.message.unwrap_or_default(),
            }
        }
    }
}

/// A single form control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: String,
    pub kind: FieldKind,
    pub required: bool,
    pub validate_on_input: bool,
    #[serde(default)]
    status: FieldStatus,
}

impl Field {
    /// Create an empty, optional field
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            kind,
            required: false,
            validate_on_input: false,
            status: FieldStatus::Untouched,
        }
    }

    /// Build a field from an element's tag name and attributes
    ///
    /// Reads `type`, `value`, `required` and `data-validate-on-input`.
    /// Boolean attributes count as set when present, whatever their value.
    pub fn from_attributes(
        name: impl Into<String>,
        tag: &str,
        attrs: &HashMap<String, String>,
    ) -> Self {
        let kind = FieldKind::from_html(tag, attrs.get("type").map(String::as_str));
        Self {
            name: name.into(),
            value: attrs.get("value").cloned().unwrap_or_default(),
            kind,
            required: attrs.contains_key("required"),
            validate_on_input: attrs.contains_key(VALIDATE_ON_INPUT_ATTR),
            status: FieldStatus::Untouched,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn validate_on_input(mut self) -> Self {
        self.validate_on_input = true;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn status(&self) -> &FieldStatus {
        &self.status
    }

    /// Validate with the default rules
    pub fn validate(&mut self) -> bool {
        self.validate_with(&ValidationRules::default())
    }

    /// Clear any previous state, evaluate, and record the new state
    ///
    /// Returns the validity so a form can aggregate it.
    pub fn validate_with(&mut self, rules: &ValidationRules) -> bool {
        self.clear_state();
        let result = rules.evaluate(&self.value, self.kind, self.required);
        let valid = result.valid;
        if !valid {
            debug!(field = %self.name, message = result.message_or_empty(), "field invalid");
        }
        self.status = result.into();
        valid
    }

    /// Input event: store the value and drop any error annotation
    ///
    /// Fields that opted in with `data-validate-on-input` are re-validated
    /// straight away.
    pub fn on_input(&mut self, value: impl Into<String>, rules: &ValidationRules) {
        self.value = value.into();
        if self.status.is_error() {
            self.status = FieldStatus::Untouched;
        }
        if self.validate_on_input {
            self.validate_with(rules);
        }
    }

    /// Blur event
    pub fn on_blur(&mut self, rules: &ValidationRules) -> bool {
        self.validate_with(rules)
    }

    /// Remove both error and valid state
    pub fn clear_state(&mut self) {
        self.status = FieldStatus::Untouched;
    }

    /// Empty the value and clear state
    pub fn reset(&mut self) {
        self.value.clear();
        self.clear_state();
    }
}
