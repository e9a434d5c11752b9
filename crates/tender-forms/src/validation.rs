// File: src/validation.rs
// Purpose: Rule evaluation for a single field value

use serde::{Deserialize, Serialize};
use tender_validation::{is_blank, is_valid_date, is_valid_email, validate_min_length};

use crate::field::FieldKind;

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address.";
pub const DATE_MESSAGE: &str = "Please enter a valid date.";

/// Default minimum length for multi-line descriptions
pub const DEFAULT_DESCRIPTION_MIN_LENGTH: usize = 10;

/// Result of validating one field value
///
/// Produced fresh on every evaluation and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub message: Option<String>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    /// Create a failed validation result
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }

    /// Message to show, or empty when valid
    pub fn message_or_empty(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }
}

/// Tunable parts of the rule set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    pub description_min_length: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            description_min_length: DEFAULT_DESCRIPTION_MIN_LENGTH,
        }
    }
}

impl ValidationRules {
    /// Evaluates a value against the rules implied by its kind
    ///
    /// First failing rule wins, in this order:
    /// 1. required and blank
    /// 2. email shape
    /// 3. ISO date
    /// 4. textarea minimum length
    ///
    /// Kind-specific rules only apply to non-blank values, and every check runs
    /// on the trimmed value. Unknown kinds pass unless required.
    pub fn evaluate(&self, value: &str, kind: FieldKind, required: bool) -> ValidationResult {
        let value = value.trim();

        if required && is_blank(value) {
            return ValidationResult::failure(REQUIRED_MESSAGE);
        }
        if value.is_empty() {
            return ValidationResult::success();
        }

        match kind {
            FieldKind::Email if !is_valid_email(value) => ValidationResult::failure(EMAIL_MESSAGE),
            FieldKind::Date if !is_valid_date(value) => ValidationResult::failure(DATE_MESSAGE),
            FieldKind::TextArea
                if validate_min_length(value, self.description_min_length).is_err() =>
            {
                ValidationResult::failure(self.description_message())
            }
            _ => ValidationResult::success(),
        }
    }

    fn description_message(&self) -> String {
        format!(
            "Description must be at least {} characters.",
            self.description_min_length
        )
    }
}

/// Evaluates a value with the default rules
pub fn validate_value(value: &str, kind: FieldKind, required: bool) -> ValidationResult {
    ValidationRules::default().evaluate(value, kind, required)
}
