// File: src/outcome.rs
// Purpose: Per-field validation results and whole-form reports

use crate::rule::Severity;

/// Non-breaking space shown in place of a blank message.
///
/// Browsers misrender a message cell that goes from empty to non-empty, so
/// the cell always keeps some text.
pub const NBSP: char = '\u{a0}';

const ALERT_ONE: &str = "There is a field which requires correction before sending";
const ALERT_MANY: &str = "There are fields which require correction before sending";

/// Result of evaluating one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOutcome {
    pub name: String,
    pub valid: bool,
    /// Whether the field's rule marks it required (false for unknown fields)
    pub required: bool,
    pub severity: Severity,
    pub message: String,
}

impl FieldOutcome {
    /// Outcome for a field that passed validation
    pub fn valid(name: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            valid: true,
            required,
            severity: Severity::Empty,
            message: String::new(),
        }
    }

    /// Outcome for a field whose value failed its rule
    pub fn invalid(name: impl Into<String>, required: bool, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            valid: false,
            required,
            severity,
            message: message.into(),
        }
    }

    /// Outcome for a field that could not be evaluated at all
    pub fn fault(name: impl Into<String>, required: bool, cause: impl std::fmt::Display) -> Self {
        let name = name.into();
        let message = format!("Error validating field '{}': {}", name, cause);
        Self {
            name,
            valid: false,
            required,
            severity: Severity::Error,
            message,
        }
    }

    /// Text written to the `<name>_message` element
    pub fn display_text(&self) -> String {
        if self.message.trim().is_empty() {
            NBSP.to_string()
        } else {
            self.message.clone()
        }
    }

    /// Invalid and required: blocks form submission
    pub fn is_blocking(&self) -> bool {
        !self.valid && self.required
    }
}

/// Outcomes of a whole-form pass, in registration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormReport {
    pub outcomes: Vec<FieldOutcome>,
}

impl FormReport {
    pub fn new(outcomes: Vec<FieldOutcome>) -> Self {
        Self { outcomes }
    }

    /// Number of required fields that failed validation
    pub fn error_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_blocking()).count()
    }

    /// Number of fields that failed validation, required or not
    pub fn invalid_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.valid).count()
    }

    pub fn can_submit(&self) -> bool {
        self.error_count() == 0
    }

    /// Alert shown when submission is blocked
    pub fn submit_alert(&self) -> Option<&'static str> {
        match self.error_count() {
            0 => None,
            1 => Some(ALERT_ONE),
            _ => Some(ALERT_MANY),
        }
    }

    /// Get the outcome for a specific field
    pub fn get(&self, name: &str) -> Option<&FieldOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }
}
