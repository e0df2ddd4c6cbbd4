// File: src/validator.rs
// Purpose: Field evaluation, message display and form submission gate

use crate::host::{DisplayRegion, FieldEvent, FormHost, HandlerBinder, HostError};
use crate::outcome::{FieldOutcome, FormReport};
use crate::registry::ValidationConfig;
use crate::rule::{FieldPattern, FieldRule};
use tracing::{debug, warn};

/// Validates the fields of one form against a frozen configuration
#[derive(Debug, Clone)]
pub struct FieldValidator {
    config: ValidationConfig,
}

impl FieldValidator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Evaluate a value against a rule without touching the document.
    ///
    /// `None` means the control could not be found.
    pub fn evaluate(rule: &FieldRule, value: Option<&str>) -> FieldOutcome {
        Self::evaluate_with(rule, value, FieldPattern::is_match)
    }

    /// Evaluate with a caller-supplied pattern engine
    pub fn evaluate_with<M>(rule: &FieldRule, value: Option<&str>, matches: M) -> FieldOutcome
    where
        M: Fn(&FieldPattern, &str) -> Result<bool, String>,
    {
        let Some(value) = value else {
            return FieldOutcome::fault(&rule.name, rule.required, "control not found");
        };

        let valid = match &rule.pattern {
            None => !rule.required || !value.trim().is_empty(),
            Some(pattern) => match matches(pattern, value) {
                Ok(matched) => matched,
                Err(e) => {
                    return FieldOutcome::fault(
                        &rule.name,
                        rule.required,
                        format!("invalid pattern {}: {}", pattern, e),
                    );
                }
            },
        };

        if valid {
            return FieldOutcome::valid(&rule.name, rule.required);
        }

        // A blank required field reads as missing even when a pattern is set
        let message = if !rule.message.is_empty() {
            rule.message.clone()
        } else {
            match &rule.pattern {
                Some(pattern) if !(rule.required && value.trim().is_empty()) => {
                    format!("{} does not match {}", value, pattern)
                }
                _ => format!("field '{}' is required", rule.display_title()),
            }
        };

        FieldOutcome::invalid(&rule.name, rule.required, rule.failure_severity(), message)
    }

    /// Write an outcome into the field's message row.
    ///
    /// A missing element is reported with an alert and the remaining
    /// elements are still updated.
    pub fn render<H: FormHost + ?Sized>(host: &H, outcome: &FieldOutcome) {
        let region = DisplayRegion::for_field(&outcome.name);
        let severity = outcome.severity;

        let updates = [
            host.set_text(&region.message, &outcome.display_text()),
            host.set_text(&region.header_cell, severity.as_str()),
            host.set_class(&region.header_cell, &severity.header_class()),
            host.set_class(&region.data_cell, &severity.data_class()),
            host.set_class(&region.row, &severity.row_class()),
        ];

        for result in updates {
            if let Err(e) = result {
                warn!(field = %outcome.name, "display update failed: {}", e);
                host.alert(&e.to_string());
            }
        }
    }

    /// Evaluate one field against the document and display the result
    pub fn validate_field<H: FormHost + ?Sized>(&self, host: &H, name: &str) -> FieldOutcome {
        let outcome = match self.config.rule(name) {
            Some(rule) => {
                let value = host.control_value(self.config.form_id(), name);
                Self::evaluate_with(rule, value.as_deref(), |pattern, value| {
                    host.matches(pattern, value)
                })
            }
            None => FieldOutcome::fault(name, false, "field is not registered"),
        };

        if outcome.valid {
            debug!(field = %name, "field valid");
        } else {
            debug!(field = %name, severity = %outcome.severity, "field invalid: {}", outcome.message);
        }

        Self::render(host, &outcome);
        outcome
    }

    /// Handle a change or blur event from one of the form's controls
    pub fn validate<H, E>(&self, host: &H, event: &E) -> Option<FieldOutcome>
    where
        H: FormHost + ?Sized,
        E: FieldEvent + ?Sized,
    {
        match event.origin_control() {
            Some(name) => Some(self.validate_field(host, &name)),
            None => {
                warn!("event without an originating control ignored");
                None
            }
        }
    }

    /// Validate every registered field in registration order
    pub fn validate_form<H: FormHost + ?Sized>(&self, host: &H) -> FormReport {
        let outcomes = self
            .config
            .names()
            .map(|name| self.validate_field(host, name))
            .collect();
        let report = FormReport::new(outcomes);
        debug!(
            fields = report.outcomes.len(),
            errors = report.error_count(),
            "form validated"
        );
        report
    }

    /// Validate the whole form before it is sent.
    ///
    /// Alerts the user when required fields fail and returns whether the
    /// submission may proceed.
    pub fn validate_on_submit<H: FormHost + ?Sized>(&self, host: &H) -> bool {
        let report = self.validate_form(host);
        if let Some(alert) = report.submit_alert() {
            host.alert(alert);
        }
        report.can_submit()
    }

    /// Attach change and blur handlers to every registered control.
    ///
    /// Controls that cannot be bound are skipped; the first failure is
    /// returned once every other control has been bound.
    pub fn register_handlers<B: HandlerBinder + ?Sized>(&self, binder: &B) -> Result<(), HostError> {
        let mut first_error = None;

        for name in self.config.names() {
            if let Err(e) = binder.bind(self.config.form_id(), name) {
                warn!(field = %name, "could not bind handlers: {}", e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Page load hook: binds handlers. No initial validation pass is run, so
    /// messages rendered by the server stay until the user edits a field.
    pub fn on_page_load<B: HandlerBinder + ?Sized>(&self, binder: &B) -> Result<(), HostError> {
        self.register_handlers(binder)
    }
}
