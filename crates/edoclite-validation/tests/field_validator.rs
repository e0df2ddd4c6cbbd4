/// Field validation against an in-memory document
///
/// Covers the display contract (message text, header text, classes), the
/// submit gate and handler wiring on page load.

use edoclite_validation::{
    FieldEvent, FieldPattern, FieldValidator, FormHost, HostError, MemoryHost, Registry, Severity,
    NBSP,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn email_validator() -> FieldValidator {
    let mut registry = Registry::new();
    registry.register("email", "Email", "^.+@.+$", "", "true");
    FieldValidator::new(registry.build())
}

fn signup_validator() -> FieldValidator {
    let mut registry = Registry::new();
    registry.register("email", "Email", "^.+@.+$", "", "true");
    registry.register("name", "Name", "", "", "true");
    registry.register("nickname", "Nickname", "^[a-z]+$", "lowercase letters only", "false");
    registry.register("notes", "Notes", "", "", "false");
    FieldValidator::new(registry.build())
}

fn assert_region(host: &MemoryHost, name: &str, severity: Severity, message: &str) {
    assert_eq!(host.text(&format!("{}_message", name)).unwrap(), message);
    assert_eq!(
        host.text(&format!("{}_messageHeaderCell", name)).unwrap(),
        severity.as_str()
    );
    assert_eq!(
        host.class(&format!("{}_messageHeaderCell", name)).unwrap(),
        format!("{}_messageHeaderCell", severity)
    );
    assert_eq!(
        host.class(&format!("{}_messageDataCell", name)).unwrap(),
        format!("{}_messageDataCell", severity)
    );
    assert_eq!(
        host.class(&format!("{}_messageRow", name)).unwrap(),
        format!("{}_messageRow", severity)
    );
}

#[rstest]
#[case("", Severity::Error, "field 'Email' is required")]
#[case("foo", Severity::Error, "foo does not match ^.+@.+$")]
#[case("a@b", Severity::Empty, "\u{a0}")]
fn test_email_scenario(#[case] value: &str, #[case] severity: Severity, #[case] shown: &str) {
    let validator = email_validator();
    let host = MemoryHost::for_config(validator.config());
    host.set_value("email", value);

    let outcome = validator.validate_field(&host, "email");
    assert_eq!(outcome.severity, severity);
    assert_eq!(outcome.valid, severity == Severity::Empty);
    assert_region(&host, "email", severity, shown);
    assert!(host.alerts().is_empty());
}

#[test]
fn test_validation_is_idempotent() {
    let validator = signup_validator();
    let host = MemoryHost::for_config(validator.config());
    host.set_value("nickname", "Bad Nick");

    let first = validator.validate_field(&host, "nickname");
    let first_text = host.text("nickname_message");
    let first_row = host.class("nickname_messageRow");

    let second = validator.validate_field(&host, "nickname");
    assert_eq!(first, second);
    assert_eq!(host.text("nickname_message"), first_text);
    assert_eq!(host.class("nickname_messageRow"), first_row);
    assert_region(&host, "nickname", Severity::Warning, "lowercase letters only");
}

#[test]
fn test_transition_back_to_empty() {
    let validator = signup_validator();
    let host = MemoryHost::for_config(validator.config());

    validator.validate_field(&host, "name");
    assert_region(&host, "name", Severity::Error, "field 'Name' is required");

    host.set_value("name", "Ada");
    validator.validate_field(&host, "name");
    assert_region(&host, "name", Severity::Empty, &NBSP.to_string());
}

#[test]
fn test_validate_form_counts_required_failures_only() {
    let validator = signup_validator();
    let host = MemoryHost::for_config(validator.config());
    host.set_value("nickname", "NOT-LOWER");

    let report = validator.validate_form(&host);
    // email and name are required and empty; nickname fails but is optional
    assert_eq!(report.error_count(), 2);
    assert_eq!(report.invalid_count(), 3);
    assert_eq!(
        report.outcomes.iter().map(|o| o.name.as_str()).collect::<Vec<_>>(),
        vec!["email", "name", "nickname", "notes"]
    );
    assert!(report.get("notes").unwrap().valid);
}

#[test]
fn test_submit_singular_alert() {
    let validator = signup_validator();
    let host = MemoryHost::for_config(validator.config());
    host.set_value("email", "a@b");

    assert!(!validator.validate_on_submit(&host));
    assert_eq!(
        host.alerts(),
        vec!["There is a field which requires correction before sending".to_string()]
    );
}

#[test]
fn test_submit_plural_alert() {
    let validator = signup_validator();
    let host = MemoryHost::for_config(validator.config());

    assert!(!validator.validate_on_submit(&host));
    assert_eq!(
        host.alerts(),
        vec!["There are fields which require correction before sending".to_string()]
    );
}

#[test]
fn test_submit_passes_with_optional_failures() {
    let validator = signup_validator();
    let host = MemoryHost::for_config(validator.config());
    host.set_value("email", "a@b");
    host.set_value("name", "Ada");
    host.set_value("nickname", "UPPER");

    assert!(validator.validate_on_submit(&host));
    assert!(host.alerts().is_empty());
    assert_region(&host, "nickname", Severity::Warning, "lowercase letters only");
}

#[test]
fn test_missing_display_element_alerts_and_continues() {
    let validator = email_validator();
    let host = MemoryHost::for_config(validator.config());
    host.remove_element("email_message");
    host.set_value("email", "foo");

    let outcome = validator.validate_field(&host, "email");
    assert_eq!(outcome.severity, Severity::Error);
    assert_eq!(
        host.alerts(),
        vec!["Could not find error element by id: email_message".to_string()]
    );
    assert_eq!(host.class("email_messageRow").unwrap(), "error_messageRow");
}

#[test]
fn test_missing_control_is_reported_on_field_and_counted() {
    let validator = signup_validator();
    let host = MemoryHost::for_config(validator.config());
    host.set_value("email", "a@b");
    host.remove_control("name");

    let report = validator.validate_form(&host);
    let name = report.get("name").unwrap();
    assert_eq!(name.severity, Severity::Error);
    assert_eq!(name.message, "Error validating field 'name': control not found");
    assert_eq!(report.error_count(), 1);
    // evaluation continued past the faulty field
    assert!(report.get("notes").unwrap().valid);
}

#[test]
fn test_broken_pattern_does_not_stop_form() {
    let mut registry = Registry::new();
    registry.register("code", "Code", "[a-", "", "false");
    registry.register("name", "Name", "", "", "true");
    let validator = FieldValidator::new(registry.build());
    let host = MemoryHost::for_config(validator.config());
    host.set_value("name", "Ada");

    let report = validator.validate_form(&host);
    let code = report.get("code").unwrap();
    assert!(!code.valid);
    assert_eq!(code.severity, Severity::Error);
    assert_eq!(report.error_count(), 0);
    assert_eq!(host.class("code_messageRow").unwrap(), "error_messageRow");
}

struct TextNodeEvent {
    parent: Option<&'static str>,
}

impl FieldEvent for TextNodeEvent {
    fn origin_control(&self) -> Option<String> {
        self.parent.map(str::to_string)
    }
}

#[test]
fn test_validate_event_dispatch() {
    let validator = signup_validator();
    let host = MemoryHost::for_config(validator.config());
    host.set_value("name", "Ada");

    let outcome = validator
        .validate(&host, &TextNodeEvent { parent: Some("name") })
        .unwrap();
    assert!(outcome.valid);

    assert!(validator.validate(&host, &TextNodeEvent { parent: None }).is_none());

    let outcome = validator.validate(&host, &"email").unwrap();
    assert_eq!(outcome.severity, Severity::Error);
}

#[test]
fn test_page_load_binds_handlers_without_validating() {
    let validator = signup_validator();
    let host = MemoryHost::for_config(validator.config());

    validator.on_page_load(&host).unwrap();
    assert_eq!(host.bound(), vec!["email", "name", "nickname", "notes"]);
    // server-rendered state is left untouched
    assert_eq!(host.text("email_message").unwrap(), "");
    assert_eq!(host.class("email_messageRow").unwrap(), "");
}

#[test]
fn test_register_handlers_reports_missing_control() {
    let validator = signup_validator();
    let host = MemoryHost::for_config(validator.config());
    host.remove_control("name");

    let err = validator.register_handlers(&host).unwrap_err();
    assert_eq!(
        err,
        HostError::ControlNotFound {
            form_id: "edoclite".to_string(),
            name: "name".to_string(),
        }
    );
    assert_eq!(host.bound(), vec!["email", "nickname", "notes"]);
}

#[test]
fn test_lookahead_password_allows_submit() {
    let mut registry = Registry::new();
    registry.register("pw", "Password", r"^(?=.*\d).{8,}$", "", "true");
    let validator = FieldValidator::new(registry.build());
    let host = MemoryHost::for_config(validator.config());

    host.set_value("pw", "abcdefg1");
    assert!(validator.validate_on_submit(&host));
    assert_region(&host, "pw", Severity::Empty, "\u{a0}");

    host.set_value("pw", "abcdefgh");
    assert!(!validator.validate_on_submit(&host));
    assert_region(
        &host,
        "pw",
        Severity::Error,
        r"abcdefgh does not match ^(?=.*\d).{8,}$",
    );
}

#[test]
fn test_non_ascii_digits_rejected() {
    let mut registry = Registry::new();
    registry.register("qty", "Quantity", r"^\d+$", "", "false");
    let validator = FieldValidator::new(registry.build());
    let host = MemoryHost::for_config(validator.config());
    host.set_value("qty", "\u{663}\u{664}");

    let outcome = validator.validate_field(&host, "qty");
    assert!(!outcome.valid);
    assert_eq!(outcome.severity, Severity::Warning);
}

/// Host whose engine accepts nothing, to check evaluation goes through it
struct RejectingHost(MemoryHost);

impl FormHost for RejectingHost {
    fn control_value(&self, form_id: &str, name: &str) -> Option<String> {
        self.0.control_value(form_id, name)
    }

    fn set_text(&self, id: &str, text: &str) -> Result<(), HostError> {
        self.0.set_text(id, text)
    }

    fn set_class(&self, id: &str, class: &str) -> Result<(), HostError> {
        self.0.set_class(id, class)
    }

    fn alert(&self, message: &str) {
        self.0.alert(message)
    }

    fn matches(&self, _pattern: &FieldPattern, _value: &str) -> Result<bool, String> {
        Err("engine unavailable".to_string())
    }
}

#[test]
fn test_host_pattern_engine_is_used() {
    let validator = email_validator();
    let host = RejectingHost(MemoryHost::for_config(validator.config()));
    host.0.set_value("email", "a@b");

    let outcome = validator.validate_field(&host, "email");
    assert_eq!(outcome.severity, Severity::Error);
    assert_eq!(
        outcome.message,
        "Error validating field 'email': invalid pattern ^.+@.+$: engine unavailable"
    );
}
