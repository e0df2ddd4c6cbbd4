//! eDocLite Validation WASM
//!
//! Browser entry points for eDocLite field validation. The rendered document
//! calls `register` once per validated field, `onPageLoad` from its load
//! handler and `validateOnSubmit` from the form's submit handler.
//!
//! # Example (JavaScript)
//! ```javascript
//! import init, { register, onPageLoad, validateOnSubmit } from './edoclite_wasm.js';
//!
//! await init();
//! register('email', 'Email', '^.+@.+$', '', 'true');
//! register('comment', 'Comment', '', '', 'false');
//! onPageLoad();
//!
//! document.getElementById('edoclite').onsubmit = () => validateOnSubmit();
//! ```

mod dom;

use dom::{DomBinder, DomHost};
use edoclite_validation::{FieldOutcome, FieldValidator, Registry};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

thread_local! {
    /// Rules registered by the document, until the page finishes loading
    static PENDING: RefCell<Option<Registry>> = RefCell::new(Some(Registry::new()));
    /// Validator built from the registered rules
    static ACTIVE: RefCell<Option<Rc<FieldValidator>>> = const { RefCell::new(None) };
}

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Field outcome returned to JavaScript
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct OutcomeView {
    pub field: String,
    pub valid: bool,
    pub severity: String,
    pub message: String,
}

impl From<&FieldOutcome> for OutcomeView {
    fn from(outcome: &FieldOutcome) -> Self {
        Self {
            field: outcome.name.clone(),
            valid: outcome.valid,
            severity: outcome.severity.as_str().to_string(),
            message: outcome.message.clone(),
        }
    }
}

fn warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

/// Register a field for validation
///
/// # Arguments
/// * `name` - Name of the form control
/// * `title` - Label used in the default "is required" message
/// * `pattern` - Regular expression source, empty for none
/// * `message` - Message shown when invalid, empty for the default
/// * `required` - `"true"` marks the field required
#[wasm_bindgen]
pub fn register(name: &str, title: &str, pattern: &str, message: &str, required: &str) {
    PENDING.with(|pending| match pending.borrow_mut().as_mut() {
        Some(registry) => registry.register(name, title, pattern, message, required),
        None => warn(&format!(
            "edoclite: field '{}' registered after page load, ignored",
            name
        )),
    });
}

/// Use a different form container id (default `edoclite`)
#[wasm_bindgen(js_name = setFormId)]
pub fn set_form_id(form_id: &str) {
    PENDING.with(|pending| match pending.borrow_mut().as_mut() {
        Some(registry) => registry.set_form_id(form_id),
        None => warn("edoclite: form id changed after page load, ignored"),
    });
}

/// Freeze the registered rules on first use
fn active_validator() -> Rc<FieldValidator> {
    ACTIVE.with(|active| {
        active
            .borrow_mut()
            .get_or_insert_with(|| {
                let registry = PENDING
                    .with(|pending| pending.borrow_mut().take())
                    .unwrap_or_default();
                Rc::new(FieldValidator::new(registry.build()))
            })
            .clone()
    })
}

fn current_host() -> Result<Rc<DomHost>, JsValue> {
    DomHost::current()
        .map(Rc::new)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Bind change and blur handlers for every registered field
#[wasm_bindgen(js_name = onPageLoad)]
pub fn on_page_load() -> Result<(), JsValue> {
    let validator = active_validator();
    let binder = DomBinder::new(current_host()?, Rc::clone(&validator));
    validator
        .on_page_load(&binder)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Validate one field and update its message row
#[wasm_bindgen(js_name = validateField)]
pub fn validate_field(name: &str) -> Result<JsValue, JsValue> {
    let host = current_host()?;
    let outcome = active_validator().validate_field(host.as_ref(), name);
    Ok(serde_wasm_bindgen::to_value(&OutcomeView::from(&outcome))?)
}

/// Validate every field; returns the number of required fields in error
#[wasm_bindgen(js_name = validateForm)]
pub fn validate_form() -> Result<usize, JsValue> {
    let host = current_host()?;
    Ok(active_validator().validate_form(host.as_ref()).error_count())
}

/// Submit handler: returns false (and alerts) when required fields are in error
#[wasm_bindgen(js_name = validateOnSubmit)]
pub fn validate_on_submit() -> Result<bool, JsValue> {
    let host = current_host()?;
    Ok(active_validator().validate_on_submit(host.as_ref()))
}
