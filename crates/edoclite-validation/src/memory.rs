// File: src/memory.rs
// Purpose: In-memory document host for headless validation and tests

use crate::host::{DisplayRegion, FormHost, HandlerBinder, HostError};
use crate::registry::{ValidationConfig, DEFAULT_FORM_ID};
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Element {
    text: String,
    class: String,
}

/// A minimal document: one form container with named controls, a set of
/// elements addressable by id, and a log of alerts shown to the user.
#[derive(Debug, Default)]
pub struct MemoryHost {
    form_id: String,
    controls: RefCell<HashMap<String, String>>,
    elements: RefCell<HashMap<String, Element>>,
    alerts: RefCell<Vec<String>>,
    bound: RefCell<Vec<String>>,
}

impl MemoryHost {
    /// Empty document whose form container has the default id
    pub fn new() -> Self {
        Self::with_form_id(DEFAULT_FORM_ID)
    }

    pub fn with_form_id(form_id: impl Into<String>) -> Self {
        Self {
            form_id: form_id.into(),
            ..Default::default()
        }
    }

    /// Document as the renderer would produce it for a configuration: an
    /// empty control and a complete message row per registered field.
    pub fn for_config(config: &ValidationConfig) -> Self {
        let host = Self::with_form_id(config.form_id());
        for name in config.names() {
            host.set_value(name, "");
            host.add_region(name);
        }
        host
    }

    /// Add the four message elements for a field
    pub fn add_region(&self, name: &str) {
        let region = DisplayRegion::for_field(name);
        let mut elements = self.elements.borrow_mut();
        for id in region.ids() {
            elements.entry(id.to_string()).or_default();
        }
    }

    pub fn add_element(&self, id: &str) {
        self.elements.borrow_mut().entry(id.to_string()).or_default();
    }

    pub fn remove_element(&self, id: &str) {
        self.elements.borrow_mut().remove(id);
    }

    /// Set (or create) a control's value
    pub fn set_value(&self, name: &str, value: &str) {
        self.controls
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    pub fn remove_control(&self, name: &str) {
        self.controls.borrow_mut().remove(name);
    }

    pub fn text(&self, id: &str) -> Option<String> {
        self.elements.borrow().get(id).map(|e| e.text.clone())
    }

    pub fn class(&self, id: &str) -> Option<String> {
        self.elements.borrow().get(id).map(|e| e.class.clone())
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    /// Return and clear the recorded alerts
    pub fn take_alerts(&self) -> Vec<String> {
        std::mem::take(&mut *self.alerts.borrow_mut())
    }

    /// Controls that have had handlers bound, in binding order
    pub fn bound(&self) -> Vec<String> {
        self.bound.borrow().clone()
    }

    fn with_element(&self, id: &str, update: impl FnOnce(&mut Element)) -> Result<(), HostError> {
        match self.elements.borrow_mut().get_mut(id) {
            Some(element) => {
                update(element);
                Ok(())
            }
            None => Err(HostError::ElementNotFound { id: id.to_string() }),
        }
    }
}

impl FormHost for MemoryHost {
    fn control_value(&self, form_id: &str, name: &str) -> Option<String> {
        if form_id != self.form_id {
            return None;
        }
        self.controls.borrow().get(name).cloned()
    }

    fn set_text(&self, id: &str, text: &str) -> Result<(), HostError> {
        self.with_element(id, |e| e.text = text.to_string())
    }

    fn set_class(&self, id: &str, class: &str) -> Result<(), HostError> {
        self.with_element(id, |e| e.class = class.to_string())
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}

impl HandlerBinder for MemoryHost {
    fn bind(&self, form_id: &str, name: &str) -> Result<(), HostError> {
        if self.control_value(form_id, name).is_none() {
            return Err(HostError::ControlNotFound {
                form_id: form_id.to_string(),
                name: name.to_string(),
            });
        }
        self.bound.borrow_mut().push(name.to_string());
        Ok(())
    }
}
