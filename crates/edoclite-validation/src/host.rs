// File: src/host.rs
// Purpose: Traits the embedding document environment implements

use crate::rule::FieldPattern;
use thiserror::Error;

/// Failures reported by a host while reading or updating the document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("no control named '{name}' in form '{form_id}'")]
    ControlNotFound { form_id: String, name: String },

    #[error("Could not find error element by id: {id}")]
    ElementNotFound { id: String },

    #[error("{0}")]
    Host(String),
}

/// Access to the rendered document hosting the form
///
/// Methods take `&self`; hosts backed by a live document mutate through it.
pub trait FormHost {
    /// Current value of the named control inside the form container
    fn control_value(&self, form_id: &str, name: &str) -> Option<String>;

    /// Replace the text content of an element
    fn set_text(&self, id: &str, text: &str) -> Result<(), HostError>;

    /// Replace the class attribute of an element
    fn set_class(&self, id: &str, class: &str) -> Result<(), HostError>;

    /// Show a blocking message to the user
    fn alert(&self, message: &str);

    /// Match a value against a field pattern. Hosts with a native regular
    /// expression engine override this to use it.
    fn matches(&self, pattern: &FieldPattern, value: &str) -> Result<bool, String> {
        pattern.is_match(value)
    }
}

/// Wires change and blur events of a control to field validation
pub trait HandlerBinder {
    fn bind(&self, form_id: &str, name: &str) -> Result<(), HostError>;
}

/// An event raised by a form control.
///
/// Hosts resolve the originating control however their event model
/// requires, including stepping from a text node up to its parent element.
pub trait FieldEvent {
    /// Name of the control that raised the event
    fn origin_control(&self) -> Option<String>;
}

impl FieldEvent for &str {
    fn origin_control(&self) -> Option<String> {
        Some(self.to_string())
    }
}

/// Ids of the elements that display one field's message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRegion {
    pub message: String,
    pub header_cell: String,
    pub data_cell: String,
    pub row: String,
}

impl DisplayRegion {
    pub fn for_field(name: &str) -> Self {
        Self {
            message: format!("{}_message", name),
            header_cell: format!("{}_messageHeaderCell", name),
            data_cell: format!("{}_messageDataCell", name),
            row: format!("{}_messageRow", name),
        }
    }

    pub fn ids(&self) -> [&str; 4] {
        [
            self.message.as_str(),
            self.header_cell.as_str(),
            self.data_cell.as_str(),
            self.row.as_str(),
        ]
    }
}
