//! eDocLite field validation
//!
//! Validates the registered fields of a rendered eDocLite form and shows the
//! result inline, in the message row the document renderer placed next to
//! each field.
//!
//! The validator never touches a document directly. The embedding
//! environment implements [`FormHost`] (control values, element text and
//! classes, alerts), [`HandlerBinder`] (change/blur wiring) and
//! [`FieldEvent`] (event origin). The browser bindings live in the
//! `edoclite-wasm` crate; [`MemoryHost`] is a headless host.
//!
//! ```
//! use edoclite_validation::{FieldValidator, MemoryHost, Registry, Severity};
//!
//! let mut registry = Registry::new();
//! registry.register("email", "Email", "^.+@.+$", "", "true");
//! let validator = FieldValidator::new(registry.build());
//!
//! let host = MemoryHost::for_config(validator.config());
//! host.set_value("email", "foo");
//!
//! let outcome = validator.validate_field(&host, "email");
//! assert_eq!(outcome.severity, Severity::Error);
//! assert_eq!(outcome.message, "foo does not match ^.+@.+$");
//! assert!(!validator.validate_on_submit(&host));
//! ```

pub mod config;
pub mod host;
pub mod memory;
pub mod outcome;
pub mod registry;
pub mod rule;
pub mod validator;

pub use config::{FieldEntry, RulesFile};
pub use host::{DisplayRegion, FieldEvent, FormHost, HandlerBinder, HostError};
pub use memory::MemoryHost;
pub use outcome::{FieldOutcome, FormReport, NBSP};
pub use registry::{Registry, ValidationConfig, DEFAULT_FORM_ID};
pub use rule::{FieldPattern, FieldRule, Severity};
pub use validator::FieldValidator;
