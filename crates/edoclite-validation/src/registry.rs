// File: src/registry.rs
// Purpose: Field registration and the frozen validation configuration

use crate::rule::{parse_required, FieldRule};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Id of the form container that holds the validated controls
pub const DEFAULT_FORM_ID: &str = "edoclite";

/// Collects field rules while the document is being loaded.
///
/// Registering a name twice replaces the earlier rule; the name keeps the
/// position of its first registration.
#[derive(Debug, Clone)]
pub struct Registry {
    form_id: String,
    rules: Vec<FieldRule>,
    index: HashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            form_id: DEFAULT_FORM_ID.to_string(),
            rules: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Override the id of the form container
    pub fn with_form_id(mut self, form_id: impl Into<String>) -> Self {
        self.form_id = form_id.into();
        self
    }

    pub fn set_form_id(&mut self, form_id: impl Into<String>) {
        self.form_id = form_id.into();
    }

    /// Register a field as emitted by the document renderer.
    ///
    /// `pattern` is the regular expression source (empty for none) and
    /// `required` the raw flag, where only `"true"` marks the field required.
    pub fn register(&mut self, name: &str, title: &str, pattern: &str, message: &str, required: &str) {
        self.insert(FieldRule::new(
            name,
            title,
            Some(pattern),
            message,
            parse_required(required),
        ));
    }

    /// Add an already-built rule
    pub fn insert(&mut self, rule: FieldRule) {
        if let Some(pattern) = &rule.pattern {
            if let Some(e) = pattern.compile_error() {
                warn!(field = %rule.name, pattern = %pattern, "pattern does not compile: {}", e);
            }
        }

        match self.index.get(&rule.name) {
            Some(&position) => {
                warn!(field = %rule.name, "field registered twice, keeping the latest rule");
                self.rules[position] = rule;
            }
            None => {
                debug!(field = %rule.name, required = rule.required, "registered field");
                self.index.insert(rule.name.clone(), self.rules.len());
                self.rules.push(rule);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Freeze the registry into a read-only configuration
    pub fn build(self) -> ValidationConfig {
        ValidationConfig {
            form_id: self.form_id,
            rules: self.rules,
            index: self.index,
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only set of field rules, in registration order
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    form_id: String,
    rules: Vec<FieldRule>,
    index: HashMap<String, usize>,
}

impl ValidationConfig {
    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    pub fn rule(&self, name: &str) -> Option<&FieldRule> {
        self.index.get(name).map(|&position| &self.rules[position])
    }

    pub fn rules(&self) -> impl Iterator<Item = &FieldRule> {
        self.rules.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
