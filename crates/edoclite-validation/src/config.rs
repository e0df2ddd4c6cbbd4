// File: src/config.rs
// Purpose: Rule manifests (TOML or JSON) describing a form's validated fields

use crate::registry::{Registry, DEFAULT_FORM_ID};
use crate::rule::FieldRule;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A form's validation rules, as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesFile {
    /// Id of the form container (default: "edoclite")
    #[serde(default = "default_form_id")]
    pub form_id: String,

    #[serde(default)]
    pub fields: Vec<FieldEntry>,
}

/// One validated field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldEntry {
    pub name: String,

    #[serde(default)]
    pub title: String,

    /// Regular expression the value must match
    #[serde(default)]
    pub pattern: Option<String>,

    /// Message shown when invalid; empty uses the built-in message
    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub required: bool,
}

fn default_form_id() -> String {
    DEFAULT_FORM_ID.to_string()
}

impl Default for RulesFile {
    fn default() -> Self {
        Self {
            form_id: default_form_id(),
            fields: Vec::new(),
        }
    }
}

impl RulesFile {
    /// Load a manifest, picking the format from the file extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read rules file: {:?}", path))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&content)
                .with_context(|| format!("Failed to parse rules file: {:?}", path)),
            Some("json") => Self::from_json(&content)
                .with_context(|| format!("Failed to parse rules file: {:?}", path)),
            _ => bail!("Unsupported rules file format: {:?} (expected .toml or .json)", path),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(content)?)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Register every entry, in file order
    pub fn into_registry(self) -> Registry {
        let mut registry = Registry::new().with_form_id(self.form_id);
        for entry in self.fields {
            registry.insert(FieldRule::new(
                entry.name,
                entry.title,
                entry.pattern.as_deref(),
                entry.message,
                entry.required,
            ));
        }
        registry
    }
}
