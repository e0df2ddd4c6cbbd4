use anyhow::Result;
use colored::Colorize;
use edoclite_validation::{FieldPattern, RulesFile};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// A problem found in a rule manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// Pattern does not compile; the field always shows an error
    BrokenPattern { field: String, error: String },
    /// Name registered more than once; the later entry replaces the earlier
    Duplicate { field: String },
    /// Required field with a pattern: only the pattern decides validity
    RequiredWithPattern { field: String },
}

impl Finding {
    pub fn is_error(&self) -> bool {
        matches!(self, Finding::BrokenPattern { .. })
    }
}

pub fn execute(rules: &Path) -> Result<bool> {
    let manifest = RulesFile::load(rules)?;
    let findings = lint(&manifest);

    if findings.is_empty() {
        println!(
            "{} {} field(s), no problems found",
            "✓".green(),
            manifest.fields.len()
        );
        return Ok(true);
    }

    for finding in &findings {
        match finding {
            Finding::BrokenPattern { field, error } => {
                println!("  {} {}: pattern does not compile: {}", "✗".red(), field, error)
            }
            Finding::Duplicate { field } => {
                println!("  {} {}: registered more than once, last entry wins", "⚠".yellow(), field)
            }
            Finding::RequiredWithPattern { field } => println!(
                "  {} {}: required with a pattern, the pattern alone decides validity",
                "ℹ".blue(),
                field
            ),
        }
    }

    Ok(!findings.iter().any(Finding::is_error))
}

/// Check the rule that takes effect for each name; superseded entries are
/// only reported as duplicates.
pub fn lint(manifest: &RulesFile) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut seen = HashSet::new();

    let effective: HashMap<&str, usize> = manifest
        .fields
        .iter()
        .enumerate()
        .map(|(position, entry)| (entry.name.as_str(), position))
        .collect();

    for (position, entry) in manifest.fields.iter().enumerate() {
        if !seen.insert(entry.name.as_str()) {
            findings.push(Finding::Duplicate {
                field: entry.name.clone(),
            });
        }

        if effective.get(entry.name.as_str()) != Some(&position) {
            continue;
        }

        let Some(pattern) = entry.pattern.as_deref().and_then(FieldPattern::parse) else {
            continue;
        };

        if let Some(e) = pattern.compile_error() {
            findings.push(Finding::BrokenPattern {
                field: entry.name.clone(),
                error: e.to_string(),
            });
        }

        if entry.required {
            findings.push(Finding::RequiredWithPattern {
                field: entry.name.clone(),
            });
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clean_manifest() {
        let manifest = RulesFile::from_toml(
            r#"
            [[fields]]
            name = "zip"
            pattern = "^\\d{5}$"

            [[fields]]
            name = "name"
            required = true
            "#,
        )
        .unwrap();
        assert!(lint(&manifest).is_empty());
    }

    #[test]
    fn test_findings() {
        let manifest = RulesFile::from_toml(
            r#"
            [[fields]]
            name = "code"
            pattern = "(abc"

            [[fields]]
            name = "email"
            pattern = "^.+@.+$"
            required = true

            [[fields]]
            name = "email"
            pattern = "^.+@.+$"
            required = true
            "#,
        )
        .unwrap();

        let findings = lint(&manifest);
        assert_eq!(findings.len(), 3);
        assert!(findings[0].is_error());
        assert_eq!(
            findings[1],
            Finding::Duplicate {
                field: "email".to_string()
            }
        );
        assert_eq!(
            findings[2],
            Finding::RequiredWithPattern {
                field: "email".to_string()
            }
        );
    }

    #[test]
    fn test_superseded_broken_pattern_is_only_a_duplicate() {
        let manifest = RulesFile::from_toml(
            r#"
            [[fields]]
            name = "code"
            pattern = "(abc"

            [[fields]]
            name = "code"
            pattern = "^abc$"
            "#,
        )
        .unwrap();

        let findings = lint(&manifest);
        assert_eq!(
            findings,
            vec![Finding::Duplicate {
                field: "code".to_string()
            }]
        );
        assert!(!findings.iter().any(Finding::is_error));
    }

    #[test]
    fn test_lookahead_pattern_compiles() {
        let manifest = RulesFile::from_toml(
            r#"
            [[fields]]
            name = "password"
            pattern = "^(?=.*\\d).{8,}$"
            "#,
        )
        .unwrap();
        assert!(lint(&manifest).is_empty());
    }
}
