use anyhow::{bail, Context, Result};
use colored::Colorize;
use edoclite_validation::{FieldOutcome, FieldValidator, MemoryHost, RulesFile, Severity};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub fn execute(rules: &Path, values: Option<&Path>, set: &[String]) -> Result<bool> {
    let validator = FieldValidator::new(RulesFile::load(rules)?.into_registry().build());

    let mut supplied = match values {
        Some(path) => load_values(path)?,
        None => BTreeMap::new(),
    };
    for assignment in set {
        let (name, value) = parse_assignment(assignment)?;
        supplied.insert(name.to_string(), value.to_string());
    }

    let host = MemoryHost::for_config(validator.config());
    for (name, value) in &supplied {
        if validator.config().rule(name).is_none() {
            println!("  {} '{}' has no rule, ignored", "⚠".yellow(), name);
            continue;
        }
        host.set_value(name, value);
    }

    let report = validator.validate_form(&host);

    for outcome in &report.outcomes {
        println!("{}", format_outcome(outcome));
    }
    println!();

    for alert in host.take_alerts() {
        println!("{}", alert.yellow());
    }
    if let Some(alert) = report.submit_alert() {
        println!("{}", alert.yellow());
    }

    let passed = report.can_submit();
    if passed {
        println!("{}", "Form can be submitted".green().bold());
    } else {
        println!(
            "{}",
            format!("Submission blocked: {} required field(s) in error", report.error_count())
                .red()
                .bold()
        );
    }

    Ok(passed)
}

/// Read a JSON object of field values; non-string values use their JSON text
fn load_values(path: &Path) -> Result<BTreeMap<String, String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read values file: {:?}", path))?;
    let parsed: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse values file: {:?}", path))?;

    let Value::Object(map) = parsed else {
        bail!("Values file must contain a JSON object: {:?}", path);
    };

    Ok(map
        .into_iter()
        .map(|(name, value)| {
            let text = match value {
                Value::String(s) => s,
                Value::Null => String::new(),
                other => other.to_string(),
            };
            (name, text)
        })
        .collect())
}

fn parse_assignment(assignment: &str) -> Result<(&str, &str)> {
    match assignment.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name, value)),
        _ => bail!("Expected NAME=VALUE, got '{}'", assignment),
    }
}

fn format_outcome(outcome: &FieldOutcome) -> String {
    let label = match outcome.severity {
        Severity::Empty => format!("{:<8}", "ok").green(),
        Severity::Warning => format!("{:<8}", "warning").yellow(),
        Severity::Error => format!("{:<8}", "error").red(),
    };
    if outcome.valid {
        format!("  {} {}", label, outcome.name)
    } else {
        format!("  {} {}: {}", label, outcome.name, outcome.message)
    }
}
