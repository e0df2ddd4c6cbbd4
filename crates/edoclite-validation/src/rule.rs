// File: src/rule.rs
// Purpose: Per-field validation rule and message severity

use fancy_regex::Regex;
use std::fmt;

/// Severity of a field message. Drives the style classes of the message row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    /// Field is valid; the message row should render hidden.
    #[default]
    Empty,
    /// Field is invalid but not required.
    Warning,
    /// Field is invalid and required, or could not be evaluated.
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Empty => "empty",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    /// Class for the `<name>_messageHeaderCell` element
    pub fn header_class(self) -> String {
        format!("{}_messageHeaderCell", self.as_str())
    }

    /// Class for the `<name>_messageDataCell` element
    pub fn data_class(self) -> String {
        format!("{}_messageDataCell", self.as_str())
    }

    /// Class for the `<name>_messageRow` element
    pub fn row_class(self) -> String {
        format!("{}_messageRow", self.as_str())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field pattern as written in the document, plus its compiled form.
///
/// Sources are browser regular expressions. They are compiled with
/// backtracking support (lookaround, backreferences) and with `\d`, `\w` and
/// `.` narrowed to their ECMAScript meaning. A source that fails to compile
/// is kept so the failure surfaces on the field itself when it is evaluated.
#[derive(Debug, Clone)]
pub struct FieldPattern {
    source: String,
    compiled: Result<Regex, String>,
}

impl FieldPattern {
    /// Compile a pattern source. Empty sources mean "no pattern".
    pub fn parse(source: &str) -> Option<Self> {
        if source.is_empty() {
            return None;
        }
        Some(Self {
            source: source.to_string(),
            compiled: Regex::new(&ecma_to_rust(source)).map_err(|e| e.to_string()),
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Match a value with the built-in engine
    pub fn is_match(&self, value: &str) -> Result<bool, String> {
        match &self.compiled {
            Ok(regex) => regex.is_match(value).map_err(|e| e.to_string()),
            Err(e) => Err(e.clone()),
        }
    }

    pub fn compile_error(&self) -> Option<&str> {
        self.compiled.as_ref().err().map(String::as_str)
    }

    pub fn is_compiled(&self) -> bool {
        self.compiled.is_ok()
    }
}

const ASCII_WORD: &str = "0-9A-Za-z_";

/// Rewrite the ECMAScript classes that differ from Rust's Unicode defaults.
///
/// `\d` and `\w` are ASCII-only in browsers, `.` stops at every line
/// terminator, and `\/` is a plain slash.
fn ecma_to_rust(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars();
    let mut in_class = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('d') if in_class => out.push_str("0-9"),
                Some('d') => out.push_str("[0-9]"),
                Some('D') if !in_class => out.push_str("[^0-9]"),
                Some('w') if in_class => out.push_str(ASCII_WORD),
                Some('w') => out.push_str("[0-9A-Za-z_]"),
                Some('W') if !in_class => out.push_str("[^0-9A-Za-z_]"),
                Some('/') => out.push('/'),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            },
            '[' if !in_class => {
                in_class = true;
                out.push(c);
            }
            ']' if in_class => {
                in_class = false;
                out.push(c);
            }
            '.' if !in_class => out.push_str("[^\n\r\u{2028}\u{2029}]"),
            _ => out.push(c),
        }
    }

    out
}

impl fmt::Display for FieldPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Validation rule for one named form control
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub name: String,
    pub title: String,
    pub pattern: Option<FieldPattern>,
    /// Message shown when the field is invalid; empty means use the default
    pub message: String,
    pub required: bool,
}

impl FieldRule {
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        pattern: Option<&str>,
        message: impl Into<String>,
        required: bool,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            pattern: pattern.and_then(FieldPattern::parse),
            message: message.into(),
            required,
        }
    }

    /// Title used in default messages, falling back to the field name
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.name
        } else {
            &self.title
        }
    }

    /// Severity reported when this field fails validation
    pub fn failure_severity(&self) -> Severity {
        if self.required {
            Severity::Error
        } else {
            Severity::Warning
        }
    }
}

/// Parse the required flag the way documents emit it: only `"true"` is true.
pub fn parse_required(flag: &str) -> bool {
    flag == "true"
}
