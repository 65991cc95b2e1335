//! Timeline validation helpers and structured diagnostics.
//!
//! This module provides a non-panicking validation pass that reports
//! authoring-oriented diagnostics for a raw timeline payload. It inspects
//! the JSON directly, so it can flag quirks the tolerant document parser
//! papers over (a non-numeric `order`, an unrenderable `content` shape).

use serde_json::Value;

use crate::error::SourceError;

/// Severity level for a validation diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationSeverity {
    /// Violates a required structural expectation.
    Error,
    /// Suspicious or non-ideal authoring that still renders.
    Warning,
}

/// Structured validation diagnostic entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    /// Stable machine-readable diagnostic code.
    pub code: &'static str,
    /// Severity classification.
    pub severity: ValidationSeverity,
    /// Human-readable description.
    pub message: String,
    /// Optional payload location related to this diagnostic.
    pub location: Option<String>,
    /// Optional remediation hint.
    pub hint: Option<String>,
}

impl ValidationDiagnostic {
    fn error(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: ValidationSeverity::Error,
            message: message.into(),
            location: None,
            hint: None,
        }
    }

    fn warning(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: ValidationSeverity::Warning,
            message: message.into(),
            location: None,
            hint: None,
        }
    }

    fn at(mut self, location: String) -> Self {
        self.location = Some(location);
        self
    }

    fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Validation report with all discovered diagnostics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return all collected diagnostics.
    pub fn diagnostics(&self) -> &[ValidationDiagnostic] {
        &self.diagnostics
    }

    /// Number of error-severity diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == ValidationSeverity::Error)
            .count()
    }

    /// Number of warning-severity diagnostics.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == ValidationSeverity::Warning)
            .count()
    }

    /// True when no error-severity diagnostics were found.
    pub fn is_valid(&self) -> bool {
        self.error_count() == 0
    }

    fn push(&mut self, diagnostic: ValidationDiagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

/// Validate a raw timeline JSON payload.
///
/// Fails only when the payload is not JSON at all; every structural finding
/// is reported as a diagnostic instead.
pub fn validate_timeline_json(text: &str) -> Result<ValidationReport, SourceError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| SourceError::Parse(e.to_string()))?;
    let mut report = ValidationReport::new();

    let Some(root) = value.as_object() else {
        report.push(ValidationDiagnostic::error(
            "root-not-an-object",
            "top-level payload must be a JSON object",
        ));
        return Ok(report);
    };

    let chapters = match root.get("chapters") {
        None => {
            report.push(
                ValidationDiagnostic::error("no-chapters", "payload declares no chapters")
                    .hint("add a non-empty \"chapters\" array"),
            );
            return Ok(report);
        }
        Some(Value::Array(chapters)) => chapters,
        Some(other) => {
            report.push(
                ValidationDiagnostic::error(
                    "chapters-not-an-array",
                    format!("\"chapters\" must be an array, found {}", json_type(other)),
                )
                .at("chapters".to_string()),
            );
            return Ok(report);
        }
    };

    if chapters.is_empty() {
        report.push(
            ValidationDiagnostic::error("no-chapters", "chapter list is empty")
                .hint("add at least one chapter"),
        );
        return Ok(report);
    }

    for (index, chapter) in chapters.iter().enumerate() {
        let location = format!("chapters[{}]", index);
        let Some(chapter) = chapter.as_object() else {
            report.push(
                ValidationDiagnostic::warning(
                    "chapter-not-an-object",
                    format!("chapter entry is {}, not an object", json_type(chapter)),
                )
                .at(location),
            );
            continue;
        };

        if let Some(order) = chapter.get("order") {
            if !order.is_number() {
                report.push(
                    ValidationDiagnostic::warning(
                        "order-not-a-number",
                        format!(
                            "\"order\" is {}; it will sort as the default 0",
                            json_type(order)
                        ),
                    )
                    .at(format!("{}.order", location)),
                );
            }
        }

        if let Some(content) = chapter.get("content") {
            if !renderable_content(content) {
                report.push(
                    ValidationDiagnostic::warning(
                        "content-unrenderable",
                        format!(
                            "\"content\" is {}; no paragraphs will render",
                            json_type(content)
                        ),
                    )
                    .at(format!("{}.content", location))
                    .hint("use a string or an array of strings"),
                );
            }
        }

        let has_image = chapter.get("image").is_some_and(Value::is_string);
        let has_alt_source = chapter.get("imageAlt").is_some_and(Value::is_string)
            || chapter.get("title").is_some_and(Value::is_string);
        if has_image && !has_alt_source {
            report.push(
                ValidationDiagnostic::warning(
                    "image-missing-alt",
                    "image has no alt text source; a generated label will be used",
                )
                .at(format!("{}.image", location))
                .hint("add \"imageAlt\" or a chapter title"),
            );
        }
    }

    Ok(report)
}

fn renderable_content(content: &Value) -> bool {
    match content {
        Value::String(_) => true,
        Value::Array(items) => items.iter().all(Value::is_string),
        _ => false,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
