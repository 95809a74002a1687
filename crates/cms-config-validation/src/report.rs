// Aggregation and rendering of validation results

use std::fmt;

use crate::error::{ConfigValidationError, ValidationResult, Violation};

/// All violations from one validation call, with their canonical rendering.
///
/// Lines are sorted by code point so the report does not depend on the order
/// in which the document or the schema was traversed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    violations: Vec<Violation>,
    lines: Vec<String>,
}

impl ValidationReport {
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        let mut lines: Vec<String> = violations.iter().map(Violation::render).collect();
        lines.sort();
        Self { violations, lines }
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Violations in discovery order
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Sorted rendered lines
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The newline-joined report
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }

    /// `Ok` for an empty report, otherwise the aggregate failure
    pub fn into_result(self) -> ValidationResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ConfigValidationError::new(self))
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
