// Violation and error types for configuration validation

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{self, Write as _};
use thiserror::Error;

use crate::report::ValidationReport;

/// How the document root is named in rendered messages
pub const ROOT_LABEL: &str = "config";

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ConfigValidationError>;

/// Structured violation kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ViolationKind {
    /// A mapping lacks a required key
    MissingRequiredProperty { property: String },

    /// The fragment has the wrong runtime kind
    TypeMismatch { expected: String, got: String },

    /// A sequence is shorter than its lower bound
    ArrayTooShort { length: usize, min_items: usize },

    /// A scalar is not among the allowed values
    InvalidEnumValue { value: String, allowed: Vec<String> },

    /// No branch of an `anyOf` group matched
    AnyOfFailed,

    /// Zero, or more than one, branch of a `oneOf` group matched
    OneOfFailed { matched: usize },

    /// The predicate of a conditional held but its `then` schema failed
    ConditionalThenFailed,

    /// A cross-field rule attached to the schema failed
    Custom { keyword: String, message: String },
}

impl ViolationKind {
    /// The schema keyword that produced this violation
    pub fn keyword(&self) -> &str {
        match self {
            ViolationKind::MissingRequiredProperty { .. } => "required",
            ViolationKind::TypeMismatch { .. } => "type",
            ViolationKind::ArrayTooShort { .. } => "minItems",
            ViolationKind::InvalidEnumValue { .. } => "enum",
            ViolationKind::AnyOfFailed => "anyOf",
            ViolationKind::OneOfFailed { .. } => "oneOf",
            ViolationKind::ConditionalThenFailed => "conditionalThen",
            ViolationKind::Custom { keyword, .. } => keyword,
        }
    }

    /// The message that follows the path in a rendered violation
    pub fn message(&self) -> String {
        match self {
            ViolationKind::MissingRequiredProperty { property } => {
                format!("should have required property '{}'", property)
            }
            ViolationKind::TypeMismatch { expected, .. } => format!("should be {}", expected),
            ViolationKind::ArrayTooShort { min_items, .. } => {
                format!("should NOT have less than {} items", min_items)
            }
            ViolationKind::InvalidEnumValue { .. } => {
                "should be equal to one of the allowed values".to_string()
            }
            ViolationKind::AnyOfFailed => "should match some schema in anyOf".to_string(),
            ViolationKind::OneOfFailed { .. } => {
                "should match exactly one schema in oneOf".to_string()
            }
            ViolationKind::ConditionalThenFailed => "should match \"then\" schema".to_string(),
            ViolationKind::Custom { message, .. } => message.clone(),
        }
    }
}

/// One detected mismatch between a document fragment and its schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// The structured violation kind
    pub kind: ViolationKind,
    /// Where in the document the violation occurred
    pub instance_path: InstancePath,
}

impl Violation {
    pub fn new(kind: ViolationKind, instance_path: InstancePath) -> Self {
        Self {
            kind,
            instance_path,
        }
    }

    pub fn keyword(&self) -> &str {
        self.kind.keyword()
    }

    pub fn message(&self) -> String {
        self.kind.message()
    }

    /// Canonical one-line rendering, e.g. `'backend' should have required property 'name'`
    pub fn render(&self) -> String {
        format!("{} {}", self.instance_path, self.kind.message())
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.instance_path, self.kind.message())
    }
}

/// Aggregate failure raised when a document has at least one violation.
///
/// `Display` yields the sorted, newline-joined report, byte-for-byte.
#[derive(Debug, Clone, Error)]
#[error("{report}")]
pub struct ConfigValidationError {
    pub report: ValidationReport,
}

impl ConfigValidationError {
    pub fn new(report: ValidationReport) -> Self {
        Self { report }
    }

    /// Violations in the order they were discovered
    pub fn violations(&self) -> &[Violation] {
        self.report.violations()
    }

    /// Rendered lines in report order
    pub fn lines(&self) -> &[String] {
        self.report.lines()
    }
}

/// Instance path (e.g., ["collections", 0, "fields"])
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstancePath {
    segments: Vec<PathSegment>,
}

impl InstancePath {
    /// Create a new empty instance path
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Push a key segment onto the path
    pub fn push_key(&mut self, key: impl Into<String>) {
        self.segments.push(PathSegment::Key(key.into()));
    }

    /// Push an index segment onto the path
    pub fn push_index(&mut self, index: usize) {
        self.segments.push(PathSegment::Index(index));
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    /// Pop the last segment from the path
    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Unquoted accessor form: `collections[0].fields[1].name`.
    ///
    /// Empty for the root.
    pub fn accessor(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                PathSegment::Key(key) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(key);
                }
                PathSegment::Index(index) => {
                    let _ = write!(out, "[{}]", index);
                }
            }
        }
        out
    }
}

impl fmt::Display for InstancePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "{}", ROOT_LABEL)
        } else {
            write!(f, "'{}'", self.accessor())
        }
    }
}

/// A segment in an instance path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Object key
    Key(String),
    /// Array index
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{}", key),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// Human-readable kind of a document value
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
