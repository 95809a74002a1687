// Configuration validation for the CMS
//
// This crate checks an already-parsed site configuration against the fixed
// CMS configuration schema and renders every violation into one sorted,
// newline-separated report.

pub mod error;
pub mod report;
pub mod schema;
pub mod validator;

pub use error::{
    ConfigValidationError, InstancePath, PathSegment, ValidationResult, Violation, ViolationKind,
};
pub use report::ValidationReport;
pub use schema::{Schema, build_config_schema, config_schema};
pub use validator::{ValidationContext, collect_violations, validate, validate_config};
