// Configuration validation engine

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::error::{
    InstancePath, PathSegment, ValidationResult, Violation, ViolationKind, json_type_name,
};
use crate::report::ValidationReport;
use crate::schema::{
    AllOfSchema, AnyOfSchema, ArraySchema, ConditionalSchema, CustomSchema, ObjectSchema,
    OneOfSchema, RequiredSchema, ScalarKind, ScalarSchema, Schema, config_schema,
};

/// Validates a document against the CMS configuration schema
pub fn validate_config(document: &Value) -> ValidationResult<()> {
    validate(document, config_schema())
}

/// Validates a document against a schema.
///
/// Every violation is collected; a non-empty set is returned as a single
/// aggregate error whose message is the sorted report.
pub fn validate(document: &Value, schema: &Schema) -> ValidationResult<()> {
    let violations = collect_violations(document, schema);
    debug!(violations = violations.len(), "validated configuration document");
    ValidationReport::from_violations(violations).into_result()
}

/// Runs the structural pass and returns the raw violations in discovery order
pub fn collect_violations(document: &Value, schema: &Schema) -> Vec<Violation> {
    let mut context = ValidationContext::new();
    validate_generic(document, schema, &mut context);
    context.into_violations()
}

/// Validation context tracks state during validation
#[derive(Debug, Default)]
pub struct ValidationContext {
    /// Current instance path (e.g., ["collections", 0, "fields"])
    instance_path: InstancePath,
    /// Collected violations
    violations: Vec<Violation>,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty context at the same location, for evaluating a branch in isolation
    fn branch(&self) -> Self {
        Self {
            instance_path: self.instance_path.clone(),
            violations: Vec::new(),
        }
    }

    /// Record a violation at the current path
    pub fn add_violation(&mut self, kind: ViolationKind) {
        self.violations
            .push(Violation::new(kind, self.instance_path.clone()));
    }

    /// Execute a function with a new instance path segment
    pub fn with_instance_path<F, R>(&mut self, segment: PathSegment, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        self.instance_path.push(segment);
        let result = f(self);
        self.instance_path.pop();
        result
    }

    pub fn instance_path(&self) -> &InstancePath {
        &self.instance_path
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

/// Main validation dispatcher
fn validate_generic(value: &Value, schema: &Schema, context: &mut ValidationContext) {
    match schema {
        Schema::Any => {}
        Schema::Scalar(s) => validate_scalar(value, s, context),
        Schema::Object(s) => validate_object(value, s, context),
        Schema::Required(s) => validate_required(value, s, context),
        Schema::Array(s) => validate_array(value, s, context),
        Schema::AnyOf(s) => validate_any_of(value, s, context),
        Schema::OneOf(s) => validate_one_of(value, s, context),
        Schema::AllOf(s) => validate_all_of(value, s, context),
        Schema::Conditional(s) => validate_conditional(value, s, context),
        Schema::Custom(s) => validate_custom(value, s, context),
    }
}

/// Validate `value` against `schema` in an isolated context, returning its violations
fn validate_branch(value: &Value, schema: &Schema, context: &ValidationContext) -> Vec<Violation> {
    let mut sub_context = context.branch();
    validate_generic(value, schema, &mut sub_context);
    sub_context.into_violations()
}

fn validate_scalar(value: &Value, schema: &ScalarSchema, context: &mut ValidationContext) {
    let matches = match &schema.kind {
        ScalarKind::String => value.is_string(),
        ScalarKind::Boolean => value.is_boolean(),
        ScalarKind::Enum(allowed) => {
            if !allowed.contains(value) {
                context.add_violation(ViolationKind::InvalidEnumValue {
                    value: value.to_string(),
                    allowed: allowed.iter().map(Value::to_string).collect(),
                });
            }
            return;
        }
    };

    if !matches {
        context.add_violation(ViolationKind::TypeMismatch {
            expected: schema.kind.type_name().to_string(),
            got: json_type_name(value).to_string(),
        });
    }
}

fn check_required(
    entries: &Map<String, Value>,
    required: &[String],
    context: &mut ValidationContext,
) {
    for name in required {
        if !entries.contains_key(name) {
            context.add_violation(ViolationKind::MissingRequiredProperty {
                property: name.clone(),
            });
        }
    }
}

/// Validate an object value
fn validate_object(value: &Value, schema: &ObjectSchema, context: &mut ValidationContext) {
    let Some(entries) = value.as_object() else {
        context.add_violation(ViolationKind::TypeMismatch {
            expected: "object".to_string(),
            got: json_type_name(value).to_string(),
        });
        return;
    };

    check_required(entries, &schema.required, context);

    for (key, property_value) in entries {
        if let Some(property_schema) = schema.properties.get(key) {
            context.with_instance_path(PathSegment::Key(key.clone()), |ctx| {
                validate_generic(property_value, property_schema, ctx)
            });
        }
    }
}

/// Key presence only; anything that is not a mapping passes
fn validate_required(value: &Value, schema: &RequiredSchema, context: &mut ValidationContext) {
    if let Some(entries) = value.as_object() {
        check_required(entries, &schema.required, context);
    }
}

/// Validate an array value
fn validate_array(value: &Value, schema: &ArraySchema, context: &mut ValidationContext) {
    let Some(items) = value.as_array() else {
        context.add_violation(ViolationKind::TypeMismatch {
            expected: "array".to_string(),
            got: json_type_name(value).to_string(),
        });
        return;
    };

    if let Some(min) = schema.min_items
        && items.len() < min
    {
        context.add_violation(ViolationKind::ArrayTooShort {
            length: items.len(),
            min_items: min,
        });
    }

    if let Some(item_schema) = &schema.items {
        for (i, item) in items.iter().enumerate() {
            context.with_instance_path(PathSegment::Index(i), |ctx| {
                validate_generic(item, item_schema, ctx)
            });
        }
    }
}

/// Validate anyOf (at least one schema must match)
fn validate_any_of(value: &Value, schema: &AnyOfSchema, context: &mut ValidationContext) {
    let mut branch_violations = Vec::new();

    for (i, subschema) in schema.schemas.iter().enumerate() {
        let violations = validate_branch(value, subschema, context);
        if violations.is_empty() {
            trace!(path = %context.instance_path, branch = i, "anyOf matched");
            return;
        }
        branch_violations.extend(violations);
    }

    trace!(path = %context.instance_path, "anyOf matched no branch");
    context.violations.extend(branch_violations);
    context.add_violation(ViolationKind::AnyOfFailed);
}

/// Validate oneOf (exactly one schema must match)
fn validate_one_of(value: &Value, schema: &OneOfSchema, context: &mut ValidationContext) {
    let mut matched = 0;
    let mut branch_violations = Vec::new();

    for subschema in &schema.schemas {
        let violations = validate_branch(value, subschema, context);
        if violations.is_empty() {
            matched += 1;
        } else {
            branch_violations.extend(violations);
        }
    }

    trace!(path = %context.instance_path, matched, "oneOf resolved");
    match matched {
        1 => {}
        0 => {
            context.violations.extend(branch_violations);
            context.add_violation(ViolationKind::OneOfFailed { matched });
        }
        // Several clean branches leave nothing to explain but the group itself
        _ => context.add_violation(ViolationKind::OneOfFailed { matched }),
    }
}

/// Validate allOf (all schemas must match)
fn validate_all_of(value: &Value, schema: &AllOfSchema, context: &mut ValidationContext) {
    for subschema in &schema.schemas {
        validate_generic(value, subschema, context);
    }
}

/// Validate if/then: `then` only counts when the predicate matches
fn validate_conditional(
    value: &Value,
    schema: &ConditionalSchema,
    context: &mut ValidationContext,
) {
    if !validate_branch(value, &schema.predicate, context).is_empty() {
        return;
    }

    let violations = validate_branch(value, &schema.then, context);
    trace!(
        path = %context.instance_path,
        violations = violations.len(),
        "conditional predicate held"
    );
    if !violations.is_empty() {
        context.violations.extend(violations);
        context.add_violation(ViolationKind::ConditionalThenFailed);
    }
}

fn validate_custom(value: &Value, schema: &CustomSchema, context: &mut ValidationContext) {
    if let Some(message) = (schema.check)(value) {
        context.add_violation(ViolationKind::Custom {
            keyword: schema.name.clone(),
            message,
        });
    }
}
