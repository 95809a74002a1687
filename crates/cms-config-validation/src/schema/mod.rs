//! Schema model
//!
//! A closed set of node kinds describing the expected shape of a document.
//! Schemas are plain immutable data: they are `Send + Sync` and can be shared
//! by any number of concurrent validations.

mod config;
mod types;

pub use config::{build_config_schema, config_schema, identifier_field_exists};
pub use types::{
    AllOfSchema, AnyOfSchema, ArraySchema, ConditionalSchema, CustomCheck, CustomSchema,
    ObjectSchema, OneOfSchema, RequiredSchema, ScalarKind, ScalarSchema,
};

use serde_json::Value;
use std::sync::Arc;

/// A schema node
#[derive(Debug, Clone)]
pub enum Schema {
    /// Accepts every value
    Any,
    Scalar(ScalarSchema),
    Object(ObjectSchema),
    Required(RequiredSchema),
    Array(ArraySchema),
    AnyOf(AnyOfSchema),
    OneOf(OneOfSchema),
    AllOf(AllOfSchema),
    Conditional(ConditionalSchema),
    Custom(CustomSchema),
}

impl Schema {
    pub fn string() -> Self {
        Schema::Scalar(ScalarSchema {
            kind: ScalarKind::String,
        })
    }

    pub fn boolean() -> Self {
        Schema::Scalar(ScalarSchema {
            kind: ScalarKind::Boolean,
        })
    }

    /// String enumeration
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Schema::Scalar(ScalarSchema {
            kind: ScalarKind::Enum(
                values
                    .into_iter()
                    .map(|v| Value::String(v.into()))
                    .collect(),
            ),
        })
    }

    pub fn required<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Schema::Required(RequiredSchema {
            required: names.into_iter().map(Into::into).collect(),
        })
    }

    pub fn any_of(schemas: impl IntoIterator<Item = Schema>) -> Self {
        Schema::AnyOf(AnyOfSchema {
            schemas: schemas.into_iter().collect(),
        })
    }

    pub fn one_of(schemas: impl IntoIterator<Item = Schema>) -> Self {
        Schema::OneOf(OneOfSchema {
            schemas: schemas.into_iter().collect(),
        })
    }

    pub fn all_of(schemas: impl IntoIterator<Item = Schema>) -> Self {
        Schema::AllOf(AllOfSchema {
            schemas: schemas.into_iter().collect(),
        })
    }

    pub fn conditional(predicate: impl Into<Schema>, then: impl Into<Schema>) -> Self {
        Schema::Conditional(ConditionalSchema {
            predicate: Box::new(predicate.into()),
            then: Box::new(then.into()),
        })
    }

    pub fn custom<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Value) -> Option<String> + Send + Sync + 'static,
    {
        Schema::Custom(CustomSchema {
            name: name.into(),
            check: Arc::new(check),
        })
    }

    /// Short name of the node kind, used in trace output
    pub fn kind_name(&self) -> &'static str {
        match self {
            Schema::Any => "any",
            Schema::Scalar(s) => s.kind.type_name(),
            Schema::Object(_) => "object",
            Schema::Required(_) => "required",
            Schema::Array(_) => "array",
            Schema::AnyOf(_) => "anyOf",
            Schema::OneOf(_) => "oneOf",
            Schema::AllOf(_) => "allOf",
            Schema::Conditional(_) => "conditional",
            Schema::Custom(_) => "custom",
        }
    }
}

impl From<ObjectSchema> for Schema {
    fn from(schema: ObjectSchema) -> Self {
        Schema::Object(schema)
    }
}

impl From<ArraySchema> for Schema {
    fn from(schema: ArraySchema) -> Self {
        Schema::Array(schema)
    }
}

impl From<ScalarSchema> for Schema {
    fn from(schema: ScalarSchema) -> Self {
        Schema::Scalar(schema)
    }
}
