//! Schema type definitions
//!
//! Each struct is the payload of one `Schema` variant. The object, array and
//! composition types carry small builder methods so the configuration schema
//! can be assembled as a single expression.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::Schema;

/// A cross-field rule.
///
/// Receives the fragment the `Custom` node is attached to and returns the
/// failure message, if any. The fragment is usually the mapping that holds
/// every sibling the rule needs to look at.
pub type CustomCheck = Arc<dyn Fn(&Value) -> Option<String> + Send + Sync>;

/// Runtime kind expected of a scalar
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarKind {
    String,
    Boolean,
    /// The value must equal one of these
    Enum(Vec<Value>),
}

impl ScalarKind {
    /// Name used in `should be <kind>` messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Enum(_) => "enum",
        }
    }
}

/// Scalar schema (string, boolean or enumeration)
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarSchema {
    pub kind: ScalarKind,
}

/// Object type schema. Properties without a schema are allowed and ignored.
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    pub properties: HashMap<String, Schema>,
    pub required: Vec<String>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property(mut self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        self.properties.insert(name.into(), schema.into());
        self
    }

    pub fn require<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required.extend(names.into_iter().map(Into::into));
        self
    }
}

/// Key-presence constraint with no type constraint: non-mappings pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredSchema {
    pub required: Vec<String>,
}

/// Array type schema
#[derive(Debug, Clone, Default)]
pub struct ArraySchema {
    pub items: Option<Box<Schema>>,
    pub min_items: Option<usize>,
}

impl ArraySchema {
    pub fn of(items: impl Into<Schema>) -> Self {
        Self {
            items: Some(Box::new(items.into())),
            min_items: None,
        }
    }

    pub fn min_items(mut self, min: usize) -> Self {
        self.min_items = Some(min);
        self
    }
}

/// AnyOf schema (validates if any subschema matches)
#[derive(Debug, Clone)]
pub struct AnyOfSchema {
    pub schemas: Vec<Schema>,
}

/// OneOf schema (validates if exactly one subschema matches)
#[derive(Debug, Clone)]
pub struct OneOfSchema {
    pub schemas: Vec<Schema>,
}

/// AllOf schema (validates if all subschemas match)
#[derive(Debug, Clone)]
pub struct AllOfSchema {
    pub schemas: Vec<Schema>,
}

/// `then` applies only when `predicate` matches the same fragment
#[derive(Debug, Clone)]
pub struct ConditionalSchema {
    pub predicate: Box<Schema>,
    pub then: Box<Schema>,
}

/// Named cross-field rule
#[derive(Clone)]
pub struct CustomSchema {
    /// Keyword reported for failures of this rule
    pub name: String,
    pub check: CustomCheck,
}

impl fmt::Debug for CustomSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomSchema")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
