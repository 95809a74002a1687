//! The CMS site configuration schema
//!
//! Top level: `backend` and `collections` are required, and at least one of
//! `media_folder` / `media_library` must be present. Every collection needs a
//! `name` and `label` and is either a folder collection (`folder` + `fields`)
//! or a files collection (`files`), never both. When a collection names an
//! `identifier_field`, one of its `fields` must carry that name.

use once_cell::sync::Lazy;
use serde_json::Value;

use super::{ArraySchema, ObjectSchema, Schema};

static CONFIG_SCHEMA: Lazy<Schema> = Lazy::new(build_config_schema);

/// Process-wide configuration schema, built on first use
pub fn config_schema() -> &'static Schema {
    &CONFIG_SCHEMA
}

/// Build a fresh copy of the configuration schema
pub fn build_config_schema() -> Schema {
    let root = ObjectSchema::new()
        .property("backend", backend())
        .property("display_url", Schema::string())
        .property("site_url", Schema::string())
        .property("logo_url", Schema::string())
        .property("media_folder", Schema::string())
        .property("public_folder", Schema::string())
        .property("media_library", Schema::Any)
        .property(
            "publish_mode",
            Schema::enumeration(["simple", "editorial_workflow"]),
        )
        .property("slug", slug())
        .property("collections", ArraySchema::of(collection()).min_items(1))
        .require(["backend", "collections"]);

    Schema::all_of([
        root.into(),
        Schema::any_of([
            Schema::required(["media_folder"]),
            Schema::required(["media_library"]),
        ]),
    ])
}

fn backend() -> Schema {
    ObjectSchema::new()
        .property("name", Schema::string())
        .require(["name"])
        .into()
}

fn slug() -> Schema {
    ObjectSchema::new()
        .property("encoding", Schema::enumeration(["unicode", "ascii"]))
        .property("clean_accents", Schema::boolean())
        .into()
}

fn collection() -> Schema {
    let shape = ObjectSchema::new()
        .property("name", Schema::string())
        .property("label", Schema::string())
        .property("label_singular", Schema::string())
        .property("description", Schema::string())
        .property("folder", Schema::string())
        .property("files", ArraySchema::of(file_entry()))
        .property("identifier_field", Schema::string())
        .property("summary", Schema::string())
        .property("slug", Schema::string())
        .property("preview_path", Schema::string())
        .property("extension", Schema::string())
        .property(
            "format",
            Schema::enumeration([
                "yml",
                "yaml",
                "toml",
                "json",
                "frontmatter",
                "yaml-frontmatter",
                "toml-frontmatter",
                "json-frontmatter",
            ]),
        )
        .property("create", Schema::boolean())
        .property("delete", Schema::boolean())
        .property(
            "editor",
            ObjectSchema::new().property("preview", Schema::boolean()),
        )
        .property("fields", fields())
        .require(["name", "label"]);

    Schema::all_of([
        shape.into(),
        Schema::one_of([
            Schema::required(["files"]),
            Schema::required(["folder", "fields"]),
        ]),
        Schema::conditional(
            Schema::required(["identifier_field"]),
            Schema::custom("identifierField", identifier_field_exists),
        ),
    ])
}

fn file_entry() -> Schema {
    ObjectSchema::new()
        .property("name", Schema::string())
        .property("label", Schema::string())
        .property("label_singular", Schema::string())
        .property("description", Schema::string())
        .property("file", Schema::string())
        .property("fields", fields())
        .require(["name", "label", "file", "fields"])
        .into()
}

fn fields() -> ArraySchema {
    ArraySchema::of(
        ObjectSchema::new()
            .property("name", Schema::string())
            .property("label", Schema::string())
            .property("widget", Schema::string())
            .property("hint", Schema::string())
            .property("required", Schema::boolean())
            .require(["name"]),
    )
}

/// Checks that a collection's `identifier_field` names one of its `fields`.
///
/// Passes when the fragment has no string `identifier_field`; the default
/// identifiers are resolved elsewhere.
pub fn identifier_field_exists(collection: &Value) -> Option<String> {
    let identifier = collection.get("identifier_field")?.as_str()?;

    let declared = collection
        .get("fields")
        .and_then(Value::as_array)
        .is_some_and(|fields| {
            fields
                .iter()
                .any(|field| field.get("name").and_then(Value::as_str) == Some(identifier))
        });

    if declared {
        None
    } else {
        Some(format!("must have a field named \"{}\"", identifier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_schema_is_built_once() {
        assert!(std::ptr::eq(config_schema(), config_schema()));
    }

    #[test]
    fn test_root_is_all_of_object_and_media_alternatives() {
        match build_config_schema() {
            Schema::AllOf(all) => {
                assert_eq!(all.schemas.len(), 2);
                match &all.schemas[0] {
                    Schema::Object(obj) => {
                        assert_eq!(obj.required, vec!["backend", "collections"]);
                        assert!(obj.properties.contains_key("media_folder"));
                    }
                    other => panic!("Expected Object schema, got {}", other.kind_name()),
                }
                assert!(matches!(&all.schemas[1], Schema::AnyOf(any) if any.schemas.len() == 2));
            }
            other => panic!("Expected AllOf schema, got {}", other.kind_name()),
        }
    }

    #[test]
    fn test_identifier_field_present_in_fields() {
        let collection = json!({
            "identifier_field": "baz",
            "fields": [{"name": "title"}, {"name": "baz"}],
        });
        assert_eq!(identifier_field_exists(&collection), None);
    }

    #[test]
    fn test_identifier_field_missing_from_fields() {
        let collection = json!({
            "identifier_field": "baz",
            "fields": [{"name": "title"}],
        });
        assert_eq!(
            identifier_field_exists(&collection).as_deref(),
            Some("must have a field named \"baz\"")
        );
    }

    #[test]
    fn test_identifier_field_without_fields_fails() {
        let collection = json!({"identifier_field": "title", "files": []});
        assert!(identifier_field_exists(&collection).is_some());
    }

    #[test]
    fn test_identifier_field_absent_or_not_a_string_passes() {
        assert_eq!(identifier_field_exists(&json!({"fields": []})), None);
        assert_eq!(identifier_field_exists(&json!({"identifier_field": 3})), None);
        assert_eq!(identifier_field_exists(&json!(null)), None);
    }
}
