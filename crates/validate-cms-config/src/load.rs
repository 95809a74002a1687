//! Loading site configuration files into documents.
//!
//! YAML is read with yaml-rust2 (YAML 1.2) and converted to the
//! `serde_json::Value` tree the validator works on.

use anyhow::{Context, Result, bail};
use serde_json::{Map, Number, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use yaml_rust2::{Yaml, YamlLoader};

/// Source syntax of a configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Yaml,
    Json,
}

impl SourceFormat {
    /// Infer the syntax from the file extension; anything but `.json` is YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SourceFormat::Json,
            _ => SourceFormat::Yaml,
        }
    }
}

/// Read and parse a configuration file
pub fn load_document(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let format = SourceFormat::from_path(path);
    debug!(path = %path.display(), ?format, "parsing config file");

    parse_document(&content, format)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse configuration source text
pub fn parse_document(content: &str, format: SourceFormat) -> Result<Value> {
    match format {
        SourceFormat::Json => Ok(serde_json::from_str(content)?),
        SourceFormat::Yaml => {
            let mut documents = YamlLoader::load_from_str(content)?;
            if documents.len() > 1 {
                warn!(
                    documents = documents.len(),
                    "multiple YAML documents found; validating the first"
                );
            }
            if documents.is_empty() {
                return Ok(Value::Null);
            }
            yaml_to_json_value(&documents.swap_remove(0))
        }
    }
}

/// Convert YAML value to JSON value.
///
/// Anything JSON cannot represent is an error rather than being dropped:
/// non-scalar or null mapping keys, non-finite reals, unresolved nodes.
fn yaml_to_json_value(value: &Yaml) -> Result<Value> {
    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Boolean(b) => Value::Bool(*b),
        Yaml::Integer(n) => Value::Number((*n).into()),
        Yaml::Real(s) => {
            let number = s.parse::<f64>().ok().and_then(Number::from_f64);
            match number {
                Some(number) => Value::Number(number),
                None => bail!("Unsupported real number '{}': not representable in JSON", s),
            }
        }
        Yaml::String(s) => Value::String(s.clone()),
        Yaml::Array(items) => Value::Array(
            items
                .iter()
                .map(yaml_to_json_value)
                .collect::<Result<Vec<_>>>()?,
        ),
        Yaml::Hash(entries) => {
            let mut map = Map::new();
            for (key, value) in entries {
                let key = yaml_key(key)?;
                let value = yaml_to_json_value(value)
                    .with_context(|| format!("In mapping key '{}'", key))?;
                map.insert(key, value);
            }
            Value::Object(map)
        }
        Yaml::Alias(_) | Yaml::BadValue => bail!("Unsupported YAML node: {:?}", value),
    })
}

/// Scalar mapping keys become strings
fn yaml_key(key: &Yaml) -> Result<String> {
    match key {
        Yaml::String(s) | Yaml::Real(s) => Ok(s.clone()),
        Yaml::Integer(n) => Ok(n.to_string()),
        Yaml::Boolean(b) => Ok(b.to_string()),
        other => bail!("Unsupported mapping key: {:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            SourceFormat::from_path(&PathBuf::from("config.json")),
            SourceFormat::Json
        );
        assert_eq!(
            SourceFormat::from_path(&PathBuf::from("admin/config.yml")),
            SourceFormat::Yaml
        );
        assert_eq!(
            SourceFormat::from_path(&PathBuf::from("config")),
            SourceFormat::Yaml
        );
    }

    #[test]
    fn test_parse_yaml_config() {
        let content = r#"
backend:
  name: git-gateway
media_folder: static/img
collections:
  - name: posts
    label: Posts
    folder: content/posts
    create: true
    fields:
      - { name: title, label: Title }
"#;
        let document = parse_document(content, SourceFormat::Yaml).unwrap();
        assert_eq!(
            document,
            json!({
                "backend": {"name": "git-gateway"},
                "media_folder": "static/img",
                "collections": [{
                    "name": "posts",
                    "label": "Posts",
                    "folder": "content/posts",
                    "create": true,
                    "fields": [{"name": "title", "label": "Title"}],
                }],
            })
        );
    }

    #[test]
    fn test_yaml_scalars() {
        let document = parse_document("a: 1\nb: 2.5\nc: ~\n3: x\n", SourceFormat::Yaml).unwrap();
        assert_eq!(document, json!({"a": 1, "b": 2.5, "c": null, "3": "x"}));
    }

    #[test]
    fn test_empty_yaml_is_null() {
        assert_eq!(parse_document("", SourceFormat::Yaml).unwrap(), Value::Null);
    }

    #[test]
    fn test_first_yaml_document_wins() {
        let document = parse_document("a: 1\n---\nb: 2\n", SourceFormat::Yaml).unwrap();
        assert_eq!(document, json!({"a": 1}));
    }

    #[test]
    fn test_invalid_sources_are_errors() {
        assert!(parse_document("{", SourceFormat::Json).is_err());
        assert!(parse_document("a: [1, 2", SourceFormat::Yaml).is_err());
    }

    #[test]
    fn test_unrepresentable_keys_are_errors() {
        let content = "~: a\nmedia_folder: static\n";
        let error = parse_document(content, SourceFormat::Yaml).unwrap_err();
        assert!(error.to_string().contains("Unsupported mapping key"));

        let error = parse_document("? [x]\n: b\n", SourceFormat::Yaml).unwrap_err();
        assert!(error.to_string().contains("Unsupported mapping key"));
    }

    #[test]
    fn test_non_finite_reals_are_errors() {
        let error = parse_document("media_folder: .inf\n", SourceFormat::Yaml).unwrap_err();
        let message = format!("{:#}", error);
        assert!(message.contains("media_folder"), "{message}");
        assert!(message.contains(".inf"), "{message}");

        assert!(parse_document("slug:\n  x: .nan\n", SourceFormat::Yaml).is_err());
    }

    #[test]
    fn test_load_document_from_file() {
        let file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .unwrap();
        fs::write(file.path(), r#"{"backend": {"name": "test-repo"}}"#).unwrap();

        let document = load_document(file.path()).unwrap();
        assert_eq!(document, json!({"backend": {"name": "test-repo"}}));
    }

    #[test]
    fn test_missing_file_mentions_path() {
        let error = load_document(Path::new("/nonexistent/config.yml")).unwrap_err();
        assert!(format!("{:#}", error).contains("/nonexistent/config.yml"));
    }
}
