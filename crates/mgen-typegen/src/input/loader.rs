//! JSON/YAML schema loader.
//!
//! Decoding is purely field-name driven. Semantic checks (unknown types,
//! nesting coherence) are left to the generators, which are the first
//! consumers that know which types they support.

use crate::schema::Schema;
use std::path::{Path, PathBuf};

/// Structured text encodings accepted as schema input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    Json,
    Yaml,
}

impl SchemaFormat {
    /// Pick a format from the file extension. Anything that is not YAML is
    /// treated as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => SchemaFormat::Yaml,
            _ => SchemaFormat::Json,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode JSON schema: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to decode YAML schema: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl LoadError {
    /// True when the input was read but is not a well-formed schema.
    pub fn is_decode(&self) -> bool {
        matches!(self, LoadError::Json(_) | LoadError::Yaml(_))
    }
}

/// Decode raw schema text.
pub fn parse_schema(data: &[u8], format: SchemaFormat) -> Result<Schema, LoadError> {
    let schema = match format {
        SchemaFormat::Json => serde_json::from_slice(data)?,
        SchemaFormat::Yaml => serde_yaml::from_slice(data)?,
    };
    Ok(schema)
}

/// Read and decode a schema file, choosing the format from its extension.
pub fn read_schema(path: &Path) -> Result<Schema, LoadError> {
    let data = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = data.len(), "read schema");
    parse_schema(&data, SchemaFormat::from_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PHOTO: &str = r#"{
        "title": "Photo",
        "description": "describes photo metadata",
        "type": "object",
        "properties": {
            "contentType": { "type": "string" },
            "content": { "type": "string" },
            "size": { "type": "int" }
        },
        "required": ["contentType", "content"],
        "options": {
            "go": { "package": "schema", "tags": ["json", "yaml"] }
        }
    }"#;

    #[test]
    fn parse_json() {
        let schema = parse_schema(PHOTO.as_bytes(), SchemaFormat::Json).unwrap();
        assert_eq!(schema.title, "Photo");
        assert_eq!(schema.description, "describes photo metadata");
        assert!(schema.ty.is_object());
        assert_eq!(schema.required, ["contentType", "content"]);
        assert_eq!(
            schema.options_for("go"),
            Some(&json!({ "package": "schema", "tags": ["json", "yaml"] }))
        );

        let names: Vec<_> = schema.properties.keys().map(String::as_str).collect();
        assert_eq!(names, ["contentType", "content", "size"]);
        assert_eq!(schema.properties["size"].ty.as_str(), "int");
    }

    #[test]
    fn parse_yaml() {
        let input = r#"
title: Photo
type: object
properties:
  meta:
    type: object
    description: nested metadata
    properties:
      width:
        type: int
options:
  go:
    package: schema
"#;
        let schema = parse_schema(input.as_bytes(), SchemaFormat::Yaml).unwrap();
        let meta = &schema.properties["meta"];
        assert!(meta.ty.is_object());
        assert_eq!(meta.description, "nested metadata");
        assert_eq!(meta.properties["width"].ty.as_str(), "int");
        assert_eq!(schema.options_for("go"), Some(&json!({ "package": "schema" })));
    }

    #[test]
    fn missing_and_null_fields_default() {
        let schema = parse_schema(
            br#"{ "title": "Empty", "properties": null, "options": null }"#,
            SchemaFormat::Json,
        )
        .unwrap();
        assert_eq!(schema.title, "Empty");
        assert!(schema.description.is_empty());
        assert!(schema.ty.as_str().is_empty());
        assert!(schema.properties.is_empty());
        assert!(schema.options.is_empty());
    }

    #[test]
    fn reject_malformed_text() {
        let err = parse_schema(b"{ \"title\": ", SchemaFormat::Json).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn reject_wrong_shape() {
        let err = parse_schema(
            br#"{ "title": "Bad", "type": "object", "properties": ["a", "b"] }"#,
            SchemaFormat::Json,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn unknown_types_are_not_rejected() {
        let schema = parse_schema(
            br#"{ "title": "Wallet", "type": "object", "properties": { "addr": { "type": "bitcoin-address" } } }"#,
            SchemaFormat::Json,
        )
        .unwrap();
        assert_eq!(schema.properties["addr"].ty.as_str(), "bitcoin-address");
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(SchemaFormat::from_path(Path::new("a.yaml")), SchemaFormat::Yaml);
        assert_eq!(SchemaFormat::from_path(Path::new("a.YML")), SchemaFormat::Yaml);
        assert_eq!(SchemaFormat::from_path(Path::new("a.json")), SchemaFormat::Json);
        assert_eq!(SchemaFormat::from_path(Path::new("schema")), SchemaFormat::Json);
    }

    #[test]
    fn read_missing_file() {
        let err = read_schema(Path::new("/nonexistent/mgen/schema.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(!err.is_decode());
    }

    #[test]
    fn read_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("photo.json");
        std::fs::write(&path, PHOTO).unwrap();
        let schema = read_schema(&path).unwrap();
        assert_eq!(schema.title, "Photo");
    }
}
