//! Go struct generation.
//!
//! Nested objects become anonymous structs. Every field carries one struct tag
//! clause per configured tag key, bound to the schema's property name.

use crate::error::GenerateError;
use crate::format::format_go;
use crate::naming::{doc_lines, exported, is_identifier, quote, type_name};
use crate::options::{LanguageOptions, string_field, string_list_field};
use crate::schema::{Properties, PropertyPath, Schema, TypeName};
use crate::traits::Backend;
use crate::types::{TypeMap, TypeMapping, TypeTable};
use crate::walk::{GenerateConfig, Scope, Walker};
use serde_json::{Map, Value};

const LANGUAGE: &str = "go";

const GO_TYPE_MAPPINGS: &[TypeMapping] = &[
    TypeMapping::new("string", "string"),
    TypeMapping::new("int", "int"),
    TypeMapping::new("integer", "int"),
    TypeMapping::new("float", "float64"),
    TypeMapping::new("bool", "bool"),
    TypeMapping::new("boolean", "bool"),
    TypeMapping::with_import("datetime", "time.Time", "time"),
    TypeMapping::with_import("dateTime", "time.Time", "time"),
    TypeMapping::new("bytes", "[]byte"),
];

/// Primitive types understood by the Go backend.
pub static GO_TYPES: TypeTable = TypeTable::new(GO_TYPE_MAPPINGS);

const KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var", "_",
];

/// Options for Go code generation (`options.go`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoOptions {
    /// Package clause of the generated file.
    pub package: String,
    /// Struct tag keys; each field gets `key:"propertyName"` per entry.
    pub tags: Vec<String>,
}

impl Default for GoOptions {
    fn default() -> Self {
        Self {
            package: "main".into(),
            tags: vec!["json".into()],
        }
    }
}

impl GoOptions {
    pub fn with_package(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Default::default()
        }
    }
}

impl LanguageOptions for GoOptions {
    fn from_map(map: &Map<String, Value>) -> Self {
        let defaults = Self::default();
        Self {
            package: string_field(map, "package")
                .filter(|p| is_package_name(p))
                .unwrap_or(defaults.package),
            tags: string_list_field(map, "tags").unwrap_or(defaults.tags),
        }
    }
}

fn is_package_name(name: &str) -> bool {
    is_identifier(name) && !KEYWORDS.contains(&name)
}

/// Go backend for the registry.
pub struct GoBackend;

/// Static instance for registry.
pub static GO_BACKEND: GoBackend = GoBackend;

impl Backend for GoBackend {
    fn name(&self) -> &'static str {
        LANGUAGE
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["golang"]
    }

    fn language(&self) -> &'static str {
        "Go"
    }

    fn extension(&self) -> &'static str {
        "go"
    }

    fn types(&self) -> &'static dyn TypeMap {
        &GO_TYPES
    }

    fn generate(&self, schema: &Schema, config: &GenerateConfig) -> Result<String, GenerateError> {
        let options = GoOptions::parse(schema.options_for(LANGUAGE));
        generate_go_types(schema, &options, config)
    }
}

/// Generate a Go type declaration from a schema.
pub fn generate_go_types(
    schema: &Schema,
    options: &GoOptions,
    config: &GenerateConfig,
) -> Result<String, GenerateError> {
    let mut walker = Walker::new(LANGUAGE, &GO_TYPES, config);
    walker.check_schema(schema);

    let body = type_body(
        &mut walker,
        options,
        &schema.ty,
        &schema.properties,
        &PropertyPath::root(),
    )?;

    let name = type_name(&schema.title);
    let mut out = String::new();
    out.push_str(&format!("package {}\n\n", options.package));

    let imports: Vec<_> = walker.imports().collect();
    match imports.as_slice() {
        [] => {}
        [single] => out.push_str(&format!("import {}\n\n", quote(single))),
        many => {
            out.push_str("import (\n");
            for import in many {
                out.push_str(&format!("{}\n", quote(import)));
            }
            out.push_str(")\n\n");
        }
    }

    let doc = doc_lines(&schema.description);
    if let Some((first, rest)) = doc.split_first() {
        out.push_str(&format!("// {} {}\n", name, first));
        for line in rest {
            out.push_str(&format!("// {}\n", line));
        }
    }
    out.push_str(&format!("type {} {}\n", name, body));

    format_go(&out).map_err(|e| walker.format_error(e))
}

fn type_body(
    walker: &mut Walker<'_>,
    options: &GoOptions,
    ty: &TypeName,
    properties: &Properties,
    path: &PropertyPath,
) -> Result<String, GenerateError> {
    if !ty.is_object() {
        return walker.primitive(ty, path).map(String::from);
    }

    walker.enter(path)?;
    if properties.is_empty() {
        return Ok("struct{}".into());
    }

    let mut fields = Scope::new();
    let mut block = String::from("struct {\n");
    for (name, prop) in properties {
        let child = path.child(name);
        walker.check_property(prop, &child);
        let field = exported(name);
        walker.claim(&mut fields, &field, &child)?;

        for line in doc_lines(&prop.description) {
            block.push_str(&format!("// {}\n", line));
        }
        let field_type = type_body(walker, options, &prop.ty, &prop.properties, &child)?;
        block.push_str(&format!(
            "{} {}{}\n",
            field,
            field_type,
            struct_tags(name, &options.tags)
        ));
    }
    block.push('}');
    Ok(block)
}

/// `` `json:"name" yaml:"name"` `` for the configured tag keys; empty when
/// there are none.
fn struct_tags(name: &str, tags: &[String]) -> String {
    if tags.is_empty() {
        return String::new();
    }
    let value = quote(name);
    let clauses: Vec<String> = tags.iter().map(|tag| format!("{}:{}", tag, value)).collect();
    format!(" `{}`", clauses.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Property;
    use serde_json::json;

    fn photo() -> Schema {
        Schema::object("Photo")
            .with_description("describes photo metadata")
            .with_property("contentType", Property::primitive("string"))
            .with_property("content", Property::primitive("string"))
            .with_property("size", Property::primitive("int"))
            .with_required("contentType")
            .with_required("content")
    }

    #[test]
    fn options_from_bag() {
        let bag = json!({ "package": "schema", "tags": ["json", "yaml"] });
        assert_eq!(
            GoOptions::parse(Some(&bag)),
            GoOptions {
                package: "schema".into(),
                tags: vec!["json".into(), "yaml".into()],
            }
        );
    }

    #[test]
    fn options_degrade_per_field() {
        let bag = json!({ "package": "schema", "tags": [1, 2] });
        let options = GoOptions::parse(Some(&bag));
        assert_eq!(options.package, "schema");
        assert_eq!(options.tags, ["json"]);

        let bag = json!({ "package": ["schema"], "tags": ["yaml"] });
        let options = GoOptions::parse(Some(&bag));
        assert_eq!(options.package, "main");
        assert_eq!(options.tags, ["yaml"]);
    }

    #[test]
    fn package_must_be_an_identifier() {
        for package in ["my-pkg", "func", "_", "a.b"] {
            let options = GoOptions::parse(Some(&json!({ "package": package })));
            assert_eq!(options.package, "main", "{package}");
        }
        let options = GoOptions::parse(Some(&json!({ "package": "media_v2" })));
        assert_eq!(options.package, "media_v2");

        let schema = Schema::object("Doc").with_options("go", json!({ "package": "my-pkg" }));
        let out = GO_BACKEND.generate(&schema, &GenerateConfig::default()).unwrap();
        assert_eq!(out, "package main\n\ntype Doc struct{}\n");
    }

    #[test]
    fn recased_duplicates_fail() {
        let schema = Schema::object("Photo")
            .with_property("content-type", Property::primitive("string"))
            .with_property("contentType", Property::primitive("string"));
        let err = GO_BACKEND.generate(&schema, &GenerateConfig::default()).unwrap_err();
        assert!(matches!(err, GenerateError::NameCollision { .. }));
        assert_eq!(
            err.to_string(),
            "go: properties 'content-type' and 'contentType' both map to 'ContentType'"
        );

        // The same names in different structs are fine.
        let schema = Schema::object("Photo")
            .with_property("contentType", Property::primitive("string"))
            .with_property(
                "meta",
                Property::object([("contentType".to_string(), Property::primitive("string"))]),
            );
        assert!(GO_BACKEND.generate(&schema, &GenerateConfig::default()).is_ok());
    }

    #[test]
    fn photo_with_two_tags() {
        let schema = photo().with_options("go", json!({ "package": "schema", "tags": ["json", "yaml"] }));
        let out = GO_BACKEND.generate(&schema, &GenerateConfig::default()).unwrap();
        assert_eq!(
            out,
            "package schema\n\
             \n\
             // Photo describes photo metadata\n\
             type Photo struct {\n\
             \tContentType string `json:\"contentType\" yaml:\"contentType\"`\n\
             \tContent     string `json:\"content\" yaml:\"content\"`\n\
             \tSize        int    `json:\"size\" yaml:\"size\"`\n\
             }\n"
        );
    }

    #[test]
    fn defaults_without_options() {
        let out = GO_BACKEND.generate(&photo(), &GenerateConfig::default()).unwrap();
        assert!(out.starts_with("package main\n"));
        assert!(out.contains("\tSize        int    `json:\"size\"`\n"));
        assert!(!out.contains("yaml"));
    }

    #[test]
    fn no_comment_without_description() {
        let schema = Schema::object("Bare").with_property("id", Property::primitive("string"));
        let out = GO_BACKEND.generate(&schema, &GenerateConfig::default()).unwrap();
        assert!(!out.contains("//"));
        assert_eq!(
            out,
            "package main\n\ntype Bare struct {\n\tId string `json:\"id\"`\n}\n"
        );
    }

    #[test]
    fn empty_tags_omit_tag_clause() {
        let schema = photo().with_options("go", json!({ "tags": [] }));
        let out = GO_BACKEND.generate(&schema, &GenerateConfig::default()).unwrap();
        assert!(!out.contains('`'));
        assert!(out.contains("\tContentType string\n"));
    }

    #[test]
    fn empty_object_and_primitive_root() {
        let empty = Schema::object("Empty");
        let out = GO_BACKEND.generate(&empty, &GenerateConfig::default()).unwrap();
        assert_eq!(out, "package main\n\ntype Empty struct{}\n");

        let alias = Schema {
            title: "UserId".into(),
            ty: "string".into(),
            ..Schema::default()
        };
        let out = GO_BACKEND.generate(&alias, &GenerateConfig::default()).unwrap();
        assert_eq!(out, "package main\n\ntype UserId string\n");
    }

    #[test]
    fn datetime_adds_import() {
        let schema = Schema::object("Event").with_property("at", Property::primitive("datetime"));
        let out = GO_BACKEND.generate(&schema, &GenerateConfig::default()).unwrap();
        assert_eq!(
            out,
            "package main\n\nimport \"time\"\n\ntype Event struct {\n\tAt time.Time `json:\"at\"`\n}\n"
        );
    }

    #[test]
    fn unsupported_type_names_type() {
        let schema = Schema::object("Wallet").with_property("addr", Property::primitive("bitcoin-address"));
        let err = GO_BACKEND.generate(&schema, &GenerateConfig::default()).unwrap_err();
        match err {
            GenerateError::UnsupportedType { type_name, path, .. } => {
                assert_eq!(type_name.as_str(), "bitcoin-address");
                assert_eq!(path.to_string(), "addr");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn tag_values_are_escaped() {
        assert_eq!(struct_tags("a\"b", &["json".into()]), " `json:\"a\\\"b\"`");
    }
}
