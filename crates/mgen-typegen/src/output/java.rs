//! Java class generation.
//!
//! Objects become classes with public fields; nested objects become
//! `public static` member classes. Serialization metadata is one annotation
//! per configured annotation name (`@JsonProperty("contentType")`).

use crate::error::GenerateError;
use crate::format::{BraceStyle, format_braces};
use crate::naming::{camel, doc_lines, escape_keyword, is_qualified_name, quote, type_name};
use crate::options::{LanguageOptions, string_field, string_list_field};
use crate::schema::{Properties, PropertyPath, Schema};
use crate::traits::Backend;
use crate::types::{TypeMap, TypeMapping, TypeTable};
use crate::walk::{GenerateConfig, Scope, Walker};
use serde_json::{Map, Value};

const LANGUAGE: &str = "java";

const JAVA_TYPE_MAPPINGS: &[TypeMapping] = &[
    TypeMapping::new("string", "String"),
    TypeMapping::new("int", "long"),
    TypeMapping::new("integer", "long"),
    TypeMapping::new("float", "double"),
    TypeMapping::new("bool", "boolean"),
    TypeMapping::new("boolean", "boolean"),
    TypeMapping::with_import("datetime", "OffsetDateTime", "java.time.OffsetDateTime"),
    TypeMapping::with_import("dateTime", "OffsetDateTime", "java.time.OffsetDateTime"),
    TypeMapping::new("bytes", "byte[]"),
    TypeMapping::with_import("uuid", "UUID", "java.util.UUID"),
];

/// Primitive types understood by the Java backend.
pub static JAVA_TYPES: TypeTable = TypeTable::new(JAVA_TYPE_MAPPINGS);

const KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try",
    "void", "volatile", "while", "true", "false", "null", "record", "var", "yield",
];

/// Options for Java code generation (`options.java`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaOptions {
    pub package: String,
    /// Class name override; `None` uses the schema title.
    pub class_name: Option<String>,
    /// Annotation names; each field gets `@Name("propertyName")` per entry.
    pub annotations: Vec<String>,
}

impl Default for JavaOptions {
    fn default() -> Self {
        Self {
            package: "model".into(),
            class_name: None,
            annotations: vec!["JsonProperty".into()],
        }
    }
}

impl LanguageOptions for JavaOptions {
    fn from_map(map: &Map<String, Value>) -> Self {
        let defaults = Self::default();
        Self {
            package: string_field(map, "package")
                .filter(|p| is_qualified_name(p, KEYWORDS))
                .unwrap_or(defaults.package),
            class_name: string_field(map, "className").or(defaults.class_name),
            annotations: string_list_field(map, "annotations").unwrap_or(defaults.annotations),
        }
    }
}

/// Java backend for the registry.
pub struct JavaBackend;

/// Static instance for registry.
pub static JAVA_BACKEND: JavaBackend = JavaBackend;

impl Backend for JavaBackend {
    fn name(&self) -> &'static str {
        LANGUAGE
    }

    fn language(&self) -> &'static str {
        "Java"
    }

    fn extension(&self) -> &'static str {
        "java"
    }

    fn types(&self) -> &'static dyn TypeMap {
        &JAVA_TYPES
    }

    fn generate(&self, schema: &Schema, config: &GenerateConfig) -> Result<String, GenerateError> {
        let options = JavaOptions::parse(schema.options_for(LANGUAGE));
        generate_java_types(schema, &options, config)
    }
}

/// Generate a Java class (or record, for a primitive root) from a schema.
pub fn generate_java_types(
    schema: &Schema,
    options: &JavaOptions,
    config: &GenerateConfig,
) -> Result<String, GenerateError> {
    let mut walker = Walker::new(LANGUAGE, &JAVA_TYPES, config);
    walker.check_schema(schema);

    let class = type_name(options.class_name.as_deref().unwrap_or(&schema.title));
    let root = PropertyPath::root();
    let mut body = String::new();
    if schema.ty.is_object() {
        let mut enclosing = Vec::new();
        write_class(
            &mut body,
            &mut walker,
            options,
            &format!("public class {}", class),
            &class,
            &schema.properties,
            &root,
            &mut enclosing,
        )?;
    } else {
        let ty = walker.primitive(&schema.ty, &root)?;
        body.push_str(&format!("public record {}({} value) {{}}\n", class, ty));
    }

    let mut out = String::new();
    out.push_str(&format!("package {};\n\n", options.package));
    let mut has_imports = false;
    for import in walker.imports() {
        out.push_str(&format!("import {};\n", import));
        has_imports = true;
    }
    if has_imports {
        out.push('\n');
    }

    let doc = doc_lines(&schema.description);
    if let Some((first, rest)) = doc.split_first() {
        let mut lines = vec![format!("{} {}", class, first)];
        lines.extend(rest.iter().map(|l| l.to_string()));
        javadoc(&mut out, &lines);
    }
    out.push_str(&body);

    format_braces(&out, &BraceStyle::JAVA).map_err(|e| walker.format_error(e))
}

#[allow(clippy::too_many_arguments)]
fn write_class(
    out: &mut String,
    walker: &mut Walker<'_>,
    options: &JavaOptions,
    header: &str,
    class: &str,
    properties: &Properties,
    path: &PropertyPath,
    enclosing: &mut Vec<String>,
) -> Result<(), GenerateError> {
    walker.enter(path)?;
    enclosing.push(class.to_string());
    out.push_str(&format!("{} {{\n", header));

    let mut fields = Scope::new();
    let mut member_types = Scope::new();
    let mut nested = String::new();
    for (i, (name, prop)) in properties.iter().enumerate() {
        let child = path.child(name);
        walker.check_property(prop, &child);
        let field = field_name(name);
        walker.claim(&mut fields, &field, &child)?;

        if i > 0 {
            out.push('\n');
        }
        let doc = doc_lines(&prop.description);
        javadoc(out, &doc);
        for annotation in &options.annotations {
            out.push_str(&format!(
                "@{}({})\n",
                annotation.trim_start_matches('@'),
                quote(name)
            ));
        }

        let ty = if prop.ty.is_object() {
            let nested_class = nested_class_name(&mut member_types, name, &child, options, enclosing);
            if !nested.is_empty() {
                nested.push('\n');
            }
            write_class(
                &mut nested,
                walker,
                options,
                &format!("public static class {}", nested_class),
                &nested_class,
                &prop.properties,
                &child,
                enclosing,
            )?;
            nested_class
        } else {
            walker.primitive(&prop.ty, &child)?.to_string()
        };
        out.push_str(&format!("public {} {};\n", ty, field));
    }

    if !nested.is_empty() {
        if !properties.is_empty() {
            out.push('\n');
        }
        out.push_str(&nested);
    }

    enclosing.pop();
    out.push_str("}\n");
    Ok(())
}

fn field_name(name: &str) -> String {
    escape_keyword(camel(name), KEYWORDS)
}

/// Member classes may not shadow an enclosing class, a sibling member class,
/// a mapped type or an annotation used in the same body.
fn nested_class_name(
    member_types: &mut Scope,
    name: &str,
    path: &PropertyPath,
    options: &JavaOptions,
    enclosing: &[String],
) -> String {
    member_types.fresh(type_name(name), path, |class| {
        enclosing.iter().any(|e| e == class)
            || JAVA_TYPE_MAPPINGS.iter().any(|m| m.target == class)
            || options
                .annotations
                .iter()
                .any(|a| a.trim_start_matches('@') == class)
    })
}

fn javadoc<S: AsRef<str>>(out: &mut String, lines: &[S]) {
    if lines.is_empty() {
        return;
    }
    out.push_str("/**\n");
    for line in lines {
        out.push_str(&format!(" * {}\n", line.as_ref().replace("*/", "*&#47;")));
    }
    out.push_str(" */\n");
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
            .with_property("size", Property::primitive("int"))
    }

    #[test]
    fn options_from_bag() {
        let bag = json!({ "package": "com.example", "className": "Picture", "annotations": ["JsonProperty", "SerializedName"] });
        let options = JavaOptions::parse(Some(&bag));
        assert_eq!(options.package, "com.example");
        assert_eq!(options.class_name.as_deref(), Some("Picture"));
        assert_eq!(options.annotations, ["JsonProperty", "SerializedName"]);

        let options = JavaOptions::parse(Some(&json!({ "className": 3 })));
        assert_eq!(options, JavaOptions::default());
    }

    #[test]
    fn photo_class() {
        let out = JAVA_BACKEND.generate(&photo(), &GenerateConfig::default()).unwrap();
        assert_eq!(
            out,
            "package model;\n\
             \n\
             /**\n \
             * Photo describes photo metadata\n \
             */\n\
             public class Photo {\n    \
             @JsonProperty(\"contentType\")\n    \
             public String contentType;\n\
             \n    \
             @JsonProperty(\"size\")\n    \
             public long size;\n\
             }\n"
        );
    }

    #[test]
    fn nested_static_class() {
        let schema = Schema::object("Photo").with_property(
            "meta",
            Property::object([
                ("width".to_string(), Property::primitive("int")),
                ("takenAt".to_string(), Property::primitive("datetime")),
            ]),
        );
        let out = JAVA_BACKEND.generate(&schema, &GenerateConfig::default()).unwrap();
        assert!(out.contains("import java.time.OffsetDateTime;\n"));
        assert!(out.contains("    public Meta meta;\n"));
        assert!(out.contains("    public static class Meta {\n"));
        assert!(out.contains("        @JsonProperty(\"takenAt\")\n        public OffsetDateTime takenAt;\n"));
    }

    #[test]
    fn class_name_override_and_annotations() {
        let schema = photo().with_options(
            "java",
            json!({ "className": "Picture", "annotations": ["@SerializedName"] }),
        );
        let out = JAVA_BACKEND.generate(&schema, &GenerateConfig::default()).unwrap();
        assert!(out.contains("public class Picture {"));
        assert!(out.contains(" * Picture describes photo metadata\n"));
        assert!(out.contains("    @SerializedName(\"size\")\n"));
        assert!(!out.contains("JsonProperty"));
    }

    #[test]
    fn keywords_and_shadowing() {
        let schema = Schema::object("Photo")
            .with_property("class", Property::primitive("string"))
            .with_property("photo", Property::object([]));
        let out = JAVA_BACKEND.generate(&schema, &GenerateConfig::default()).unwrap();
        assert!(out.contains("public String class_;"));
        assert!(out.contains("public PhotoType photo;"));
        assert!(out.contains("public static class PhotoType {"));
    }

    #[test]
    fn member_classes_do_not_shadow_field_types() {
        let schema = Schema::object("Doc")
            .with_property("name", Property::primitive("string"))
            .with_property("id", Property::primitive("uuid"))
            .with_property(
                "string",
                Property::object([("x".to_string(), Property::primitive("int"))]),
            )
            .with_property("uuid", Property::object([]))
            .with_property("jsonProperty", Property::object([]));
        let out = JAVA_BACKEND.generate(&schema, &GenerateConfig::default()).unwrap();
        assert!(out.contains("    public String name;\n"));
        assert!(out.contains("    public UUID id;\n"));
        assert!(out.contains("    public StringType string;\n"));
        assert!(out.contains("    public static class StringType {\n"));
        assert!(out.contains("    public static class UUIDType {\n"));
        assert!(out.contains("    public static class JsonPropertyType {\n"));
        assert!(!out.contains("class String {"));
    }

    #[test]
    fn sibling_member_classes_stay_distinct() {
        let schema = Schema::object("Doc")
            .with_property("meta", Property::object([]))
            .with_property("Meta", Property::object([]));
        let err = JAVA_BACKEND.generate(&schema, &GenerateConfig::default()).unwrap_err();
        // Both fields camel-case to `meta`.
        assert_eq!(err.to_string(), "java: properties 'meta' and 'Meta' both map to 'meta'");

        let schema = Schema::object("Doc")
            .with_property("string", Property::object([]))
            .with_property("stringType", Property::object([]));
        let out = JAVA_BACKEND.generate(&schema, &GenerateConfig::default()).unwrap();
        assert!(out.contains("public StringType string;"));
        assert!(out.contains("public StringTypeType stringType;"));
    }

    #[test]
    fn package_must_be_a_qualified_name() {
        for package in ["my-pkg", "com.new.media", "com..x"] {
            let options = JavaOptions::parse(Some(&json!({ "package": package })));
            assert_eq!(options.package, "model", "{package}");
        }
        let options = JavaOptions::parse(Some(&json!({ "package": "com.example.media" })));
        assert_eq!(options.package, "com.example.media");
    }

    #[test]
    fn primitive_root_is_record() {
        let schema = Schema {
            title: "UserId".into(),
            ty: "uuid".into(),
            ..Schema::default()
        };
        let out = JAVA_BACKEND.generate(&schema, &GenerateConfig::default()).unwrap();
        assert_eq!(
            out,
            "package model;\n\nimport java.util.UUID;\n\npublic record UserId(UUID value) {}\n"
        );
    }

    #[test]
    fn javadoc_terminator_escaped() {
        let mut out = String::new();
        javadoc(&mut out, &["ends */ here"]);
        assert_eq!(out, "/**\n * ends *&#47; here\n */\n");
    }
}
