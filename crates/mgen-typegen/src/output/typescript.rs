//! TypeScript interface generation.
//!
//! Property names are kept verbatim (quoted when they are not identifiers),
//! so the declared shape is the wire shape and no tag metadata is needed.

use crate::error::GenerateError;
use crate::format::{BraceStyle, format_braces};
use crate::naming::{doc_lines, is_qualified_name, quote, type_name};
use crate::options::{LanguageOptions, bool_field, string_field};
use crate::schema::{Properties, PropertyPath, Schema, TypeName};
use crate::traits::Backend;
use crate::types::{TypeMap, TypeMapping, TypeTable};
use crate::walk::{GenerateConfig, Walker};
use serde_json::{Map, Value};

const LANGUAGE: &str = "typescript";

const TYPESCRIPT_TYPE_MAPPINGS: &[TypeMapping] = &[
    TypeMapping::new("string", "string"),
    TypeMapping::new("int", "number"),
    TypeMapping::new("integer", "number"),
    TypeMapping::new("float", "number"),
    TypeMapping::new("bool", "boolean"),
    TypeMapping::new("boolean", "boolean"),
    TypeMapping::new("datetime", "string"),
    TypeMapping::new("dateTime", "string"),
    TypeMapping::new("uuid", "string"),
];

/// Primitive types understood by the TypeScript backend.
pub static TYPESCRIPT_TYPES: TypeTable = TypeTable::new(TYPESCRIPT_TYPE_MAPPINGS);

/// Reserved words that cannot name a namespace.
const RESERVED: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
    "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if",
    "import", "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw",
    "true", "try", "typeof", "var", "void", "while", "with",
];

/// Options for TypeScript code generation (`options.typescript`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeScriptOptions {
    /// Wrap the declaration in `namespace X { ... }`.
    pub namespace: Option<String>,
    /// Emit `export` on declarations.
    pub export: bool,
    /// Mark every field `readonly`.
    pub readonly: bool,
}

impl Default for TypeScriptOptions {
    fn default() -> Self {
        Self {
            namespace: None,
            export: true,
            readonly: false,
        }
    }
}

impl LanguageOptions for TypeScriptOptions {
    fn from_map(map: &Map<String, Value>) -> Self {
        let defaults = Self::default();
        Self {
            namespace: string_field(map, "namespace")
                .filter(|n| is_qualified_name(n, RESERVED))
                .or(defaults.namespace),
            export: bool_field(map, "export").unwrap_or(defaults.export),
            readonly: bool_field(map, "readonly").unwrap_or(defaults.readonly),
        }
    }
}

/// TypeScript backend for the registry.
pub struct TypeScriptBackend;

/// Static instance for registry.
pub static TYPESCRIPT_BACKEND: TypeScriptBackend = TypeScriptBackend;

impl Backend for TypeScriptBackend {
    fn name(&self) -> &'static str {
        LANGUAGE
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["ts"]
    }

    fn language(&self) -> &'static str {
        "TypeScript"
    }

    fn extension(&self) -> &'static str {
        "ts"
    }

    fn types(&self) -> &'static dyn TypeMap {
        &TYPESCRIPT_TYPES
    }

    fn generate(&self, schema: &Schema, config: &GenerateConfig) -> Result<String, GenerateError> {
        let options = TypeScriptOptions::parse(schema.options_for(LANGUAGE));
        generate_typescript_types(schema, &options, config)
    }
}

/// Generate a TypeScript interface (or type alias, for a primitive root).
pub fn generate_typescript_types(
    schema: &Schema,
    options: &TypeScriptOptions,
    config: &GenerateConfig,
) -> Result<String, GenerateError> {
    let mut walker = Walker::new(LANGUAGE, &TYPESCRIPT_TYPES, config);
    walker.check_schema(schema);

    let name = type_name(&schema.title);
    let export = if options.export { "export " } else { "" };
    let mut out = String::new();

    if let Some(namespace) = &options.namespace {
        out.push_str(&format!("{}namespace {} {{\n", export, namespace));
    }

    let doc = doc_lines(&schema.description);
    if let Some((first, rest)) = doc.split_first() {
        let mut lines = vec![format!("{} {}", name, first)];
        lines.extend(rest.iter().map(|l| l.to_string()));
        jsdoc(&mut out, &lines);
    }

    let root = PropertyPath::root();
    if schema.ty.is_object() {
        let body = object_body(&mut walker, options, &schema.properties, Some(&schema.required), &root)?;
        out.push_str(&format!("{}interface {} {}\n", export, name, body));
    } else {
        let ty = walker.primitive(&schema.ty, &root)?;
        out.push_str(&format!("{}type {} = {};\n", export, name, ty));
    }

    if options.namespace.is_some() {
        out.push_str("}\n");
    }

    format_braces(&out, &BraceStyle::TYPESCRIPT).map_err(|e| walker.format_error(e))
}

fn field_type(
    walker: &mut Walker<'_>,
    options: &TypeScriptOptions,
    ty: &TypeName,
    properties: &Properties,
    path: &PropertyPath,
) -> Result<String, GenerateError> {
    if ty.is_object() {
        object_body(walker, options, properties, None, path)
    } else {
        walker.primitive(ty, path).map(String::from)
    }
}

/// `{ ... }` object type. `required` is `None` below the root, where every
/// field is required.
fn object_body(
    walker: &mut Walker<'_>,
    options: &TypeScriptOptions,
    properties: &Properties,
    required: Option<&[String]>,
    path: &PropertyPath,
) -> Result<String, GenerateError> {
    walker.enter(path)?;
    if properties.is_empty() {
        return Ok("{}".into());
    }

    let mut block = String::from("{\n");
    for (name, prop) in properties {
        let child = path.child(name);
        walker.check_property(prop, &child);

        jsdoc(&mut block, &doc_lines(&prop.description));
        let ty = field_type(walker, options, &prop.ty, &prop.properties, &child)?;
        let optional = required.is_some_and(|r| !r.iter().any(|n| n == name));
        block.push_str(&format!(
            "{}{}{}: {};\n",
            if options.readonly { "readonly " } else { "" },
            property_key(name),
            if optional { "?" } else { "" },
            ty
        ));
    }
    block.push('}');
    Ok(block)
}

/// Identifier names as-is; anything else as a string literal key.
fn property_key(name: &str) -> String {
    let mut chars = name.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if valid { name.to_string() } else { quote(name) }
}

fn jsdoc<S: AsRef<str>>(out: &mut String, lines: &[S]) {
    match lines {
        [] => {}
        [single] => out.push_str(&format!("/** {} */\n", escape_comment(single.as_ref()))),
        many => {
            out.push_str("/**\n");
            for line in many {
                out.push_str(&format!(" * {}\n", escape_comment(line.as_ref())));
            }
            out.push_str(" */\n");
        }
    }
}

fn escape_comment(line: &str) -> String {
    line.replace("*/", "*\\/")
}
