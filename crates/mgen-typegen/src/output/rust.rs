//! Rust struct generation.
//!
//! Nested objects are hoisted into their own structs named after the path
//! (`Photo.meta` -> `PhotoMeta`). Output is parsed with `syn` and printed
//! with `prettyplease`, so malformed generated code surfaces as a format
//! error instead of reaching the caller.

use crate::error::GenerateError;
use crate::format::FormatError;
use crate::naming::{doc_lines, is_identifier, quote, snake, type_name};
use crate::options::{LanguageOptions, string_field, string_list_field};
use crate::schema::{Properties, PropertyPath, Schema};
use crate::traits::Backend;
use crate::types::{TypeMap, TypeMapping, TypeTable};
use crate::walk::{GenerateConfig, Scope, Walker};
use serde_json::{Map, Value};

const LANGUAGE: &str = "rust";

const RUST_TYPE_MAPPINGS: &[TypeMapping] = &[
    TypeMapping::new("string", "String"),
    TypeMapping::new("int", "i64"),
    TypeMapping::new("integer", "i64"),
    TypeMapping::new("float", "f64"),
    TypeMapping::new("bool", "bool"),
    TypeMapping::new("boolean", "bool"),
    TypeMapping::new("datetime", "String"),
    TypeMapping::new("dateTime", "String"),
    TypeMapping::new("bytes", "Vec<u8>"),
    TypeMapping::new("uuid", "String"),
];

/// Primitive types understood by the Rust backend.
pub static RUST_TYPES: TypeTable = TypeTable::new(RUST_TYPE_MAPPINGS);

/// Keywords usable as raw identifiers.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers.
const RESERVED: &[&str] = &["crate", "self", "Self", "super", "_"];

/// Options for Rust code generation (`options.rust`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RustOptions {
    /// Wrap the declarations in `pub mod X { ... }`.
    pub module: Option<String>,
    /// Attribute names; a renamed field gets `#[tag(rename = "propertyName")]`
    /// per entry.
    pub tags: Vec<String>,
    /// Paths listed in `#[derive(...)]` on every struct.
    pub derives: Vec<String>,
}

impl Default for RustOptions {
    fn default() -> Self {
        Self {
            module: None,
            tags: vec!["serde".into()],
            derives: vec![
                "Debug".into(),
                "Clone".into(),
                "serde::Serialize".into(),
                "serde::Deserialize".into(),
            ],
        }
    }
}

impl LanguageOptions for RustOptions {
    fn from_map(map: &Map<String, Value>) -> Self {
        let defaults = Self::default();
        Self {
            module: string_field(map, "module")
                .filter(|m| is_identifier(m) && !RESERVED.contains(&m.as_str()))
                .or(defaults.module),
            tags: string_list_field(map, "tags").unwrap_or(defaults.tags),
            derives: string_list_field(map, "derives").unwrap_or(defaults.derives),
        }
    }
}

/// Rust backend for the registry.
pub struct RustBackend;

/// Static instance for registry.
pub static RUST_BACKEND: RustBackend = RustBackend;

impl Backend for RustBackend {
    fn name(&self) -> &'static str {
        LANGUAGE
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["rs"]
    }

    fn language(&self) -> &'static str {
        "Rust"
    }

    fn extension(&self) -> &'static str {
        "rs"
    }

    fn types(&self) -> &'static dyn TypeMap {
        &RUST_TYPES
    }

    fn generate(&self, schema: &Schema, config: &GenerateConfig) -> Result<String, GenerateError> {
        let options = RustOptions::parse(schema.options_for(LANGUAGE));
        generate_rust_types(schema, &options, config)
    }
}

/// Generate Rust structs (or a type alias, for a primitive root).
pub fn generate_rust_types(
    schema: &Schema,
    options: &RustOptions,
    config: &GenerateConfig,
) -> Result<String, GenerateError> {
    let mut walker = Walker::new(LANGUAGE, &RUST_TYPES, config);
    walker.check_schema(schema);

    let name = rust_type_name(&schema.title);
    let mut doc = Vec::new();
    let description = doc_lines(&schema.description);
    if let Some((first, rest)) = description.split_first() {
        doc.push(format!("{} {}", name, first));
        doc.extend(rest.iter().map(|l| l.to_string()));
    }

    let root = PropertyPath::root();
    let mut items = Vec::new();
    if schema.ty.is_object() {
        let mut types = Scope::new();
        types.fresh(name.clone(), &root, |_| false);
        let item = StructItem {
            name: &name,
            doc: &doc,
            properties: &schema.properties,
            required: Some(&schema.required),
        };
        write_struct(&mut items, &mut types, &mut walker, options, item, &root)?;
    } else {
        let ty = walker.primitive(&schema.ty, &root)?;
        items.push(format!("{}pub type {} = {};\n", doc_comment(&doc), name, ty));
    }

    let body = items.join("\n");
    let source = match &options.module {
        Some(module) => format!("pub mod {} {{\n{}}}\n", field_ident(module), body),
        None => body,
    };

    let file = syn::parse_file(&source)
        .map_err(|e| walker.format_error(FormatError::Syntax(e.to_string())))?;
    Ok(prettyplease::unparse(&file))
}

struct StructItem<'a> {
    name: &'a str,
    doc: &'a [String],
    properties: &'a Properties,
    /// Required names at this level; `None` treats every field as required.
    required: Option<&'a [String]>,
}

/// Append the struct for `item` and, after it, every struct hoisted from its
/// nested objects. `types` holds every struct name in the file.
fn write_struct(
    items: &mut Vec<String>,
    types: &mut Scope,
    walker: &mut Walker<'_>,
    options: &RustOptions,
    item: StructItem<'_>,
    path: &PropertyPath,
) -> Result<(), GenerateError> {
    walker.enter(path)?;
    let slot = items.len();
    items.push(String::new());

    let mut out = doc_comment(item.doc);
    if !options.derives.is_empty() {
        out.push_str(&format!("#[derive({})]\n", options.derives.join(", ")));
    }
    out.push_str(&format!("pub struct {} {{\n", item.name));

    let mut fields = Scope::new();
    for (name, prop) in item.properties {
        let child = path.child(name);
        walker.check_property(prop, &child);
        let ident = field_ident(name);
        walker.claim(&mut fields, &ident, &child)?;

        let prop_doc: Vec<String> = doc_lines(&prop.description)
            .into_iter()
            .map(String::from)
            .collect();
        out.push_str(&doc_comment(&prop_doc));

        let ty = if prop.ty.is_object() {
            let nested = types.fresh(format!("{}{}", item.name, rust_type_name(name)), &child, |n| {
                RUST_TYPE_MAPPINGS.iter().any(|m| m.target == n)
            });
            let nested_item = StructItem {
                name: &nested,
                doc: &[],
                properties: &prop.properties,
                required: None,
            };
            write_struct(items, types, walker, options, nested_item, &child)?;
            nested
        } else {
            walker.primitive(&prop.ty, &child)?.to_string()
        };

        if ident.trim_start_matches("r#") != name.as_str() {
            for tag in &options.tags {
                out.push_str(&format!("#[{}(rename = {})]\n", tag, quote(name)));
            }
        }

        let optional = item.required.is_some_and(|r| !r.iter().any(|n| n == name));
        if optional {
            out.push_str(&format!("pub {}: Option<{}>,\n", ident, ty));
        } else {
            out.push_str(&format!("pub {}: {},\n", ident, ty));
        }
    }

    out.push_str("}\n");
    items[slot] = out;
    Ok(())
}

fn doc_comment(lines: &[String]) -> String {
    lines.iter().map(|l| format!("/// {}\n", l)).collect()
}

/// snake_case field name; keywords become raw identifiers.
fn field_ident(name: &str) -> String {
    let ident = snake(name);
    if RESERVED.contains(&ident.as_str()) {
        ident + "_"
    } else if KEYWORDS.contains(&ident.as_str()) {
        format!("r#{}", ident)
    } else {
        ident
    }
}

fn rust_type_name(name: &str) -> String {
    let ident = type_name(name);
    if RESERVED.contains(&ident.as_str()) {
        ident + "_"
    } else {
        ident
    }
}
