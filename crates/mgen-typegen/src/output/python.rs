//! Python dataclass generation.
//!
//! Classes are keyword-only dataclasses so optional fields may precede
//! required ones without reordering. Serialization tags land in
//! `dataclasses.field(metadata=...)`, keyed by tag name.

use crate::error::GenerateError;
use crate::format::format_python;
use crate::naming::{doc_lines, escape_keyword, quote, snake, type_name};
use crate::options::{LanguageOptions, bool_field, string_list_field};
use crate::schema::{Properties, PropertyPath, Schema};
use crate::traits::Backend;
use crate::types::{TypeMap, TypeMapping, TypeTable};
use crate::walk::{GenerateConfig, Scope, Walker};
use serde_json::{Map, Value};

const LANGUAGE: &str = "python";

const INDENT: &str = "    ";

const PYTHON_TYPE_MAPPINGS: &[TypeMapping] = &[
    TypeMapping::new("string", "str"),
    TypeMapping::new("int", "int"),
    TypeMapping::new("integer", "int"),
    TypeMapping::new("float", "float"),
    TypeMapping::new("bool", "bool"),
    TypeMapping::new("boolean", "bool"),
    TypeMapping::with_import("datetime", "datetime.datetime", "datetime"),
    TypeMapping::with_import("dateTime", "datetime.datetime", "datetime"),
    TypeMapping::new("bytes", "bytes"),
    TypeMapping::with_import("uuid", "uuid.UUID", "uuid"),
];

/// Primitive types understood by the Python backend.
pub static PYTHON_TYPES: TypeTable = TypeTable::new(PYTHON_TYPE_MAPPINGS);

const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

/// Options for Python code generation (`options.python`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonOptions {
    /// Metadata keys; each field gets `{"key": "propertyName"}` per entry.
    pub tags: Vec<String>,
    /// Generate frozen (immutable) dataclasses.
    pub frozen: bool,
}

impl Default for PythonOptions {
    fn default() -> Self {
        Self {
            tags: vec!["json".into()],
            frozen: false,
        }
    }
}

impl LanguageOptions for PythonOptions {
    fn from_map(map: &Map<String, Value>) -> Self {
        let defaults = Self::default();
        Self {
            tags: string_list_field(map, "tags").unwrap_or(defaults.tags),
            frozen: bool_field(map, "frozen").unwrap_or(defaults.frozen),
        }
    }
}

/// Python backend for the registry.
pub struct PythonBackend;

/// Static instance for registry.
pub static PYTHON_BACKEND: PythonBackend = PythonBackend;

impl Backend for PythonBackend {
    fn name(&self) -> &'static str {
        LANGUAGE
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["py"]
    }

    fn language(&self) -> &'static str {
        "Python"
    }

    fn extension(&self) -> &'static str {
        "py"
    }

    fn types(&self) -> &'static dyn TypeMap {
        &PYTHON_TYPES
    }

    fn generate(&self, schema: &Schema, config: &GenerateConfig) -> Result<String, GenerateError> {
        let options = PythonOptions::parse(schema.options_for(LANGUAGE));
        generate_python_types(schema, &options, config)
    }
}

/// Generate a Python module with one dataclass (or alias, for a primitive
/// root) from a schema.
pub fn generate_python_types(
    schema: &Schema,
    options: &PythonOptions,
    config: &GenerateConfig,
) -> Result<String, GenerateError> {
    let mut walker = Walker::new(LANGUAGE, &PYTHON_TYPES, config);
    walker.check_schema(schema);

    let class = type_name(&schema.title);
    let mut doc = Vec::new();
    let description = doc_lines(&schema.description);
    if let Some((first, rest)) = description.split_first() {
        doc.push(format!("{} {}", class, first));
        doc.extend(rest.iter().map(|l| l.to_string()));
    }

    let root = PropertyPath::root();
    let mut body = String::new();
    if schema.ty.is_object() {
        let ctx = ClassContext {
            options,
            required: Some(&schema.required),
        };
        write_class(&mut body, &mut walker, &ctx, &class, &doc, &schema.properties, &root, 0)?;
    } else {
        let ty = walker.primitive(&schema.ty, &root)?;
        for line in &doc {
            body.push_str(&format!("# {}\n", line));
        }
        body.push_str(&format!("{} = {}\n", class, ty));
    }

    let mut out = String::new();
    if schema.ty.is_object() {
        out.push_str("import dataclasses\n");
    }
    for import in walker.imports() {
        out.push_str(&format!("import {}\n", import));
    }
    out.push_str("\n\n");
    out.push_str(&body);

    format_python(&out).map_err(|e| walker.format_error(e))
}

struct ClassContext<'a> {
    options: &'a PythonOptions,
    /// Required names at this level; `None` treats every field as required.
    required: Option<&'a [String]>,
}

#[allow(clippy::too_many_arguments)]
fn write_class(
    out: &mut String,
    walker: &mut Walker<'_>,
    ctx: &ClassContext<'_>,
    class: &str,
    doc: &[String],
    properties: &Properties,
    path: &PropertyPath,
    level: usize,
) -> Result<(), GenerateError> {
    walker.enter(path)?;
    let indent = INDENT.repeat(level);
    let inner = INDENT.repeat(level + 1);

    let args = if ctx.options.frozen {
        "frozen=True, kw_only=True"
    } else {
        "kw_only=True"
    };
    out.push_str(&format!("{indent}@dataclasses.dataclass({args})\n"));
    out.push_str(&format!("{indent}class {class}:\n"));

    let mut members = Vec::new();
    if !doc.is_empty() {
        members.push(docstring(&inner, doc));
    }

    let mut field_names = Scope::new();
    let mut member_types = Scope::new();
    let mut fields = String::new();
    for (name, prop) in properties {
        let child = path.child(name);
        walker.check_property(prop, &child);
        let field = field_name(name);
        walker.claim(&mut field_names, &field, &child)?;

        let ty = if prop.ty.is_object() {
            let nested = member_types.fresh(type_name(name), &child, |class| KEYWORDS.contains(&class));
            let nested_doc: Vec<String> = doc_lines(&prop.description)
                .into_iter()
                .map(String::from)
                .collect();
            let nested_ctx = ClassContext {
                options: ctx.options,
                required: None,
            };
            let mut block = String::new();
            write_class(
                &mut block,
                walker,
                &nested_ctx,
                &nested,
                &nested_doc,
                &prop.properties,
                &child,
                level + 1,
            )?;
            members.push(block);
            nested
        } else {
            for line in doc_lines(&prop.description) {
                fields.push_str(&format!("{inner}# {line}\n"));
            }
            walker.primitive(&prop.ty, &child)?.to_string()
        };

        let optional = ctx.required.is_some_and(|r| !r.iter().any(|n| n == name));
        fields.push_str(&field_line(&inner, &field, name, &ty, optional, &ctx.options.tags));
    }
    if !fields.is_empty() {
        members.push(fields);
    }

    if members.is_empty() {
        out.push_str(&format!("{inner}pass\n"));
    } else {
        out.push_str(&members.join("\n"));
    }
    Ok(())
}

/// Class attributes may not rebind a module or builtin that annotations
/// resolve through (`datetime: datetime.datetime`).
fn shadows_annotation(field: &str) -> bool {
    field == "dataclasses"
        || PYTHON_TYPE_MAPPINGS
            .iter()
            .any(|m| m.target.split('.').next() == Some(field))
}

fn field_name(name: &str) -> String {
    let field = escape_keyword(snake(name), KEYWORDS);
    if shadows_annotation(&field) {
        field + "_"
    } else {
        field
    }
}

fn field_line(
    indent: &str,
    field: &str,
    name: &str,
    ty: &str,
    optional: bool,
    tags: &[String],
) -> String {
    let ty = if optional {
        format!("{} | None", ty)
    } else {
        ty.to_string()
    };

    let mut args = Vec::new();
    if optional {
        args.push("default=None".to_string());
    }
    if !tags.is_empty() {
        let value = quote(name);
        let entries: Vec<String> = tags
            .iter()
            .map(|tag| format!("{}: {}", quote(tag), value))
            .collect();
        args.push(format!("metadata={{{}}}", entries.join(", ")));
    }

    match (tags.is_empty(), optional) {
        (true, false) => format!("{indent}{field}: {ty}\n"),
        (true, true) => format!("{indent}{field}: {ty} = None\n"),
        _ => format!("{indent}{field}: {ty} = dataclasses.field({})\n", args.join(", ")),
    }
}

fn docstring(indent: &str, lines: &[String]) -> String {
    let escaped: Vec<String> = lines
        .iter()
        .map(|l| l.replace('\\', "\\\\").replace('"', "\\\""))
        .collect();
    match escaped.as_slice() {
        [single] => format!("{indent}\"\"\"{single}\"\"\"\n"),
        [first, rest @ ..] => {
            let mut out = format!("{indent}\"\"\"{first}\n\n");
            for line in rest {
                out.push_str(&format!("{indent}{line}\n"));
            }
            out.push_str(&format!("{indent}\"\"\"\n"));
            out
        }
        [] => String::new(),
    }
}
