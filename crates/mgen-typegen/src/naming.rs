//! Identifier conventions for target languages.

use convert_case::{Case, Casing};

/// ASCII identifier: a letter or underscore followed by letters, digits or
/// underscores.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Dotted path of identifiers, none of them reserved (`com.example.media`).
pub fn is_qualified_name(name: &str, keywords: &[&str]) -> bool {
    name.split('.')
        .all(|part| is_identifier(part) && !keywords.contains(&part))
}

/// Make sure a cased name can start an identifier.
fn lead_with_letter(name: String, prefix: &str) -> String {
    match name.chars().next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => name,
        _ => format!("{prefix}{name}"),
    }
}

/// Exported Go/type name: upper-case the first letter of a valid identifier
/// (`userID` -> `UserID`), Pascal-case anything else (`content-type` ->
/// `ContentType`).
pub fn exported(name: &str) -> String {
    let cased = if is_identifier(name) {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    } else {
        name.to_case(Case::Pascal)
    };
    lead_with_letter(cased, "X")
}

/// Type name for declarations (`photo` -> `Photo`).
pub fn type_name(name: &str) -> String {
    exported(name)
}

/// lowerCamel member name: lower-case the first letter of a valid identifier,
/// camel-case anything else.
pub fn camel(name: &str) -> String {
    let cased = if is_identifier(name) {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    } else {
        name.to_case(Case::Camel)
    };
    lead_with_letter(cased, "_")
}

/// snake_case member name (`contentType` -> `content_type`).
pub fn snake(name: &str) -> String {
    lead_with_letter(name.to_case(Case::Snake), "_")
}

/// Append an underscore to names that collide with a reserved word.
pub fn escape_keyword(name: String, keywords: &[&str]) -> String {
    if keywords.contains(&name.as_str()) {
        name + "_"
    } else {
        name
    }
}

/// Quote a string for languages with C-style double-quoted literals.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Collapse a possibly multi-line description into comment lines.
pub fn doc_lines(text: &str) -> Vec<&str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
}
