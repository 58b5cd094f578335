//! gofmt-style layout for generated Go declarations.
//!
//! Covers the subset of Go that the Go backend emits: tab indentation and
//! column alignment of consecutive struct fields.

use super::braces::{BraceStyle, reindent};
use super::{FormatError, join_lines};

/// A struct field line split into its columns.
struct FieldLine<'a> {
    indent: &'a str,
    name: &'a str,
    ty: &'a str,
    tag: Option<&'a str>,
}

impl<'a> FieldLine<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let body = line.trim_start_matches('\t');
        let indent = &line[..line.len() - body.len()];
        if indent.is_empty()
            || body.starts_with("//")
            || body.starts_with('}')
            || body.starts_with('"')
            || body.ends_with('{')
        {
            return None;
        }

        let (name, rest) = body.split_once(' ')?;
        let rest = rest.trim_start();
        let (ty, tag) = match rest.find('`') {
            Some(at) => (rest[..at].trim_end(), Some(&rest[at..])),
            None => (rest, None),
        };
        if ty.is_empty() {
            return None;
        }

        Some(Self {
            indent,
            name,
            ty,
            tag,
        })
    }
}

/// Align one run of consecutive field lines sharing an indent.
fn align(run: &[FieldLine<'_>], out: &mut Vec<String>) {
    let name_width = run.iter().map(|f| f.name.len()).max().unwrap_or(0);
    let type_width = run
        .iter()
        .filter(|f| f.tag.is_some())
        .map(|f| f.ty.len())
        .max()
        .unwrap_or(0);

    for field in run {
        let mut line = format!("{}{:<name_width$} {}", field.indent, field.name, field.ty);
        if let Some(tag) = field.tag {
            let pad = type_width - field.ty.len() + 1;
            line.push_str(&" ".repeat(pad));
            line.push_str(tag);
        }
        out.push(line);
    }
}

/// Format Go source: re-indent with tabs, then align struct field columns.
pub fn format_go(source: &str) -> Result<String, FormatError> {
    let lines = reindent(source, &BraceStyle::GO)?;
    let mut out = Vec::with_capacity(lines.len());
    let mut run: Vec<FieldLine<'_>> = Vec::new();

    for line in &lines {
        match FieldLine::parse(line) {
            Some(field) if run.last().is_none_or(|prev| prev.indent == field.indent) => {
                run.push(field);
            }
            Some(field) => {
                align(&run, &mut out);
                run = vec![field];
            }
            None => {
                align(&run, &mut out);
                run.clear();
                out.push(line.clone());
            }
        }
    }
    align(&run, &mut out);

    Ok(join_lines(&out, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligns_fields_and_tags() {
        let src = "package schema\n\ntype Photo struct {\nContentType string `json:\"contentType\"`\nSize int `json:\"size\"`\n}";
        let out = format_go(src).unwrap();
        assert_eq!(
            out,
            "package schema\n\ntype Photo struct {\n\tContentType string `json:\"contentType\"`\n\tSize        int    `json:\"size\"`\n}\n"
        );
    }

    #[test]
    fn fields_without_tags_are_not_padded() {
        let src = "type T struct {\nA string\nLonger int\n}";
        let out = format_go(src).unwrap();
        assert_eq!(out, "type T struct {\n\tA      string\n\tLonger int\n}\n");
    }

    #[test]
    fn nested_struct_breaks_runs() {
        let src = "type T struct {\nA int `json:\"a\"`\nMeta struct {\nWidth int `json:\"width\"`\nH int `json:\"h\"`\n} `json:\"meta\"`\nLong string `json:\"long\"`\n}";
        let out = format_go(src).unwrap();
        assert_eq!(
            out,
            "type T struct {\n\tA int `json:\"a\"`\n\tMeta struct {\n\t\tWidth int `json:\"width\"`\n\t\tH     int `json:\"h\"`\n\t} `json:\"meta\"`\n\tLong string `json:\"long\"`\n}\n"
        );
    }

    #[test]
    fn import_block_untouched() {
        let src = "package p\n\nimport (\n\"time\"\n\"fmt\"\n)";
        let out = format_go(src).unwrap();
        assert_eq!(out, "package p\n\nimport (\n\t\"time\"\n\t\"fmt\"\n)\n");
    }

    #[test]
    fn rejects_broken_tag() {
        let err = format_go("type T struct {\nA int `json:\"a\"\n}").unwrap_err();
        assert!(matches!(err, FormatError::UnterminatedString { .. }));
    }
}
