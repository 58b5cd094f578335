//! Re-indenting formatter for brace-delimited languages.

use super::scan::{LineState, Scanner, Syntax};
use super::{FormatError, join_lines};

/// Layout rules for one brace-delimited language.
#[derive(Debug, Clone, Copy)]
pub struct BraceStyle {
    pub(crate) syntax: Syntax,
    /// One level of indentation.
    pub indent: &'static str,
}

impl BraceStyle {
    pub const GO: BraceStyle = BraceStyle {
        syntax: Syntax {
            line_comment: "//",
            block_comments: true,
            quotes: &['"', '\''],
            raw_quote: Some('`'),
            triple_quotes: false,
        },
        indent: "\t",
    };

    pub const JAVA: BraceStyle = BraceStyle {
        syntax: Syntax {
            line_comment: "//",
            block_comments: true,
            quotes: &['"', '\''],
            raw_quote: None,
            triple_quotes: false,
        },
        indent: "    ",
    };

    pub const TYPESCRIPT: BraceStyle = BraceStyle {
        syntax: Syntax {
            line_comment: "//",
            block_comments: true,
            quotes: &['"', '\''],
            raw_quote: Some('`'),
            triple_quotes: false,
        },
        indent: "  ",
    };
}

/// Re-indent and validate, returning the formatted lines.
pub(crate) fn reindent(source: &str, style: &BraceStyle) -> Result<Vec<String>, FormatError> {
    let mut scanner = Scanner::new(style.syntax);
    let mut lines = Vec::new();

    for (i, raw) in source.lines().enumerate() {
        let trimmed = raw.trim();
        let line = match scanner.state() {
            // Raw string contents are data; leave them alone.
            LineState::RawString(_) | LineState::TripleString(_) => raw.trim_end().to_string(),
            LineState::BlockComment => {
                let indent = style.indent.repeat(scanner.depth());
                if trimmed.starts_with('*') {
                    format!("{indent} {trimmed}")
                } else {
                    format!("{indent}{trimmed}")
                }
            }
            LineState::Code if trimmed.is_empty() => String::new(),
            LineState::Code => {
                let closers = trimmed
                    .chars()
                    .take_while(|c| matches!(c, '}' | ')' | ']'))
                    .count();
                let level = scanner.depth().saturating_sub(closers);
                format!("{}{trimmed}", style.indent.repeat(level))
            }
        };
        scanner.scan_line(raw, i + 1)?;
        lines.push(line);
    }

    scanner.finish()?;
    Ok(lines)
}

/// Re-indent brace-delimited source by nesting depth and normalize blank
/// lines.
pub fn format_braces(source: &str, style: &BraceStyle) -> Result<String, FormatError> {
    let lines = reindent(source, style)?;
    Ok(join_lines(&lines, 1))
}
