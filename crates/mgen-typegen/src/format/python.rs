//! Layout validation for generated Python modules.

use super::scan::{LineState, Scanner, Syntax};
use super::{FormatError, join_lines};

const PYTHON: Syntax = Syntax {
    line_comment: "#",
    block_comments: false,
    quotes: &['"', '\''],
    raw_quote: None,
    triple_quotes: true,
};

const INDENT: usize = 4;

/// Validate indentation and bracket balance, then normalize blank lines
/// (at most two in a row, as PEP 8 puts between top-level definitions).
pub fn format_python(source: &str) -> Result<String, FormatError> {
    let mut scanner = Scanner::new(PYTHON);
    let mut lines = Vec::new();
    // Indent of the previous logical line, and whether it opened a block.
    let mut previous: Option<(usize, bool)> = None;

    for (i, raw) in source.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.trim_end();
        let continuation = scanner.state() != LineState::Code || scanner.depth() > 0;

        let mut logical = None;
        if !continuation && !line.is_empty() {
            let body = line.trim_start_matches(' ');
            let indent = line.len() - body.len();
            if body.starts_with('\t') {
                return Err(layout(line_no, "tab in indentation"));
            }
            if indent % INDENT != 0 {
                return Err(layout(line_no, "indentation is not a multiple of four spaces"));
            }
            match previous {
                Some((prev, true)) if indent != prev + INDENT => {
                    return Err(layout(line_no, "expected an indented block"));
                }
                Some((prev, false)) if indent > prev => {
                    return Err(layout(line_no, "unexpected indent"));
                }
                None if indent > 0 => {
                    return Err(layout(line_no, "unexpected indent"));
                }
                _ => {}
            }
            logical = Some((indent, body.ends_with(':') && !body.starts_with('#')));
        }

        scanner.scan_line(line, line_no)?;
        if let Some((indent, colon)) = logical {
            // A trailing colon inside an open string or bracket is not a block.
            let opens = colon && scanner.state() == LineState::Code && scanner.depth() == 0;
            previous = Some((indent, opens));
        }
        lines.push(line);
    }

    if let Some((_, true)) = previous {
        return Err(layout(lines.len(), "expected an indented block"));
    }
    scanner.finish()?;
    Ok(join_lines(&lines, 2))
}

fn layout(line: usize, message: &str) -> FormatError {
    FormatError::Layout {
        line,
        message: message.to_string(),
    }
}
