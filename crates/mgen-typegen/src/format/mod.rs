//! Built-in source formatters.
//!
//! Every backend runs its assembled output through one of these before
//! returning it. A formatter both normalizes layout and validates the lexical
//! structure (balanced delimiters, terminated strings and comments); a
//! rejection means the generator emitted malformed code.

mod braces;
#[cfg(feature = "backend-go")]
mod go;
mod python;
mod scan;

pub use braces::{BraceStyle, format_braces};
#[cfg(feature = "backend-go")]
pub use go::format_go;
pub use python::format_python;

/// Why a formatter rejected its input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("line {line}: unexpected '{found}'")]
    Unexpected { line: usize, found: char },
    #[error("line {line}: '{found}' does not close '{open}' from line {opened}")]
    Mismatched {
        line: usize,
        open: char,
        opened: usize,
        found: char,
    },
    #[error("unclosed '{open}' opened on line {line}")]
    Unclosed { line: usize, open: char },
    #[error("line {line}: unterminated string literal")]
    UnterminatedString { line: usize },
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("line {line}: {message}")]
    Layout { line: usize, message: String },
    #[error("syntax error: {0}")]
    Syntax(String),
}

/// Join formatted lines: trailing whitespace stripped, no leading or trailing
/// blank lines, runs of blank lines capped at `max_blank`, final newline.
pub(crate) fn join_lines<S: AsRef<str>>(lines: &[S], max_blank: usize) -> String {
    let mut out = String::new();
    let mut blanks = 0;
    let mut started = false;

    for line in lines {
        let line = line.as_ref().trim_end();
        if line.is_empty() {
            blanks += 1;
            continue;
        }
        if started {
            for _ in 0..blanks.min(max_blank) {
                out.push('\n');
            }
        }
        blanks = 0;
        started = true;
        out.push_str(line);
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_collapses_blank_runs() {
        let lines = ["", "a  ", "", "", "", "b", "", ""];
        assert_eq!(join_lines(&lines, 1), "a\n\nb\n");
        assert_eq!(join_lines(&lines, 2), "a\n\n\nb\n");
    }

    #[test]
    fn join_empty() {
        let lines: [&str; 0] = [];
        assert_eq!(join_lines(&lines, 1), "");
    }
}
