//! Line-oriented lexical scanner shared by the formatters.
//!
//! Tracks just enough lexical state (strings, raw strings, comments) to find
//! the structural delimiters that matter for layout and balance.

use super::FormatError;

/// Lexical rules of a target language.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Syntax {
    pub line_comment: &'static str,
    pub block_comments: bool,
    /// Single-line quotes with backslash escapes.
    pub quotes: &'static [char],
    /// Quote opening a string that may span lines and has no escapes.
    pub raw_quote: Option<char>,
    /// Python-style `"""` strings.
    pub triple_quotes: bool,
}

/// Lexical state at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineState {
    Code,
    BlockComment,
    RawString(char),
    TripleString(char),
}

pub(crate) struct Scanner {
    syntax: Syntax,
    stack: Vec<(char, usize)>,
    state: LineState,
    last_line: usize,
}

impl Scanner {
    pub fn new(syntax: Syntax) -> Self {
        Self {
            syntax,
            stack: Vec::new(),
            state: LineState::Code,
            last_line: 0,
        }
    }

    pub fn state(&self) -> LineState {
        self.state
    }

    /// Open delimiters not yet closed.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Feed one line (without its newline). `line_no` is 1-based.
    pub fn scan_line(&mut self, line: &str, line_no: usize) -> Result<(), FormatError> {
        self.last_line = line_no;
        let chars: Vec<(usize, char)> = line.char_indices().collect();
        let at = |i: usize| chars.get(i).map(|&(_, c)| c);
        let mut i = 0;

        while i < chars.len() {
            let (byte, c) = chars[i];
            match self.state {
                LineState::BlockComment => {
                    if c == '*' && at(i + 1) == Some('/') {
                        self.state = LineState::Code;
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                LineState::RawString(q) => {
                    if c == q {
                        self.state = LineState::Code;
                    }
                    i += 1;
                }
                LineState::TripleString(q) => {
                    if c == '\\' {
                        i += 2;
                    } else if c == q && at(i + 1) == Some(q) && at(i + 2) == Some(q) {
                        self.state = LineState::Code;
                        i += 3;
                    } else {
                        i += 1;
                    }
                }
                LineState::Code => {
                    if line[byte..].starts_with(self.syntax.line_comment) {
                        break;
                    }
                    if self.syntax.block_comments && c == '/' && at(i + 1) == Some('*') {
                        self.state = LineState::BlockComment;
                        i += 2;
                        continue;
                    }
                    if self.syntax.triple_quotes
                        && (c == '"' || c == '\'')
                        && at(i + 1) == Some(c)
                        && at(i + 2) == Some(c)
                    {
                        self.state = LineState::TripleString(c);
                        i += 3;
                        continue;
                    }
                    if self.syntax.raw_quote == Some(c) {
                        self.state = LineState::RawString(c);
                        i += 1;
                        continue;
                    }
                    if self.syntax.quotes.contains(&c) {
                        i = Self::skip_quoted(&chars, i, line_no)?;
                        continue;
                    }
                    match c {
                        '{' | '(' | '[' => self.stack.push((c, line_no)),
                        '}' | ')' | ']' => self.close(c, line_no)?,
                        _ => {}
                    }
                    i += 1;
                }
            }
        }

        Ok(())
    }

    /// Index just past the closing quote of the literal opening at `start`.
    fn skip_quoted(chars: &[(usize, char)], start: usize, line_no: usize) -> Result<usize, FormatError> {
        let quote = chars[start].1;
        let mut j = start + 1;
        while j < chars.len() {
            match chars[j].1 {
                '\\' => j += 2,
                c if c == quote => return Ok(j + 1),
                _ => j += 1,
            }
        }
        Err(FormatError::UnterminatedString { line: line_no })
    }

    fn close(&mut self, found: char, line_no: usize) -> Result<(), FormatError> {
        let Some((open, opened)) = self.stack.pop() else {
            return Err(FormatError::Unexpected {
                line: line_no,
                found,
            });
        };
        let expected = match open {
            '{' => '}',
            '(' => ')',
            _ => ']',
        };
        if found != expected {
            return Err(FormatError::Mismatched {
                line: line_no,
                open,
                opened,
                found,
            });
        }
        Ok(())
    }

    /// Check that nothing is left open at end of input.
    pub fn finish(self) -> Result<(), FormatError> {
        match self.state {
            LineState::Code => {}
            LineState::BlockComment => return Err(FormatError::UnterminatedComment),
            LineState::RawString(_) | LineState::TripleString(_) => {
                return Err(FormatError::UnterminatedString {
                    line: self.last_line,
                });
            }
        }
        if let Some(&(open, line)) = self.stack.first() {
            return Err(FormatError::Unclosed { line, open });
        }
        Ok(())
    }
}
