//! Character cursor and the free-text scanner.
//!
//! [`Cursor`] walks the document one `char` at a time and keeps 1-based
//! line/column information for error messages. [`scan_text`] consumes literal
//! document text up to the next unescaped `{$`, decoding the two free-text
//! escapes:
//!
//! | Input | Decoded |
//! |-------|---------|
//! | `\\`  | `\`     |
//! | `\{`  | `{`     |
//!
//! Any other backslash sequence is an error. Text is kept verbatim otherwise;
//! no whitespace is trimmed.

use crate::{Error, Result};

/// Opens a tag.
pub const TAG_OPEN: &str = "{$";
/// Closes a tag.
pub const TAG_CLOSE: &str = "$}";

/// A 1-based line/column location in the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

/// A cursor over the document text.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Cursor {
            input,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// The location of the next unread character.
    #[inline]
    pub fn location(&self) -> Position {
        Position {
            line: self.line,
            col: self.column,
        }
    }

    #[inline]
    pub fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    #[inline]
    pub fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    #[inline]
    pub fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The character after the next one.
    #[inline]
    pub fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    #[inline]
    pub fn starts_with(&self, pattern: &str) -> bool {
        self.rest().starts_with(pattern)
    }

    pub fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Consumes `pattern` if the remaining input starts with it.
    pub fn eat(&mut self, pattern: &str) -> bool {
        if self.starts_with(pattern) {
            for _ in pattern.chars() {
                self.next_char();
            }
            true
        } else {
            false
        }
    }

    pub fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    /// Consumes characters while `predicate` holds and returns them.
    pub fn take_while<F>(&mut self, mut predicate: F) -> &'a str
    where
        F: FnMut(char) -> bool,
    {
        let start = self.position;
        while let Some(ch) = self.peek_char() {
            if predicate(ch) {
                self.next_char();
            } else {
                break;
            }
        }
        &self.input[start..self.position]
    }
}

/// Consumes free text up to (not including) the next unescaped [`TAG_OPEN`]
/// or the end of input, returning the decoded text.
///
/// An empty string means a tag opens right at the cursor, or the input is
/// exhausted.
///
/// # Errors
///
/// [`Error::MalformedEscape`] for a backslash followed by anything but `\`
/// or `{`, and [`Error::UnterminatedEscape`] for a backslash ending the input.
pub fn scan_text(cursor: &mut Cursor<'_>) -> Result<String> {
    let mut text = String::new();

    while let Some(ch) = cursor.peek_char() {
        if cursor.starts_with(TAG_OPEN) {
            break;
        }
        let at = cursor.location();
        cursor.next_char();

        if ch != '\\' {
            text.push(ch);
            continue;
        }

        match cursor.next_char() {
            Some('\\') => text.push('\\'),
            Some('{') => text.push('{'),
            Some(other) => {
                return Err(Error::malformed_escape(
                    at.line,
                    at.col,
                    &format!(
                        "'\\{}' is not a valid escape, only '\\\\' and '\\{{' are allowed in text",
                        other
                    ),
                ))
            }
            None => {
                return Err(Error::unterminated_escape(
                    at.line,
                    at.col,
                    "the document ends with a lone '\\'",
                ))
            }
        }
    }

    Ok(text)
}
