//! Error types for SmartScript parsing.
//!
//! Every failure is fatal to the current parse: the parser never recovers and
//! never returns a partial tree. The error carries its [`ErrorKind`] and,
//! for anything found in the document itself, the 1-based line and column of
//! the offending construct.
//!
//! ## Error Categories
//!
//! - **Escaping**: bad `\` sequences in free text or inside string literals
//! - **Lexical**: malformed numbers, variable names and function names
//! - **Structural**: empty tags, unbalanced `FOR`/`END`, nesting too deep
//! - **Input**: undecodable bytes or failing readers
//!
//! ## Examples
//!
//! ```rust
//! use smartscript::{parse, ErrorKind};
//!
//! let err = parse("This is regular text.\\").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::UnterminatedEscape);
//! assert!(err.to_string().contains("line 1"));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while parsing a document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Input that cannot be treated as a document at all
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error while reading the document
    #[error("IO error: {0}")]
    Io(String),

    /// Backslash in free text followed by something other than `\` or `{`
    #[error("Malformed escape at line {line}, column {col}: {msg}")]
    MalformedEscape { line: usize, col: usize, msg: String },

    /// Backslash as the last character of the document
    #[error("Unterminated escape at line {line}, column {col}: {msg}")]
    UnterminatedEscape { line: usize, col: usize, msg: String },

    /// Unsupported escape inside a string literal
    #[error("Invalid string escape at line {line}, column {col}: {msg}")]
    InvalidStringEscape { line: usize, col: usize, msg: String },

    /// String literal without a closing quote
    #[error("Unterminated string at line {line}, column {col}: {msg}")]
    UnterminatedString { line: usize, col: usize, msg: String },

    /// Malformed numeric literal
    #[error("Invalid number at line {line}, column {col}: {msg}")]
    InvalidNumber { line: usize, col: usize, msg: String },

    /// Identifier that breaks the variable naming rules
    #[error("Invalid variable name at line {line}, column {col}: {msg}")]
    InvalidVariableName { line: usize, col: usize, msg: String },

    /// `@` not followed by a valid function name
    #[error("Invalid function name at line {line}, column {col}: {msg}")]
    InvalidFunctionName { line: usize, col: usize, msg: String },

    /// `{$$}` or a tag holding only whitespace
    #[error("Empty tag at line {line}, column {col}: {msg}")]
    EmptyTag { line: usize, col: usize, msg: String },

    /// `FOR` keyword with nothing after it
    #[error("Empty FOR tag at line {line}, column {col}: {msg}")]
    EmptyForTag { line: usize, col: usize, msg: String },

    /// `END` without an open `FOR`
    #[error("Unmatched END at line {line}, column {col}: {msg}")]
    UnmatchedEnd { line: usize, col: usize, msg: String },

    /// `FOR` still open when the document ends
    #[error("Unclosed FOR loop at line {line}, column {col}: {msg}")]
    UnclosedForLoop { line: usize, col: usize, msg: String },

    /// Too many `FOR` loops open at the same time
    #[error("Nesting too deep at line {line}, column {col}: more than {limit} open FOR loops")]
    NestingTooDeep { line: usize, col: usize, limit: usize },

    /// Any other grammar violation
    #[error("Unexpected token at line {line}, column {col}: {msg}")]
    UnexpectedToken { line: usize, col: usize, msg: String },
}

/// The category of an [`Error`], without its payload.
///
/// # Examples
///
/// ```rust
/// use smartscript::{parse, ErrorKind};
///
/// assert_eq!(parse("{$$}").unwrap_err().kind(), ErrorKind::EmptyTag);
/// assert_eq!(parse("{$END$}").unwrap_err().kind(), ErrorKind::UnmatchedEnd);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    Io,
    MalformedEscape,
    UnterminatedEscape,
    InvalidStringEscape,
    UnterminatedString,
    InvalidNumber,
    InvalidVariableName,
    InvalidFunctionName,
    EmptyTag,
    EmptyForTag,
    UnmatchedEnd,
    UnclosedForLoop,
    NestingTooDeep,
    UnexpectedToken,
}

impl Error {
    /// Creates an invalid argument error for input that is not a document.
    pub fn invalid_argument<T: fmt::Display>(msg: T) -> Self {
        Error::InvalidArgument(msg.to_string())
    }

    /// Creates an I/O error for reader failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates an error for a `\` in text followed by anything but `\` or `{`.
    pub fn malformed_escape(line: usize, col: usize, msg: &str) -> Self {
        Error::MalformedEscape {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates an error for a `\` as the last character of the document.
    pub fn unterminated_escape(line: usize, col: usize, msg: &str) -> Self {
        Error::UnterminatedEscape {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates an error for an unsupported `\x` escape inside a string literal.
    pub fn invalid_string_escape(line: usize, col: usize, msg: &str) -> Self {
        Error::InvalidStringEscape {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates an error for a string literal with no closing quote before
    /// `$}` or the end of input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use smartscript::{Error, ErrorKind};
    ///
    /// let err = Error::unterminated_string(2, 5, "missing '\"'");
    /// assert_eq!(err.kind(), ErrorKind::UnterminatedString);
    /// assert_eq!(err.position(), Some((2, 5)));
    /// ```
    pub fn unterminated_string(line: usize, col: usize, msg: &str) -> Self {
        Error::UnterminatedString {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates an error for a malformed or unrepresentable numeric literal.
    pub fn invalid_number(line: usize, col: usize, msg: &str) -> Self {
        Error::InvalidNumber {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates an error for an identifier that does not start with a letter.
    pub fn invalid_variable_name(line: usize, col: usize, msg: &str) -> Self {
        Error::InvalidVariableName {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates an error for `@` without a valid name after it.
    pub fn invalid_function_name(line: usize, col: usize, msg: &str) -> Self {
        Error::InvalidFunctionName {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates an error for `{$$}` or a tag holding only whitespace.
    pub fn empty_tag(line: usize, col: usize, msg: &str) -> Self {
        Error::EmptyTag {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates an error for a `FOR` tag with no elements.
    pub fn empty_for_tag(line: usize, col: usize, msg: &str) -> Self {
        Error::EmptyForTag {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates an error for `END` with no open `FOR` loop.
    pub fn unmatched_end(line: usize, col: usize, msg: &str) -> Self {
        Error::UnmatchedEnd {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates an error for a `FOR` loop still open at the end of input.
    pub fn unclosed_for_loop(line: usize, col: usize, msg: &str) -> Self {
        Error::UnclosedForLoop {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates the resource-exhaustion error raised when `limit` open loops
    /// would be exceeded.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use smartscript::Error;
    ///
    /// let err = Error::nesting_too_deep(3, 7, 16);
    /// assert!(err.to_string().contains("more than 16"));
    /// ```
    pub fn nesting_too_deep(line: usize, col: usize, limit: usize) -> Self {
        Error::NestingTooDeep { line, col, limit }
    }

    /// Creates a generic grammar error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use smartscript::Error;
    ///
    /// let err = Error::unexpected_token(10, 5, "expected a tag keyword");
    /// assert!(err.to_string().contains("line 10, column 5"));
    /// ```
    pub fn unexpected_token(line: usize, col: usize, msg: &str) -> Self {
        Error::UnexpectedToken {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Returns the category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::Io(_) => ErrorKind::Io,
            Error::MalformedEscape { .. } => ErrorKind::MalformedEscape,
            Error::UnterminatedEscape { .. } => ErrorKind::UnterminatedEscape,
            Error::InvalidStringEscape { .. } => ErrorKind::InvalidStringEscape,
            Error::UnterminatedString { .. } => ErrorKind::UnterminatedString,
            Error::InvalidNumber { .. } => ErrorKind::InvalidNumber,
            Error::InvalidVariableName { .. } => ErrorKind::InvalidVariableName,
            Error::InvalidFunctionName { .. } => ErrorKind::InvalidFunctionName,
            Error::EmptyTag { .. } => ErrorKind::EmptyTag,
            Error::EmptyForTag { .. } => ErrorKind::EmptyForTag,
            Error::UnmatchedEnd { .. } => ErrorKind::UnmatchedEnd,
            Error::UnclosedForLoop { .. } => ErrorKind::UnclosedForLoop,
            Error::NestingTooDeep { .. } => ErrorKind::NestingTooDeep,
            Error::UnexpectedToken { .. } => ErrorKind::UnexpectedToken,
        }
    }

    /// Returns the `(line, column)` of the offending construct, if the error
    /// came from the document text.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Error::InvalidArgument(_) | Error::Io(_) => None,
            Error::MalformedEscape { line, col, .. }
            | Error::UnterminatedEscape { line, col, .. }
            | Error::InvalidStringEscape { line, col, .. }
            | Error::UnterminatedString { line, col, .. }
            | Error::InvalidNumber { line, col, .. }
            | Error::InvalidVariableName { line, col, .. }
            | Error::InvalidFunctionName { line, col, .. }
            | Error::EmptyTag { line, col, .. }
            | Error::EmptyForTag { line, col, .. }
            | Error::UnmatchedEnd { line, col, .. }
            | Error::UnclosedForLoop { line, col, .. }
            | Error::NestingTooDeep { line, col, .. }
            | Error::UnexpectedToken { line, col, .. } => Some((*line, *col)),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
