//! # smartscript
//!
//! A parser and canonical serializer for SmartScript documents.
//!
//! ## What is SmartScript?
//!
//! SmartScript is a small document templating language: literal text with
//! embedded `{$ ... $}` tags. A `FOR` tag opens a loop body that an `END` tag
//! closes, and an echo tag (`{$= ... $}`) holds a sequence of variables,
//! constants, strings, function references and operators.
//!
//! This crate parses such documents into a tree and renders trees back to
//! text. It does not execute templates.
//!
//! ## Key Features
//!
//! - **Typed tree**: [`Node`] and [`Element`] are closed enums
//! - **Precise errors**: every failure has an [`ErrorKind`] and a line/column
//! - **Canonical output**: rendering is idempotent under re-parsing
//! - **Bounded nesting**: deep `FOR` nesting fails cleanly instead of
//!   exhausting the stack
//!
//! ## Quick Start
//!
//! ```rust
//! use smartscript::{parse, to_string, Element, Node};
//!
//! let doc = parse("{$ FOR i 1 10 $}Line {$= i $}\n{$END$}").unwrap();
//!
//! let for_loop = doc.child(0).and_then(Node::as_for_loop).unwrap();
//! assert_eq!(for_loop.variable, Element::variable("i"));
//! assert_eq!(for_loop.step, None);
//! assert_eq!(for_loop.children.len(), 3);
//!
//! assert_eq!(to_string(&doc), "{$ FOR i 1 10 $}Line {$= i $}\n{$END$}");
//! ```
//!
//! ### Handling Errors
//!
//! ```rust
//! use smartscript::{parse, ErrorKind};
//!
//! let err = parse("{$FOR _x 1 10$}{$END$}").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::InvalidVariableName);
//! assert_eq!(err.position(), Some((1, 7)));
//! ```
//!
//! ## Language Reference
//!
//! See the [`syntax`] module for the full grammar and escaping rules.

pub mod element;
pub mod error;
pub mod lexer;
pub mod node;
pub mod options;
pub mod parser;
pub mod scanner;
pub mod ser;
pub mod syntax;

pub use element::Element;
pub use error::{Error, ErrorKind, Result};
pub use node::{ForLoopNode, Node};
pub use options::{ParseOptions, DEFAULT_MAX_DEPTH};
pub use parser::Parser;
pub use ser::{to_string, Serializer};

use std::io;

/// Parses a SmartScript document with default options.
///
/// # Examples
///
/// ```rust
/// use smartscript::parse;
///
/// let doc = parse("   \r\n\t        ").unwrap();
/// assert_eq!(doc.number_of_children(), 1);
///
/// let empty = parse("").unwrap();
/// assert!(empty.child(0).is_none());
/// ```
///
/// # Errors
///
/// Returns the first escaping, lexical or structural violation in `input`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(input: &str) -> Result<Node> {
    Parser::new(input).parse()
}

/// Parses a SmartScript document with custom options.
///
/// # Errors
///
/// Same as [`parse`], plus [`Error::NestingTooDeep`] when more than
/// `options.max_depth` loops are open at once.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_with_options(input: &str, options: &ParseOptions) -> Result<Node> {
    Parser::new(input).with_options(options.clone()).parse()
}

/// Parses a SmartScript document from UTF-8 bytes.
///
/// # Examples
///
/// ```rust
/// use smartscript::{from_slice, ErrorKind};
///
/// assert!(from_slice(b"{$= a $}").is_ok());
/// assert_eq!(
///     from_slice(&[0xff, 0xfe]).unwrap_err().kind(),
///     ErrorKind::InvalidArgument
/// );
/// ```
///
/// # Errors
///
/// [`Error::InvalidArgument`] if the bytes are not valid UTF-8, otherwise as
/// [`parse`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(bytes: &[u8]) -> Result<Node> {
    let input = std::str::from_utf8(bytes).map_err(Error::invalid_argument)?;
    parse(input)
}

/// Reads a whole UTF-8 document from `reader` and parses it.
///
/// # Examples
///
/// ```rust
/// use smartscript::from_reader;
/// use std::io::Cursor;
///
/// let doc = from_reader(Cursor::new(b"Hello {$= name $}")).unwrap();
/// assert_eq!(doc.number_of_children(), 2);
/// ```
///
/// # Errors
///
/// [`Error::Io`] if reading fails or the data is not UTF-8, otherwise as
/// [`parse`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(mut reader: R) -> Result<Node>
where
    R: io::Read,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    parse(&string)
}

/// Renders a tree to canonical text. Same as [`to_string`].
pub fn render(node: &Node) -> String {
    to_string(node)
}

/// Writes the canonical text of `node` to `writer`.
///
/// # Errors
///
/// [`Error::Io`] if writing fails.
pub fn to_writer<W>(mut writer: W, node: &Node) -> Result<()>
where
    W: io::Write,
{
    writer
        .write_all(to_string(node).as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}
