//! Typed leaf values appearing inside tags.
//!
//! An [`Element`] is one token of a `{$= ... $}` expression or of a
//! `{$ FOR ... $}` header. The set is closed: variables, integer and decimal
//! constants, string literals, function references and operators.
//!
//! Every element has a canonical text form, [`Element::as_text`], which lexes
//! back to an equal element:
//!
//! ```rust
//! use smartscript::Element;
//!
//! assert_eq!(Element::variable("i").as_text(), "i");
//! assert_eq!(Element::ConstantInteger(-3).as_text(), "-3");
//! assert_eq!(Element::ConstantDouble(2.0).as_text(), "2.0");
//! assert_eq!(Element::function("@sin").as_text(), "@sin");
//! assert_eq!(Element::string("say \"hi\"\n").as_text(), r#""say \"hi\"\n""#);
//! assert_eq!(Element::Operator('*').as_text(), "*");
//! ```

use serde::Serialize;
use std::fmt;

/// Characters accepted as operators inside tags.
pub const OPERATORS: [char; 5] = ['+', '-', '*', '/', '^'];

/// A single typed value inside a tag.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Element {
    /// A variable reference such as `i` or `a_variable`.
    Variable(String),
    ConstantInteger(i64),
    /// A decimal literal, or an integer literal outside the `i64` range.
    ConstantDouble(f64),
    /// The decoded value of a `"..."` literal (escapes already resolved).
    StringLiteral(String),
    /// A function reference, stored with its leading `@`.
    Function(String),
    /// One of `+ - * / ^`.
    Operator(char),
}

impl Element {
    /// Creates a variable reference.
    pub fn variable(name: impl Into<String>) -> Self {
        Element::Variable(name.into())
    }

    /// Creates a function reference; a missing leading `@` is added.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use smartscript::Element;
    ///
    /// assert_eq!(Element::function("sin"), Element::function("@sin"));
    /// ```
    pub fn function(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.starts_with('@') {
            Element::Function(name)
        } else {
            Element::Function(format!("@{}", name))
        }
    }

    /// Creates a string literal from its decoded value.
    pub fn string(value: impl Into<String>) -> Self {
        Element::StringLiteral(value.into())
    }

    /// Returns the canonical text of this element.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Element::Variable(name) | Element::Function(name) => name.clone(),
            Element::ConstantInteger(value) => value.to_string(),
            Element::ConstantDouble(value) => format_double(*value),
            Element::StringLiteral(value) => quote_string(value),
            Element::Operator(op) => op.to_string(),
        }
    }

    /// Returns `true` for variables, numeric constants and strings, the
    /// elements allowed as bounds and step of a `FOR` loop.
    #[inline]
    #[must_use]
    pub const fn is_loop_operand(&self) -> bool {
        matches!(
            self,
            Element::Variable(_)
                | Element::ConstantInteger(_)
                | Element::ConstantDouble(_)
                | Element::StringLiteral(_)
        )
    }

    #[inline]
    #[must_use]
    pub const fn is_variable(&self) -> bool {
        matches!(self, Element::Variable(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Element::ConstantInteger(_) | Element::ConstantDouble(_))
    }

    /// If the element is an integer constant, returns it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use smartscript::Element;
    ///
    /// assert_eq!(Element::ConstantInteger(10).as_i64(), Some(10));
    /// assert_eq!(Element::ConstantDouble(10.0).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Element::ConstantInteger(value) => Some(*value),
            _ => None,
        }
    }

    /// If the element is a numeric constant, returns it as `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Element::ConstantInteger(value) => Some(*value as f64),
            Element::ConstantDouble(value) => Some(*value),
            _ => None,
        }
    }

    /// If the element is a string literal, returns its decoded value.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Element::StringLiteral(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the name of a variable or function (functions keep their `@`).
    #[inline]
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Element::Variable(name) | Element::Function(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<i64> for Element {
    fn from(value: i64) -> Self {
        Element::ConstantInteger(value)
    }
}

impl From<f64> for Element {
    fn from(value: f64) -> Self {
        Element::ConstantDouble(value)
    }
}

/// Returns `true` if `name` is a valid variable name: a letter followed by
/// letters, digits or underscores.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() => {
            chars.all(|ch| ch.is_alphanumeric() || ch == '_')
        }
        _ => false,
    }
}

// Always keeps a decimal point so the text lexes back as a double.
// `f64` Display never uses exponent notation.
fn format_double(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}

fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}
