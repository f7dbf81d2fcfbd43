//! The document tree produced by the parser.
//!
//! A parsed document is a [`Node::Document`] owning its children by value.
//! Only documents and `FOR` loops carry child nodes; text and echo nodes are
//! leaves. The tree has no parent links and is never mutated by the parser
//! once a container is closed.
//!
//! ```rust
//! use smartscript::{parse, Element, Node};
//!
//! let doc = parse("Hi {$= name $}!").unwrap();
//! assert_eq!(doc.number_of_children(), 3);
//! assert_eq!(doc.child(0).and_then(Node::text), Some("Hi "));
//! assert_eq!(
//!     doc.child(1).and_then(Node::elements),
//!     Some(&[Element::variable("name")][..])
//! );
//! assert!(doc.child(3).is_none());
//! ```

use crate::element::Element;
use serde::Serialize;
use std::fmt;

/// A node of the document tree.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Node {
    /// The root of every parsed document.
    Document { children: Vec<Node> },
    /// Literal text with escapes already decoded.
    Text { text: String },
    /// A `{$ FOR ... $}` ... `{$END$}` block.
    ForLoop(ForLoopNode),
    /// A `{$= ... $}` tag.
    Echo { elements: Vec<Element> },
}

/// Header and body of a `FOR` loop.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ForLoopNode {
    /// Always an [`Element::Variable`] when produced by the parser.
    pub variable: Element,
    pub start: Element,
    pub end: Element,
    pub step: Option<Element>,
    pub children: Vec<Node>,
}

impl ForLoopNode {
    /// Creates a loop with an empty body.
    pub fn new(variable: Element, start: Element, end: Element, step: Option<Element>) -> Self {
        ForLoopNode {
            variable,
            start,
            end,
            step,
            children: Vec::new(),
        }
    }

    /// Sets the loop body.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }
}

impl Node {
    pub fn document(children: Vec<Node>) -> Self {
        Node::Document { children }
    }

    pub fn text_node(text: impl Into<String>) -> Self {
        Node::Text { text: text.into() }
    }

    pub fn echo(elements: Vec<Element>) -> Self {
        Node::Echo { elements }
    }

    #[inline]
    #[must_use]
    pub const fn is_document(&self) -> bool {
        matches!(self, Node::Document { .. })
    }

    #[inline]
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Node::Text { .. })
    }

    #[inline]
    #[must_use]
    pub const fn is_for_loop(&self) -> bool {
        matches!(self, Node::ForLoop(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_echo(&self) -> bool {
        matches!(self, Node::Echo { .. })
    }

    /// Returns the child nodes; empty for text and echo nodes.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document { children } => children,
            Node::ForLoop(for_loop) => &for_loop.children,
            Node::Text { .. } | Node::Echo { .. } => &[],
        }
    }

    /// Returns the child at `index`, or `None` when out of range.
    #[inline]
    #[must_use]
    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children().get(index)
    }

    #[inline]
    #[must_use]
    pub fn number_of_children(&self) -> usize {
        self.children().len()
    }

    /// Height of the tree below this node: `0` for a node without children.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use smartscript::parse;
    ///
    /// assert_eq!(parse("").unwrap().depth(), 0);
    /// assert_eq!(parse("text").unwrap().depth(), 1);
    /// assert_eq!(parse("{$FOR i 1 2$}x{$END$}").unwrap().depth(), 2);
    /// ```
    #[must_use]
    pub fn depth(&self) -> usize {
        self.children()
            .iter()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// If this is a text node, returns its decoded content.
    #[inline]
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Node::Text { text } => Some(text),
            _ => None,
        }
    }

    /// If this is an echo node, returns its elements.
    #[inline]
    #[must_use]
    pub fn elements(&self) -> Option<&[Element]> {
        match self {
            Node::Echo { elements } => Some(elements),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_for_loop(&self) -> Option<&ForLoopNode> {
        match self {
            Node::ForLoop(for_loop) => Some(for_loop),
            _ => None,
        }
    }
}

impl From<ForLoopNode> for Node {
    fn from(value: ForLoopNode) -> Self {
        Node::ForLoop(value)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::ser::to_string(self))
    }
}
