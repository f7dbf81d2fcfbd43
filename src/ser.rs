//! Canonical serialization of document trees.
//!
//! The [`Serializer`] turns a [`Node`] back into SmartScript text. The output
//! is canonical rather than a byte copy of the parsed text: text is
//! re-escaped, tags get single spaces around their contents, keywords are
//! upper-case and string literals use the short escapes.
//!
//! | Node | Rendering |
//! |------|-----------|
//! | Document | children, concatenated |
//! | Text | content with `\` → `\\` and `{` → `\{` |
//! | ForLoop | `{$ FOR var start end [step] $}` children `{$END$}` |
//! | Echo | `{$= ` elements joined by spaces ` $}` |
//!
//! Parsing the rendering of a parsed document and rendering again yields the
//! same text.
//!
//! ```rust
//! use smartscript::{parse, to_string};
//!
//! let doc = parse("{$for i 1 3$}\\\\x{$=i   \"a\\tb\"$}{$end$}").unwrap();
//! let canonical = to_string(&doc);
//! assert_eq!(canonical, "{$ FOR i 1 3 $}\\\\x{$= i \"a\\tb\" $}{$END$}");
//! assert_eq!(to_string(&parse(&canonical).unwrap()), canonical);
//! ```

use crate::element::Element;
use crate::node::{ForLoopNode, Node};

/// Builds the canonical text of a tree.
pub struct Serializer {
    output: String,
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer {
    pub fn new() -> Self {
        Serializer {
            output: String::with_capacity(256),
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    pub fn serialize_node(&mut self, node: &Node) {
        match node {
            Node::Document { children } => self.serialize_children(children),
            Node::Text { text } => self.write_text(text),
            Node::ForLoop(for_loop) => self.write_for_loop(for_loop),
            Node::Echo { elements } => self.write_echo(elements),
        }
    }

    fn serialize_children(&mut self, children: &[Node]) {
        for child in children {
            self.serialize_node(child);
        }
    }

    #[inline]
    fn write_text(&mut self, text: &str) {
        for ch in text.chars() {
            match ch {
                '\\' => self.output.push_str("\\\\"),
                '{' => self.output.push_str("\\{"),
                _ => self.output.push(ch),
            }
        }
    }

    fn write_for_loop(&mut self, for_loop: &ForLoopNode) {
        self.output.push_str("{$ FOR");
        let header = [&for_loop.variable, &for_loop.start, &for_loop.end];
        for element in header.into_iter().chain(for_loop.step.as_ref()) {
            self.output.push(' ');
            self.output.push_str(&element.as_text());
        }
        self.output.push_str(" $}");

        self.serialize_children(&for_loop.children);
        self.output.push_str("{$END$}");
    }

    fn write_echo(&mut self, elements: &[Element]) {
        self.output.push_str("{$= ");
        for (i, element) in elements.iter().enumerate() {
            if i > 0 {
                self.output.push(' ');
            }
            self.output.push_str(&element.as_text());
        }
        self.output.push_str(" $}");
    }
}

/// Renders `node` to its canonical text.
pub fn to_string(node: &Node) -> String {
    let mut serializer = Serializer::new();
    serializer.serialize_node(node);
    serializer.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_reescaped() {
        let node = Node::text_node("a\\b {c}");
        assert_eq!(to_string(&node), "a\\\\b \\{c}");
    }

    #[test]
    fn test_for_loop_with_and_without_step() {
        let with_step = ForLoopNode::new(
            Element::variable("i"),
            Element::ConstantInteger(0),
            Element::ConstantInteger(10),
            Some(Element::ConstantInteger(2)),
        );
        assert_eq!(
            to_string(&with_step.into()),
            "{$ FOR i 0 10 2 $}{$END$}"
        );

        let without_step = ForLoopNode::new(
            Element::variable("i"),
            Element::ConstantDouble(-1.5),
            Element::string("n"),
            None,
        )
        .with_children(vec![Node::text_node("\n")]);
        assert_eq!(
            to_string(&without_step.into()),
            "{$ FOR i -1.5 \"n\" $}\n{$END$}"
        );
    }

    #[test]
    fn test_echo() {
        let echo = Node::echo(vec![
            Element::variable("i"),
            Element::variable("i"),
            Element::Operator('*'),
            Element::function("@sin"),
            Element::string("0.000"),
            Element::function("@decfmt"),
        ]);
        assert_eq!(to_string(&echo), "{$= i i * @sin \"0.000\" @decfmt $}");
        assert_eq!(to_string(&Node::echo(Vec::new())), "{$=  $}");
    }

    #[test]
    fn test_document_concatenates_children() {
        let doc = Node::document(vec![
            Node::echo(vec![Element::variable("a")]),
            Node::echo(vec![Element::variable("b")]),
            Node::text_node("end"),
        ]);
        assert_eq!(to_string(&doc), "{$= a $}{$= b $}end");
        assert_eq!(to_string(&Node::document(Vec::new())), "");
    }
}
