//! SmartScript parser.
//!
//! The parser pulls tokens from the [`Lexer`] and keeps an explicit stack of
//! open `FOR` loops above the document's own child list. Text and echo nodes
//! go into the innermost open container; `{$ FOR ... $}` pushes a new loop and
//! `{$END$}` pops it, appending the finished [`ForLoopNode`] to the container
//! below. Nesting depth is therefore bounded by
//! [`ParseOptions::max_depth`] rather than by the call stack.
//!
//! ## Usage
//!
//! ```rust
//! use smartscript::{Element, Parser};
//!
//! let doc = Parser::new("{$ FOR i 1 10 1 $} {$END$}").parse().unwrap();
//! let for_loop = doc.child(0).and_then(|node| node.as_for_loop()).unwrap();
//!
//! assert_eq!(for_loop.variable, Element::variable("i"));
//! assert_eq!(for_loop.start, Element::ConstantInteger(1));
//! assert_eq!(for_loop.end, Element::ConstantInteger(10));
//! assert_eq!(for_loop.step, Some(Element::ConstantInteger(1)));
//! ```

use crate::element::Element;
use crate::lexer::{Keyword, Lexer, Token};
use crate::node::{ForLoopNode, Node};
use crate::options::ParseOptions;
use crate::scanner::Position;
use crate::{Error, Result};

/// The SmartScript parser.
///
/// Created via [`Parser::new`]; consumed by [`Parser::parse`].
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    options: ParseOptions,
    document: Vec<Node>,
    // Unclosed FOR loops, innermost last, with the location of their tag.
    open_loops: Vec<(ForLoopNode, Position)>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Parser {
            lexer: Lexer::new(input),
            options: ParseOptions::default(),
            document: Vec::new(),
            open_loops: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Parses the whole input into a [`Node::Document`].
    ///
    /// # Errors
    ///
    /// Returns the first grammar, escaping or nesting violation found; no
    /// partial tree is produced.
    pub fn parse(mut self) -> Result<Node> {
        loop {
            match self.lexer.next_token()? {
                (Token::Text(text), _) => self.container().push(Node::text_node(text)),
                (Token::TagOpen, at) => self.parse_tag(at)?,
                (Token::Eof, _) => break,
                (other, at) => {
                    return Err(Error::unexpected_token(
                        at.line,
                        at.col,
                        &format!("unexpected {:?} outside of a tag", other),
                    ))
                }
            }
        }

        if let Some((_, at)) = self.open_loops.last() {
            return Err(Error::unclosed_for_loop(
                at.line,
                at.col,
                &format!(
                    "{} FOR loop(s) still open at the end of the document",
                    self.open_loops.len()
                ),
            ));
        }

        Ok(Node::document(self.document))
    }

    /// The children of the innermost open container.
    fn container(&mut self) -> &mut Vec<Node> {
        match self.open_loops.last_mut() {
            Some((for_loop, _)) => &mut for_loop.children,
            None => &mut self.document,
        }
    }

    fn parse_tag(&mut self, open: Position) -> Result<()> {
        let (token, at) = self.lexer.next_token()?;
        match token {
            Token::Keyword(Keyword::Echo) => {
                let elements = self.collect_elements(open)?;
                let elements = elements.into_iter().map(|(element, _)| element).collect();
                self.container().push(Node::echo(elements));
                Ok(())
            }
            Token::Keyword(Keyword::For) => self.open_for_loop(open),
            Token::Keyword(Keyword::End) => self.close_for_loop(open),
            Token::TagClose => Err(Error::empty_tag(
                open.line,
                open.col,
                "a tag must contain FOR, END or '='",
            )),
            Token::Eof => Err(Self::unterminated_tag(open)),
            Token::Element(element) => Err(Error::unexpected_token(
                at.line,
                at.col,
                &format!(
                    "a tag must start with FOR, END or '=', found '{}'",
                    element.as_text()
                ),
            )),
            other => Err(Error::unexpected_token(
                at.line,
                at.col,
                &format!("unexpected {:?} at the start of a tag", other),
            )),
        }
    }

    /// Reads elements up to and including the closing `$}`.
    fn collect_elements(&mut self, open: Position) -> Result<Vec<(Element, Position)>> {
        let mut elements = Vec::new();
        loop {
            match self.lexer.next_token()? {
                (Token::Element(element), at) => elements.push((element, at)),
                (Token::TagClose, _) => return Ok(elements),
                (Token::Eof, _) => return Err(Self::unterminated_tag(open)),
                (other, at) => {
                    return Err(Error::unexpected_token(
                        at.line,
                        at.col,
                        &format!("unexpected {:?} inside a tag", other),
                    ))
                }
            }
        }
    }

    fn open_for_loop(&mut self, open: Position) -> Result<()> {
        let mut elements = self.collect_elements(open)?.into_iter();

        let (variable, variable_at) = elements.next().ok_or_else(|| {
            Error::empty_for_tag(
                open.line,
                open.col,
                "FOR needs a variable, a start and an end expression",
            )
        })?;
        if !variable.is_variable() {
            return Err(Error::invalid_variable_name(
                variable_at.line,
                variable_at.col,
                &format!(
                    "FOR loop variable must be a variable name, found '{}'",
                    variable.as_text()
                ),
            ));
        }

        let operands: Vec<(Element, Position)> = elements.collect();
        if let Some((element, at)) = operands.iter().find(|(e, _)| !e.is_loop_operand()) {
            return Err(Error::unexpected_token(
                at.line,
                at.col,
                &format!("'{}' cannot be a FOR loop bound or step", element.as_text()),
            ));
        }

        let count = operands.len() + 1;
        let mut operands = operands.into_iter().map(|(element, _)| element);
        let header = match (operands.next(), operands.next(), operands.next(), operands.next()) {
            (Some(start), Some(end), step, None) => ForLoopNode::new(variable, start, end, step),
            _ => {
                return Err(Error::unexpected_token(
                    open.line,
                    open.col,
                    &format!("FOR takes 3 or 4 elements, found {}", count),
                ))
            }
        };

        if self.open_loops.len() >= self.options.max_depth {
            return Err(Error::nesting_too_deep(
                open.line,
                open.col,
                self.options.max_depth,
            ));
        }

        self.open_loops.push((header, open));
        Ok(())
    }

    fn close_for_loop(&mut self, open: Position) -> Result<()> {
        let extra = self.collect_elements(open)?;
        if let Some((element, at)) = extra.first() {
            return Err(Error::unexpected_token(
                at.line,
                at.col,
                &format!("END takes no elements, found '{}'", element.as_text()),
            ));
        }

        match self.open_loops.pop() {
            Some((for_loop, _)) => {
                self.container().push(Node::ForLoop(for_loop));
                Ok(())
            }
            None => Err(Error::unmatched_end(
                open.line,
                open.col,
                "END without an open FOR loop",
            )),
        }
    }

    fn unterminated_tag(open: Position) -> Error {
        Error::unexpected_token(
            open.line,
            open.col,
            "the document ends inside a tag, expected '$}'",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn parse(input: &str) -> Result<Node> {
        Parser::new(input).parse()
    }

    fn kind(input: &str) -> ErrorKind {
        parse(input).unwrap_err().kind()
    }

    #[test]
    fn test_empty_document() {
        let doc = parse("").unwrap();
        assert!(doc.is_document());
        assert_eq!(doc.number_of_children(), 0);
    }

    #[test]
    fn test_nested_loops() {
        let doc = parse("{$FOR i 1 3$}{$FOR j i 3$}x{$END$}y{$END$}z").unwrap();
        assert_eq!(doc.number_of_children(), 2);

        let outer = doc.child(0).and_then(Node::as_for_loop).unwrap();
        assert_eq!(outer.children.len(), 2);
        let inner = outer.children[0].as_for_loop().unwrap();
        assert_eq!(inner.start, Element::variable("i"));
        assert_eq!(inner.children, vec![Node::text_node("x")]);
        assert_eq!(outer.children[1], Node::text_node("y"));
        assert_eq!(doc.child(1), Some(&Node::text_node("z")));
    }

    #[test]
    fn test_empty_echo() {
        let doc = parse("{$=    $}").unwrap();
        assert_eq!(doc.child(0), Some(&Node::echo(Vec::new())));
    }

    #[test]
    fn test_for_element_counts() {
        assert_eq!(kind("{$FOR$} {$END$}"), ErrorKind::EmptyForTag);
        assert_eq!(kind("{$FOR i$}{$END$}"), ErrorKind::UnexpectedToken);
        assert_eq!(kind("{$FOR i 1$}{$END$}"), ErrorKind::UnexpectedToken);
        assert_eq!(kind("{$FOR i 1 2 3 4$}{$END$}"), ErrorKind::UnexpectedToken);
    }

    #[test]
    fn test_for_operand_types() {
        assert_eq!(kind("{$FOR 1 1 10$}{$END$}"), ErrorKind::InvalidVariableName);
        assert_eq!(kind("{$FOR i 1 @f$}{$END$}"), ErrorKind::UnexpectedToken);
        assert_eq!(kind("{$FOR i 1 10 *$}{$END$}"), ErrorKind::UnexpectedToken);
        assert!(parse("{$FOR i \"1\" n 2.5$}{$END$}").is_ok());
    }

    #[test]
    fn test_end_errors() {
        assert_eq!(kind("text {$END$}"), ErrorKind::UnmatchedEnd);
        assert_eq!(kind("{$FOR i 1 2$}{$END$}{$END$}"), ErrorKind::UnmatchedEnd);
        assert_eq!(kind("{$FOR i 1 2$}{$END i$}"), ErrorKind::UnexpectedToken);
    }

    #[test]
    fn test_unclosed_for_reports_innermost_loop() {
        let err = parse("{$FOR i 1 2$}\n{$FOR j 1 2$}{$END$}\n  {$FOR k 1 2$}").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnclosedForLoop);
        assert_eq!(err.position(), Some((3, 3)));
    }

    #[test]
    fn test_tag_without_keyword() {
        assert_eq!(kind("{$ i 1 $}"), ErrorKind::UnexpectedToken);
        assert_eq!(kind("{$ 1 $}"), ErrorKind::UnexpectedToken);
        assert_eq!(kind("{$$}"), ErrorKind::EmptyTag);
        assert_eq!(kind("{$  \n $}"), ErrorKind::EmptyTag);
    }

    #[test]
    fn test_unterminated_tag() {
        assert_eq!(kind("{$= a b"), ErrorKind::UnexpectedToken);
        assert_eq!(kind("text {$"), ErrorKind::UnexpectedToken);
    }

    #[test]
    fn test_depth_limit() {
        let options = ParseOptions::new().with_max_depth(2);
        let ok = "{$FOR a 1 2$}{$FOR b 1 2$}{$END$}{$END$}";
        assert!(Parser::new(ok).with_options(options.clone()).parse().is_ok());

        let deep = "{$FOR a 1 2$}{$FOR b 1 2$}{$FOR c 1 2$}{$END$}{$END$}{$END$}";
        let err = Parser::new(deep).with_options(options).parse().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NestingTooDeep);
    }

    #[test]
    fn test_sequential_loops_do_not_count_as_nested() {
        let options = ParseOptions::new().with_max_depth(1);
        let input = "{$FOR a 1 2$}{$END$}{$FOR b 1 2$}{$END$}";
        let doc = Parser::new(input).with_options(options).parse().unwrap();
        assert_eq!(doc.number_of_children(), 2);
    }
}
