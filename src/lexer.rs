//! Two-mode lexer for SmartScript documents.
//!
//! Outside tags the lexer hands the input to the free-text scanner and emits
//! [`Token::Text`]. After `{$` it switches into tag mode, where it recognizes
//! the tag keyword (`FOR`, `END` or `=`) in first position and then typed
//! [`Element`]s until the closing `$}`.
//!
//! The current mode is an explicit [`LexerState`] consulted at the start of
//! every [`Lexer::next_token`] call.
//!
//! ## Tag tokens
//!
//! | Input | Token |
//! |-------|-------|
//! | `i`, `a_variable` | [`Element::Variable`] |
//! | `12`, `-3` | [`Element::ConstantInteger`] |
//! | `1.5`, `-0.01`, `99999999999999999999` | [`Element::ConstantDouble`] |
//! | `"text"` | [`Element::StringLiteral`] |
//! | `@sin` | [`Element::Function`] |
//! | `+ - * / ^` | [`Element::Operator`] |
//!
//! A `-` directly followed by a digit is the sign of a number; otherwise it
//! is an operator.

use crate::element::{is_valid_identifier, Element, OPERATORS};
use crate::scanner::{scan_text, Cursor, Position, TAG_CLOSE, TAG_OPEN};
use crate::{Error, Result};

/// The lexer's current mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LexerState {
    /// Literal document text.
    Text,
    /// Right after `{$`, where a keyword may appear.
    TagStart,
    /// Inside a tag, after its keyword.
    Tag,
}

/// The keyword opening a tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keyword {
    For,
    End,
    /// `=`
    Echo,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Text(String),
    TagOpen,
    TagClose,
    Keyword(Keyword),
    Element(Element),
    Eof,
}

pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    state: LexerState,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            cursor: Cursor::new(input),
            state: LexerState::Text,
        }
    }

    #[inline]
    pub fn state(&self) -> LexerState {
        self.state
    }

    /// Produces the next token together with the location it starts at.
    ///
    /// Inside a tag, [`Token::Eof`] means the input ended before `$}`.
    pub fn next_token(&mut self) -> Result<(Token, Position)> {
        match self.state {
            LexerState::Text => self.lex_text(),
            LexerState::TagStart => self.lex_tag_start(),
            LexerState::Tag => self.lex_tag(),
        }
    }

    fn lex_text(&mut self) -> Result<(Token, Position)> {
        let at = self.cursor.location();

        if self.cursor.eat(TAG_OPEN) {
            self.state = LexerState::TagStart;
            return Ok((Token::TagOpen, at));
        }
        if self.cursor.at_end() {
            return Ok((Token::Eof, at));
        }

        let text = scan_text(&mut self.cursor)?;
        Ok((Token::Text(text), at))
    }

    fn lex_tag_start(&mut self) -> Result<(Token, Position)> {
        self.cursor.skip_whitespace();
        let at = self.cursor.location();
        self.state = LexerState::Tag;

        if self.cursor.eat("=") {
            return Ok((Token::Keyword(Keyword::Echo), at));
        }

        if self.cursor.peek_char().is_some_and(char::is_alphabetic) {
            let word = self.read_word();
            let token = if word.eq_ignore_ascii_case("FOR") {
                Token::Keyword(Keyword::For)
            } else if word.eq_ignore_ascii_case("END") {
                Token::Keyword(Keyword::End)
            } else {
                Token::Element(Element::variable(word))
            };
            return Ok((token, at));
        }

        self.lex_tag()
    }

    fn lex_tag(&mut self) -> Result<(Token, Position)> {
        self.cursor.skip_whitespace();
        let at = self.cursor.location();

        if self.cursor.eat(TAG_CLOSE) {
            self.state = LexerState::Text;
            return Ok((Token::TagClose, at));
        }

        let ch = match self.cursor.peek_char() {
            Some(ch) => ch,
            None => return Ok((Token::Eof, at)),
        };

        let element = match ch {
            '"' => self.lex_string(at)?,
            '@' => self.lex_function(at)?,
            c if c.is_alphabetic() || c == '_' => self.lex_variable(at)?,
            c if c.is_ascii_digit() => self.lex_number(at)?,
            '-' if self.cursor.peek_second().is_some_and(|c| c.is_ascii_digit()) => {
                self.lex_number(at)?
            }
            c if OPERATORS.contains(&c) => {
                self.cursor.next_char();
                Element::Operator(c)
            }
            '$' => {
                return Err(Error::unexpected_token(
                    at.line,
                    at.col,
                    "'$' inside a tag must be followed by '}'",
                ))
            }
            other => {
                return Err(Error::unexpected_token(
                    at.line,
                    at.col,
                    &format!("unexpected character '{}' inside a tag", other),
                ))
            }
        };

        Ok((Token::Element(element), at))
    }

    fn read_word(&mut self) -> &'a str {
        self.cursor.take_while(|ch| ch.is_alphanumeric() || ch == '_')
    }

    fn lex_variable(&mut self, at: Position) -> Result<Element> {
        let word = self.read_word();
        if !is_valid_identifier(word) {
            return Err(Error::invalid_variable_name(
                at.line,
                at.col,
                &format!("'{}' must start with a letter", word),
            ));
        }
        Ok(Element::variable(word))
    }

    fn lex_function(&mut self, at: Position) -> Result<Element> {
        self.cursor.next_char(); // consume '@'
        let word = self.read_word();
        if !is_valid_identifier(word) {
            let found = match self.cursor.peek_char() {
                Some(ch) if word.is_empty() && !ch.is_whitespace() => ch.to_string(),
                _ => word.to_string(),
            };
            return Err(Error::invalid_function_name(
                at.line,
                at.col,
                &format!("'@' must be followed by a letter, found '{}'", found),
            ));
        }
        Ok(Element::function(word))
    }

    fn lex_number(&mut self, at: Position) -> Result<Element> {
        let rest = self.cursor.rest();
        let mut len = 0;

        if self.cursor.peek_char() == Some('-') {
            self.cursor.next_char();
            len += 1;
        }
        len += self.cursor.take_while(|ch| ch.is_ascii_digit()).len();

        let mut has_decimal = false;
        if self.cursor.peek_char() == Some('.') {
            self.cursor.next_char();
            let fraction = self.cursor.take_while(|ch| ch.is_ascii_digit()).len();
            if fraction == 0 {
                return Err(Error::invalid_number(
                    at.line,
                    at.col,
                    &format!("missing digits after the decimal point in '{}.'", &rest[..len]),
                ));
            }
            has_decimal = true;
            len += 1 + fraction;
        }

        let literal = &rest[..len];
        match self.cursor.peek_char() {
            Some('.') => {
                return Err(Error::invalid_number(
                    at.line,
                    at.col,
                    &format!("second decimal point after '{}'", literal),
                ))
            }
            Some(ch) if ch.is_alphanumeric() || ch == '_' => {
                return Err(Error::invalid_number(
                    at.line,
                    at.col,
                    &format!("'{}' is directly followed by '{}'", literal, ch),
                ))
            }
            _ => {}
        }

        if !has_decimal {
            if let Ok(value) = literal.parse::<i64>() {
                return Ok(Element::ConstantInteger(value));
            }
        }

        match literal.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Element::ConstantDouble(value)),
            _ => Err(Error::invalid_number(
                at.line,
                at.col,
                &format!("'{}' is not a representable number", literal),
            )),
        }
    }

    fn lex_string(&mut self, at: Position) -> Result<Element> {
        self.cursor.next_char(); // consume opening quote
        let mut value = String::new();

        loop {
            if self.cursor.starts_with(TAG_CLOSE) {
                return Err(Error::unterminated_string(
                    at.line,
                    at.col,
                    "the tag ends before the closing '\"'",
                ));
            }

            let escape_at = self.cursor.location();
            match self.cursor.next_char() {
                Some('"') => return Ok(Element::StringLiteral(value)),
                Some('\\') => match self.cursor.next_char() {
                    Some('"') => value.push('"'),
                    Some('\\') => value.push('\\'),
                    Some('n') => value.push('\n'),
                    Some('r') => value.push('\r'),
                    Some('t') => value.push('\t'),
                    Some(other) => {
                        return Err(Error::invalid_string_escape(
                            escape_at.line,
                            escape_at.col,
                            &format!("'\\{}' is not a valid escape inside a string", other),
                        ))
                    }
                    None => break,
                },
                Some(ch) => value.push(ch),
                None => break,
            }
        }

        Err(Error::unterminated_string(
            at.line,
            at.col,
            "the document ends before the closing '\"'",
        ))
    }
}
