//! SmartScript Language Reference
//!
//! This module documents the document language accepted by [`parse`] and
//! produced by [`to_string`]. It contains no code.
//!
//! [`parse`]: crate::parse
//! [`to_string`]: crate::to_string
//!
//! # Overview
//!
//! A SmartScript document is literal text with embedded tags. Tags are
//! delimited by `{$` and `$}` and come in three kinds:
//!
//! ```text
//! This is sample text.
//! {$ FOR i 1 10 1 $}
//!   This is {$= i $}-th time this message is generated.
//! {$END$}
//! {$FOR i 0 10 2 $}
//!   sin({$=i$}^2) = {$= i i * @sin "0.000" @decfmt $}
//! {$END$}
//! ```
//!
//! # Text
//!
//! Everything outside a tag is text and is kept verbatim, including all
//! whitespace. Two escapes are recognized:
//!
//! | Escape | Meaning |
//! |--------|---------|
//! | `\\` | a single backslash |
//! | `\{` | a literal `{`, so `\{$` does not open a tag |
//!
//! A `{` that is not followed by `$` is ordinary text. Any other use of `\`
//! is an error, as is a `\` ending the document.
//!
//! # Tags
//!
//! The first token after `{$` is the tag keyword. Whitespace between tokens
//! is insignificant and may include newlines.
//!
//! | Tag | Form | Meaning |
//! |-----|------|---------|
//! | FOR | `{$ FOR var start end [step] $}` | opens a loop body |
//! | END | `{$END$}` | closes the innermost open loop |
//! | ECHO | `{$= element* $}` | a sequence of elements |
//!
//! `FOR` and `END` are matched case-insensitively. Every `FOR` needs exactly
//! one matching `END`; loops may be nested up to
//! [`ParseOptions::max_depth`](crate::ParseOptions::max_depth) levels.
//!
//! The loop variable must be a variable name. `start`, `end` and `step` may
//! be variables, numbers or strings.
//!
//! An echo tag may be empty (`{$= $}`); a tag with no keyword at all (`{$$}`)
//! is an error.
//!
//! # Elements
//!
//! | Element | Syntax | Example |
//! |---------|--------|---------|
//! | Variable | letter, then letters, digits, `_` | `a_variable2` |
//! | Integer | optional `-`, digits, fits in `i64` | `-10` |
//! | Double | optional `-`, digits, `.`, digits; or an integer too large for `i64` | `-3.13` |
//! | String | `"..."` | `"a \"nested\" string"` |
//! | Function | `@` then a variable name | `@sin` |
//! | Operator | one of `+ - * / ^` | `*` |
//!
//! A `-` immediately followed by a digit is a sign, so `3-1` lexes as the
//! two constants `3` and `-1`. Tokens do not need separating whitespace when
//! the boundary is unambiguous: `{$=i*i+212$}` is five elements.
//!
//! **String escapes**:
//! ```text
//! \"  - quote
//! \\  - backslash
//! \n  - newline
//! \r  - carriage return
//! \t  - tab
//! ```
//! Strings may span lines but end at the tag's `$}`: a string still open
//! there is unterminated.
//!
//! # Canonical Form
//!
//! Rendering a parsed document produces its canonical form:
//!
//! - text escapes `\` and every `{`
//! - `{$ FOR i 1 10 $}` and `{$= a b $}` with single spaces, `{$END$}` bare
//! - doubles always carry a decimal point (`2.0`, never `2` or `2e0`)
//! - strings use `\"`, `\\`, `\n`, `\r`, `\t` for the characters they decode to
//!
//! Parsing and rendering a canonical document returns it unchanged.
