//! Configuration options for SmartScript parsing.
//!
//! The grammar itself is fixed; the only tunable is the resource limit on how
//! many `FOR` loops may be open at the same time.
//!
//! ## Examples
//!
//! ```rust
//! use smartscript::{parse_with_options, ErrorKind, ParseOptions};
//!
//! let options = ParseOptions::new().with_max_depth(1);
//!
//! assert!(parse_with_options("{$FOR i 1 2$}{$END$}", &options).is_ok());
//!
//! let err = parse_with_options("{$FOR i 1 2$}{$FOR j 1 2$}{$END$}{$END$}", &options)
//!     .unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::NestingTooDeep);
//! ```

/// Default limit on simultaneously open `FOR` loops.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Configuration options for the parser.
///
/// # Examples
///
/// ```rust
/// use smartscript::ParseOptions;
///
/// let options = ParseOptions::new();
/// assert_eq!(options.max_depth, 128);
///
/// let options = ParseOptions::new().with_max_depth(8);
/// assert_eq!(options.max_depth, 8);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of `FOR` loops open at once. Opening one more fails
    /// with [`Error::NestingTooDeep`](crate::Error::NestingTooDeep).
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    /// Creates default options (nesting limit of 128).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options without a nesting limit.
    ///
    /// Deep trees are rendered and dropped recursively, so only use this for
    /// trusted input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use smartscript::ParseOptions;
    ///
    /// assert_eq!(ParseOptions::unbounded().max_depth, usize::MAX);
    /// ```
    #[must_use]
    pub fn unbounded() -> Self {
        ParseOptions {
            max_depth: usize::MAX,
        }
    }

    /// Sets the maximum number of simultaneously open `FOR` loops.
    ///
    /// A limit of `0` rejects every `FOR` tag.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
