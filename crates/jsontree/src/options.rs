/// Configuration options for parsing.
///
/// A document remembers the options it was parsed with and applies the same
/// ones when mutation re-parses inserted fragments.
///
/// # Examples
///
/// ```rust
/// use jsontree::{Document, ParseOptions};
///
/// let options = ParseOptions {
///     allow_comments: false,
///     ..Default::default()
/// };
/// assert!(Document::parse_with_options("1 // no comments", options).is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Whether `//` line comments and `/* */` block comments are skipped as
    /// inter-token trivia.
    ///
    /// This is a deliberate deviation from strict JSON, aimed at human-edited
    /// config-like documents.
    ///
    /// # Default
    ///
    /// `true`
    pub allow_comments: bool,

    /// Maximum array/object nesting before parsing fails with
    /// [`Error::DepthLimitExceeded`].
    ///
    /// The grammar is recursive-descent, so composite nesting rides the call
    /// stack; this bounds it. Node assembly itself uses an explicit stack and
    /// is not limited by this option.
    ///
    /// [`Error::DepthLimitExceeded`]: crate::Error::DepthLimitExceeded
    ///
    /// # Default
    ///
    /// `128`
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            allow_comments: true,
            max_depth: 128,
        }
    }
}
