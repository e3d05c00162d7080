//! Error types for jot parsing.

use thiserror::Error;

/// Result type for jot parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Parse context carrying filename for error reporting.
#[derive(Clone, Debug)]
pub struct ParseContext {
    pub filename: Option<String>,
}

impl ParseContext {
    /// Create a new parse context.
    pub fn new(filename: Option<&str>) -> Self {
        Self {
            filename: filename.map(String::from),
        }
    }

    /// Format a location suffix for error messages.
    pub fn loc_suffix(&self, line: usize, col: usize) -> String {
        match &self.filename {
            Some(name) => format!(" at {}:{} of <{}>", line + 1, col + 1, name),
            None => String::new(),
        }
    }
}

/// Error type for jot parsing.
///
/// The scanner itself never fails; these are the grammar-level errors
/// the parser reports when ordinary tokenization cannot make sense of a
/// line.
#[derive(Error, Debug)]
pub enum ParseError {
    /// `@` sigil followed by neither an identifier nor a colon.
    #[error("Expected identifier or colon after \"@\"{0}")]
    ExpectedIdentifier(String),

    /// Trailing text after a reference on the same line.
    #[error("Unexpected character {0:?} after reference{1}")]
    UnexpectedCharAfterRef(char, String),

    /// A character no stanza can start with.
    #[error("Unexpected character {0:?}{1}")]
    UnexpectedChar(char, String),
}

impl ParseError {
    /// Create an error with location information.
    pub fn with_location(self, ctx: &ParseContext, line: usize, col: usize) -> Self {
        let suffix = ctx.loc_suffix(line, col);
        match self {
            ParseError::ExpectedIdentifier(_) => ParseError::ExpectedIdentifier(suffix),
            ParseError::UnexpectedCharAfterRef(c, _) => {
                ParseError::UnexpectedCharAfterRef(c, suffix)
            }
            ParseError::UnexpectedChar(c, _) => ParseError::UnexpectedChar(c, suffix),
        }
    }
}
