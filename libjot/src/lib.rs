//! Jot outline format parser.
//!
//! Jot is an indentation-structured document format: a tree of named,
//! content-bearing nodes where a deeper indent opens a child block, a
//! shallower indent closes one, and blank-line runs separate paragraphs
//! rather than lines.
//!
//! # Parsing Pipeline
//!
//! One pass, two cooperating tokenizers:
//!
//! 1. **Scanner**: stateful indentation scanner holding a stack of seen
//!    indent widths. Queried with the set of structural tokens the
//!    grammar currently accepts, it answers with block-open, block-close,
//!    line-break, or paragraph-break, or declines.
//!
//! 2. **Parser**: drives the scanner and falls back to ordinary
//!    tokenization (sigils, identifiers, colons, content) when it
//!    declines, folding tokens into the document tree.
//!
//! The scanner and cursor are public so an external parse driver can use
//! them directly, and the scanner state can be serialized to resume an
//! incremental reparse mid-document.

mod cursor;
mod document;
mod error;
mod parser;
mod printer;
mod scanner;

pub use cursor::Cursor;
pub use document::{Binding, Content, Document, Node, Stanza, Stanzas};
pub use error::{ParseError, Result};
pub use printer::print;
pub use scanner::{Scanner, TokenKind, TokenSet, TAB_WIDTH};

/// Options controlling a parse.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Distinguish paragraph breaks (blank-line runs) from line breaks.
    /// Off reproduces the original single-break grammar; the indent
    /// handling is identical either way.
    pub paragraph_breaks: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            paragraph_breaks: true,
        }
    }
}

/// Parse a jot document from a string.
///
/// # Example
///
/// ```
/// use libjot::parse;
///
/// let document = parse("a\n  b\n").unwrap();
/// assert_eq!(document.stanzas.len(), 1);
/// ```
pub fn parse(input: &str) -> Result<Document> {
    parse_with_filename(input, None)
}

/// Parse a jot document from a string with a filename for error messages.
pub fn parse_with_filename(input: &str, filename: Option<&str>) -> Result<Document> {
    parse_with_options(input, filename, &ParseOptions::default())
}

/// Parse a jot document with explicit options.
pub fn parse_with_options(
    input: &str,
    filename: Option<&str>,
    options: &ParseOptions,
) -> Result<Document> {
    let ctx = error::ParseContext::new(filename);
    let scanner = Scanner::with_paragraph_breaks(options.paragraph_breaks);
    parser::parse_document(input, &ctx, scanner)
}
