//! Document parser.
//!
//! The parser drives one left-to-right pass over the source, alternating
//! between two tokenizers: before every structural decision it offers the
//! scanner the set of structural tokens its grammar position accepts, and
//! only when the scanner declines does it fall back to ordinary
//! tokenization of sigils, identifiers, colons, and free-form content.
//!
//! A dedent spanning several levels arrives as one block-close per scan
//! call; each level of [`Session::parse_children`] consumes exactly one,
//! so the unwinding is a request/response loop between parser and
//! scanner, never recursion inside the scanner.

use crate::cursor::Cursor;
use crate::document::{Binding, Content, Document, Node, Stanza};
use crate::error::{ParseContext, ParseError, Result};
use crate::scanner::{Scanner, TokenKind, TokenSet};

/// What the scanner reported after a complete stanza.
enum Flow {
    /// A break token: another stanza follows at this level.
    Sibling,
    /// A block-close: this level is done.
    Closed,
    /// End of input with the indentation stack flushed.
    End,
}

/// Parse a complete document.
pub(crate) fn parse_document(
    input: &str,
    ctx: &ParseContext,
    scanner: Scanner,
) -> Result<Document> {
    Session {
        cursor: Cursor::new(input),
        scanner,
        ctx,
    }
    .parse()
}

/// One parse session: a cursor, a scanner, and the error context,
/// discarded together when the parse completes.
struct Session<'a> {
    cursor: Cursor<'a>,
    scanner: Scanner,
    ctx: &'a ParseContext,
}

/// Everything is possible right after a node line: children may open,
/// the enclosing block may close, or a sibling may follow.
fn stanza_follow() -> TokenSet {
    TokenSet::empty()
        .with(TokenKind::BlockOpen)
        .with(TokenKind::BlockClose)
        .with(TokenKind::LineBreak)
        .with(TokenKind::ParagraphBreak)
}

/// After a children block closed, the same minus another open.
fn block_follow() -> TokenSet {
    TokenSet::empty()
        .with(TokenKind::BlockClose)
        .with(TokenKind::LineBreak)
        .with(TokenKind::ParagraphBreak)
}

/// Break tokens only, for leading blank lines.
fn breaks() -> TokenSet {
    TokenSet::empty()
        .with(TokenKind::LineBreak)
        .with(TokenKind::ParagraphBreak)
}

impl Session<'_> {
    fn parse(mut self) -> Result<Document> {
        // Blank lines before the first stanza.
        let _ = self.scanner.scan(&mut self.cursor, breaks());

        let mut stanzas = Vec::new();
        if self.cursor.is_eof() {
            return Ok(Document { stanzas });
        }

        loop {
            let (stanza, flow) = self.parse_stanza()?;
            stanzas.push(stanza);
            match flow {
                Flow::Sibling => continue,
                Flow::End => break,
                Flow::Closed => {
                    // Only reachable when a restored scanner carried open
                    // levels into this parse; the floor has been reached.
                    let _ = self.scanner.scan(&mut self.cursor, breaks());
                    if self.cursor.is_eof() {
                        break;
                    }
                }
            }
        }

        Ok(Document { stanzas })
    }

    /// Parse one stanza, including any children block, and report what
    /// the scanner saw after it.
    fn parse_stanza(&mut self) -> Result<(Stanza, Flow)> {
        let stanza = self.parse_line()?;

        match self.scanner.scan(&mut self.cursor, stanza_follow()) {
            Some(TokenKind::BlockOpen) => {
                let children = self.parse_children()?;
                let stanza = attach_children(stanza, children);
                let flow = match self.scanner.scan(&mut self.cursor, block_follow()) {
                    Some(TokenKind::BlockClose) => Flow::Closed,
                    Some(_) => self.flow_after_break(),
                    None => return Err(self.error_here()),
                };
                Ok((stanza, flow))
            }
            Some(TokenKind::BlockClose) => Ok((stanza, Flow::Closed)),
            Some(TokenKind::LineBreak) | Some(TokenKind::ParagraphBreak) => {
                Ok((stanza, self.flow_after_break()))
            }
            None => {
                if self.cursor.is_eof() {
                    Ok((stanza, Flow::End))
                } else {
                    Err(self.error_here())
                }
            }
        }
    }

    /// Parse the stanzas of a children block. Entered after block-open;
    /// consumes the matching block-close.
    fn parse_children(&mut self) -> Result<Vec<Stanza>> {
        let mut stanzas = Vec::new();
        loop {
            let (stanza, flow) = self.parse_stanza()?;
            stanzas.push(stanza);
            match flow {
                Flow::Sibling => continue,
                Flow::Closed | Flow::End => return Ok(stanzas),
            }
        }
    }

    fn flow_after_break(&self) -> Flow {
        if self.cursor.is_eof() {
            Flow::End
        } else {
            Flow::Sibling
        }
    }

    /// Ordinary tokenization of one logical line.
    fn parse_line(&mut self) -> Result<Stanza> {
        self.skip_spaces();
        if self.cursor.peek() == Some('@') {
            return self.parse_marked_line();
        }
        let content = self.lex_content();
        if content.is_empty() {
            return Err(self.error_here());
        }
        Ok(Stanza::Node(Node {
            binding: None,
            content: Some(Content::Text(content)),
            children: Vec::new(),
        }))
    }

    /// A line starting with the `@` sigil: binding if a colon follows the
    /// identifier, reference otherwise. The anonymous `@:` binds without
    /// a name; a bare `@` is an error.
    fn parse_marked_line(&mut self) -> Result<Stanza> {
        let sigil_offset = self.cursor.offset();
        self.cursor.advance(false);
        let name = self.lex_identifier();

        if self.cursor.peek() == Some(':') {
            self.cursor.advance(false);
            let binding = Binding {
                name: (!name.is_empty()).then_some(name),
            };
            self.skip_spaces();
            return match self.cursor.peek() {
                Some('@') => {
                    let target = self.parse_ref()?;
                    Ok(Stanza::Node(Node {
                        binding: Some(binding),
                        content: Some(Content::Ref(target)),
                        children: Vec::new(),
                    }))
                }
                Some(ch) if !is_line_end(ch) => Ok(Stanza::Node(Node {
                    binding: Some(binding),
                    content: Some(Content::Text(self.lex_content())),
                    children: Vec::new(),
                })),
                // Nothing bound on this line: standalone binding, or a
                // children block if the scanner opens one next.
                _ => Ok(Stanza::Binding(binding)),
            };
        }

        if name.is_empty() {
            return Err(self.error_at(sigil_offset, ParseError::ExpectedIdentifier(String::new())));
        }
        self.require_line_end()?;
        Ok(Stanza::Node(Node {
            binding: None,
            content: Some(Content::Ref(name)),
            children: Vec::new(),
        }))
    }

    /// A reference in content position: `@` plus a required identifier,
    /// with nothing else on the line.
    fn parse_ref(&mut self) -> Result<String> {
        let sigil_offset = self.cursor.offset();
        self.cursor.advance(false);
        let name = self.lex_identifier();
        if name.is_empty() {
            return Err(self.error_at(sigil_offset, ParseError::ExpectedIdentifier(String::new())));
        }
        self.require_line_end()?;
        Ok(name)
    }

    /// Identifier: `[A-Za-z0-9_]*`, possibly empty.
    fn lex_identifier(&mut self) -> String {
        self.cursor.begin_token();
        while matches!(self.cursor.peek(), Some(ch) if ch.is_ascii_alphanumeric() || ch == '_') {
            self.cursor.advance(false);
        }
        self.cursor.token_text().to_string()
    }

    /// Content: the remainder of the line, trailing line-structural
    /// characters trimmed.
    fn lex_content(&mut self) -> String {
        self.cursor.begin_token();
        while matches!(self.cursor.peek(), Some(ch) if ch != '\n') {
            self.cursor.advance(false);
        }
        self.cursor
            .token_text()
            .trim_end_matches(['\r', '\x0C'])
            .to_string()
    }

    /// Inline whitespace between markers and content, insignificant.
    fn skip_spaces(&mut self) {
        while matches!(self.cursor.peek(), Some(' ') | Some('\t')) {
            self.cursor.advance(true);
        }
    }

    fn require_line_end(&mut self) -> Result<()> {
        self.skip_spaces();
        match self.cursor.peek() {
            Some(ch) if !is_line_end(ch) => Err(self.error_at_cursor(
                ParseError::UnexpectedCharAfterRef(ch, String::new()),
            )),
            _ => Ok(()),
        }
    }

    fn error_here(&self) -> ParseError {
        let ch = self.cursor.peek().unwrap_or('\n');
        self.error_at_cursor(ParseError::UnexpectedChar(ch, String::new()))
    }

    fn error_at_cursor(&self, err: ParseError) -> ParseError {
        self.error_at(self.cursor.offset(), err)
    }

    fn error_at(&self, offset: usize, err: ParseError) -> ParseError {
        let (line, col) = self.cursor.line_col(offset);
        err.with_location(self.ctx, line, col)
    }
}

fn is_line_end(ch: char) -> bool {
    ch == '\n' || ch == '\r' || ch == '\x0C'
}

/// Fold a children block into the stanza that opened it. A standalone
/// binding followed by a block becomes a contentless bound node.
fn attach_children(stanza: Stanza, children: Vec<Stanza>) -> Stanza {
    match stanza {
        Stanza::Node(mut node) => {
            node.children = children;
            Stanza::Node(node)
        }
        Stanza::Binding(binding) => Stanza::Node(Node {
            binding: Some(binding),
            content: None,
            children,
        }),
    }
}
