//! Indentation scanner.
//!
//! The scanner owns the one piece of state that makes the jot grammar
//! context-sensitive: a stack of previously seen indentation widths. The
//! parser queries it before ordinary tokenization, passing the set of
//! structural tokens its current grammar position accepts; the scanner
//! consumes a run of line-structural characters and answers with at most
//! one of block-open, block-close, line-break, or paragraph-break, or
//! declines and restores the cursor.
//!
//! The scanner never raises an error. A dedent to a width that was never
//! pushed is tolerated: one level is popped per call until the top of the
//! stack is at or below the new width, and exactness checking is left to
//! whatever grammar rule eventually fails.

use crate::cursor::Cursor;

/// Tab stop used when measuring indentation. Fixed, not configurable.
pub const TAB_WIDTH: u32 = 8;

/// Blank-line count assigned at end of input, large enough to always read
/// as a paragraph-sized run.
const EOF_BLANK_RUN: u32 = 10;

/// Structural tokens the scanner can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Entry into one indentation level.
    BlockOpen,
    /// Exit from one indentation level.
    BlockClose,
    /// A single line ending with no intervening blank line.
    LineBreak,
    /// A blank-line-separated break.
    ParagraphBreak,
}

impl TokenKind {
    fn index(self) -> usize {
        match self {
            TokenKind::BlockOpen => 0,
            TokenKind::BlockClose => 1,
            TokenKind::LineBreak => 2,
            TokenKind::ParagraphBreak => 3,
        }
    }
}

/// Fixed-size set of structural token kinds, used by the parser to tell
/// the scanner which tokens its current state accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenSet {
    flags: [bool; 4],
}

impl TokenSet {
    /// The empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Return this set with `kind` added.
    pub fn with(mut self, kind: TokenKind) -> Self {
        self.flags[kind.index()] = true;
        self
    }

    /// Return this set with `kind` removed.
    pub fn without(mut self, kind: TokenKind) -> Self {
        self.flags[kind.index()] = false;
        self
    }

    /// Whether `kind` is in the set.
    pub fn contains(&self, kind: TokenKind) -> bool {
        self.flags[kind.index()]
    }
}

/// The indentation scanner.
///
/// One instance per parse session, threaded by reference into every scan
/// call. The indentation stack is the only persistent state; it can be
/// snapshotted with [`Scanner::serialize`] and restored with
/// [`Scanner::deserialize`] so that an incremental-reparse collaborator
/// can resume scanning mid-document.
#[derive(Debug, Clone)]
pub struct Scanner {
    /// Indentation widths, base element always 0.
    indents: Vec<u16>,
    /// Whether paragraph breaks are distinguished from line breaks. The
    /// original single-break grammar is the same scanner with this off.
    paragraph_breaks: bool,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    /// Create a scanner with paragraph breaks enabled.
    pub fn new() -> Self {
        Self {
            indents: vec![0],
            paragraph_breaks: true,
        }
    }

    /// Create a scanner with paragraph breaks enabled or disabled.
    pub fn with_paragraph_breaks(paragraph_breaks: bool) -> Self {
        Self {
            indents: vec![0],
            paragraph_breaks,
        }
    }

    /// Number of open blocks, i.e. stack levels above the implicit base.
    pub fn depth(&self) -> usize {
        self.indents.len() - 1
    }

    /// Snapshot the indentation stack as one byte per level above the
    /// base. Widths beyond 255 columns are clipped; such documents are
    /// not representable and restore at width 255.
    pub fn serialize(&self) -> Vec<u8> {
        self.indents
            .iter()
            .skip(1)
            .map(|&width| width.min(255) as u8)
            .collect()
    }

    /// Restore the indentation stack from a [`Scanner::serialize`] buffer.
    pub fn deserialize(&mut self, buffer: &[u8]) {
        self.indents.clear();
        self.indents.push(0);
        self.indents.extend(buffer.iter().map(|&b| u16::from(b)));
    }

    /// Scan for one structural token.
    ///
    /// Consumes a run of line-structural characters and classifies the
    /// transition against the indentation stack and the `accept` set.
    /// Returns `None` (with the cursor restored) when the run contains no
    /// end of line or no acceptable token applies; the caller falls back
    /// to ordinary tokenization.
    ///
    /// A block-close consumes no input: a dedent spanning several levels
    /// is unwound by calling again at the same position, once per level.
    pub fn scan(&mut self, cursor: &mut Cursor<'_>, accept: TokenSet) -> Option<TokenKind> {
        let accept = if self.paragraph_breaks {
            accept
        } else {
            accept.without(TokenKind::ParagraphBreak)
        };

        let start = cursor.offset();
        let mut found_end_of_line = false;
        let mut num_lines: u32 = 0;
        let mut width: u32 = 0;
        loop {
            match cursor.peek() {
                Some('\n') => {
                    found_end_of_line = true;
                    width = 0;
                    num_lines += 1;
                    cursor.advance(true);
                }
                Some(' ') => {
                    width += 1;
                    cursor.advance(true);
                }
                Some('\t') => {
                    width += TAB_WIDTH;
                    cursor.advance(true);
                }
                Some('\r') | Some('\x0C') => {
                    cursor.advance(true);
                }
                None => {
                    width = 0;
                    found_end_of_line = true;
                    num_lines = num_lines.saturating_add(EOF_BLANK_RUN);
                    break;
                }
                Some(_) => break,
            }
        }

        if !found_end_of_line {
            cursor.rewind(start);
            return None;
        }

        let current = u32::from(self.indents.last().copied().unwrap_or(0));

        if accept.contains(TokenKind::BlockOpen) && width > current {
            self.indents.push(width.min(u32::from(u16::MAX)) as u16);
            return Some(TokenKind::BlockOpen);
        }

        // A close is also the answer when neither break kind could settle
        // the matter, i.e. when closing is the only sensible move.
        let breaks_both = accept.contains(TokenKind::LineBreak)
            && accept.contains(TokenKind::ParagraphBreak);
        if (accept.contains(TokenKind::BlockClose) || !breaks_both) && width < current {
            if self.indents.len() > 1 {
                self.indents.pop();
            }
            cursor.rewind(start);
            return Some(TokenKind::BlockClose);
        }

        if accept.contains(TokenKind::LineBreak)
            && (!accept.contains(TokenKind::ParagraphBreak) || num_lines == 1)
        {
            return Some(TokenKind::LineBreak);
        }

        if accept.contains(TokenKind::ParagraphBreak)
            && (!accept.contains(TokenKind::LineBreak) || num_lines > 1)
        {
            return Some(TokenKind::ParagraphBreak);
        }

        cursor.rewind(start);
        None
    }
}
