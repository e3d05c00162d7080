//! Pull-based character cursor.
//!
//! The cursor is the only view of the source text the scanner and parser
//! get: peek one character, then either consume it as part of the current
//! token or consume it as insignificant trivia. Positions are plain byte
//! offsets so callers can snapshot and rewind, which is how a declined
//! scan is undone.

/// A peek-and-advance cursor over in-memory source text.
#[derive(Debug)]
pub struct Cursor<'a> {
    source: &'a str,
    offset: usize,
    token_start: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of the source.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            offset: 0,
            token_start: 0,
        }
    }

    /// Look at the next character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.source[self.offset..].chars().next()
    }

    /// Consume the peeked character. With `trivia` set the character is
    /// excluded from the current token extent; otherwise it becomes part
    /// of the token returned by [`Cursor::token_text`].
    pub fn advance(&mut self, trivia: bool) {
        if let Some(ch) = self.peek() {
            self.offset += ch.len_utf8();
            if trivia {
                self.token_start = self.offset;
            }
        }
    }

    /// Current byte offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Restore the cursor to a previously observed offset.
    pub fn rewind(&mut self, offset: usize) {
        self.offset = offset;
        self.token_start = offset;
    }

    /// Mark the current position as the start of a token.
    pub fn begin_token(&mut self) {
        self.token_start = self.offset;
    }

    /// The text consumed since the last [`Cursor::begin_token`], minus
    /// any trivia.
    pub fn token_text(&self) -> &'a str {
        &self.source[self.token_start..self.offset]
    }

    /// Whether the cursor has consumed all input.
    pub fn is_eof(&self) -> bool {
        self.offset >= self.source.len()
    }

    /// Zero-based line and column of a byte offset, for error reporting.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let prefix = &self.source[..offset.min(self.source.len())];
        let line = prefix.matches('\n').count();
        let col = match prefix.rfind('\n') {
            Some(nl) => prefix[nl + 1..].chars().count(),
            None => prefix.chars().count(),
        };
        (line, col)
    }
}
