//! Byte cursor over the source text.
//!
//! Every structural character in the language is ASCII, so the cursor moves
//! byte-by-byte and only ever stops on ASCII bytes; slices taken between two
//! stop positions are therefore always on `char` boundaries. `current()`
//! returns `0x00` past the end of input.

/// Cursor over the source bytes. [`Copy`], so lookahead scans can run on a
/// snapshot without disturbing the lexer.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Cursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Cursor { source, pos: 0 }
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Byte at the current position, `0x00` at EOF.
    #[inline]
    pub(crate) fn current(&self) -> u8 {
        self.byte_at(self.pos)
    }

    /// Byte one position ahead of current, `0x00` past EOF.
    #[inline]
    pub(crate) fn peek(&self) -> u8 {
        self.byte_at(self.pos + 1)
    }

    #[inline]
    pub(crate) fn peek2(&self) -> u8 {
        self.byte_at(self.pos + 2)
    }

    #[inline]
    fn byte_at(&self, index: usize) -> u8 {
        self.source.as_bytes().get(index).copied().unwrap_or(0)
    }

    #[inline]
    pub(crate) fn advance(&mut self) {
        if !self.is_eof() {
            self.pos += 1;
        }
    }

    #[inline]
    pub(crate) fn advance_by(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.source.len());
    }

    /// Advance while `pred` holds for the current byte.
    pub(crate) fn eat_while(&mut self, mut pred: impl FnMut(u8) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Advance to the next `\n` (not consumed) or EOF.
    pub(crate) fn skip_line(&mut self) {
        self.eat_while(|b| b != b'\n');
    }

    /// Advance past the next `*/`, or to EOF when the comment is unclosed.
    pub(crate) fn skip_block_comment(&mut self) {
        match self.rest().find("*/") {
            Some(offset) => self.advance_by(offset + 2),
            None => self.pos = self.source.len(),
        }
    }

    /// Source text from `start` to the current position.
    #[inline]
    pub(crate) fn slice_from(&self, start: usize) -> &'a str {
        self.source.get(start..self.pos).unwrap_or("")
    }

    /// Remaining source text.
    #[inline]
    pub(crate) fn rest(&self) -> &'a str {
        self.source.get(self.pos..).unwrap_or("")
    }

    /// The full character at the current position (may be non-ASCII).
    pub(crate) fn current_char(&self) -> Option<char> {
        self.rest().chars().next()
    }
}
