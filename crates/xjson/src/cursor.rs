//! Byte cursor over a window of the input

/// Cursor for navigating a `[pos, end)` window of byte input.
///
/// Offsets are absolute within the full input, so nested windows handed to
/// recursive calls report positions that line up with the original text.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
    end: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor over the whole input
    pub const fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            end: input.len(),
        }
    }

    /// Create a cursor over `input[start..end]`, clamped to the input
    pub fn window(input: &'a [u8], start: usize, end: usize) -> Self {
        let end = end.min(input.len());
        Self {
            input,
            pos: start.min(end),
            end,
        }
    }

    /// Get current byte without consuming
    pub fn current(&self) -> Option<u8> {
        self.peek(0)
    }

    /// Peek at byte ahead without consuming
    pub fn peek(&self, ahead: usize) -> Option<u8> {
        let idx = self.pos.saturating_add(ahead);
        if idx < self.end {
            self.input.get(idx).copied()
        } else {
            None
        }
    }

    /// Advance cursor by one byte
    pub fn advance(&mut self) {
        if self.pos < self.end {
            self.pos += 1;
        }
    }

    /// Move the cursor to an absolute offset inside the window
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos.min(self.end);
    }

    /// Skip ASCII whitespace
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.current() {
            if b.is_ascii_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Consume byte if it matches
    pub fn consume(&mut self, expected: u8) -> bool {
        if self.current() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume bytes while `pred` holds, returning how many were consumed
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) -> usize {
        let start = self.pos;
        while let Some(b) = self.current() {
            if !pred(b) {
                break;
            }
            self.advance();
        }
        self.pos - start
    }

    /// Offset of the next occurrence of `byte` at or after the cursor
    pub fn find_byte(&self, byte: u8) -> Option<usize> {
        self.remaining()
            .iter()
            .position(|&b| b == byte)
            .map(|i| self.pos + i)
    }

    /// Check if at end of the window
    pub const fn is_eof(&self) -> bool {
        self.pos >= self.end
    }

    /// Get remaining bytes of the window
    pub fn remaining(&self) -> &'a [u8] {
        self.input.get(self.pos..self.end).unwrap_or_default()
    }

    /// Get current position index
    pub const fn pos(&self) -> usize {
        self.pos
    }

    /// Get the window end
    pub const fn end(&self) -> usize {
        self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_basic() {
        let mut cursor = Cursor::new(b"hello");
        assert_eq!(cursor.current(), Some(b'h'));
        assert_eq!(cursor.peek(1), Some(b'e'));
        cursor.advance();
        assert_eq!(cursor.current(), Some(b'e'));
    }

    #[test]
    fn test_cursor_window_bounds() {
        let mut cursor = Cursor::window(b"<a>text</a>", 3, 7);
        assert_eq!(cursor.pos(), 3);
        assert_eq!(cursor.remaining(), b"text");
        assert_eq!(cursor.peek(4), None);
        cursor.seek(100);
        assert!(cursor.is_eof());
        assert_eq!(cursor.pos(), 7);
        assert_eq!(cursor.current(), None);
    }

    #[test]
    fn test_cursor_whitespace() {
        let mut cursor = Cursor::new(b"  \t\nhello");
        cursor.skip_whitespace();
        assert_eq!(cursor.current(), Some(b'h'));
        assert_eq!(cursor.pos(), 4);
    }

    #[test]
    fn test_cursor_consume() {
        let mut cursor = Cursor::new(b"abc");
        assert!(cursor.consume(b'a'));
        assert!(!cursor.consume(b'z'));
        assert_eq!(cursor.current(), Some(b'b'));
    }

    #[test]
    fn test_cursor_eat_while_and_find() {
        let mut cursor = Cursor::new(b"ns:tag-1 rest>");
        let n = cursor.eat_while(|b| b.is_ascii_alphanumeric() || b == b':' || b == b'-');
        assert_eq!(n, 8);
        assert_eq!(cursor.find_byte(b'>'), Some(13));
        assert_eq!(cursor.remaining(), b" rest>");
    }

    #[test]
    fn test_cursor_eof() {
        let cursor = Cursor::new(b"");
        assert!(cursor.is_eof());
        assert_eq!(cursor.current(), None);
    }
}
