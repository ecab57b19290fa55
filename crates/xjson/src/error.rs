//! Error types for xjson

use std::fmt;
use thiserror::Error;

/// Position in the source text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub offset: usize,
    pub line: u32,
    pub col: u32,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.offset, self.line, self.col)
    }
}

impl Pos {
    pub const fn new(offset: usize, line: u32, col: u32) -> Self {
        Self { offset, line, col }
    }

    /// Resolve a byte offset into a line/column position within `source`.
    ///
    /// Offsets past the end are clamped to the end of the source.
    pub fn locate(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let mut line: u32 = 1;
        let mut col: u32 = 1;
        for &b in source.as_bytes().iter().take(offset) {
            if b == b'\n' {
                line = line.saturating_add(1);
                col = 1;
            } else {
                col = col.saturating_add(1);
            }
        }
        Self { offset, line, col }
    }
}

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidUtf8,
    MaxDepthExceeded { max: u16 },
    MaxSizeExceeded { max: usize },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUtf8 => write!(f, "invalid utf-8"),
            Self::MaxDepthExceeded { max } => {
                write!(f, "max depth exceeded: {max}")
            }
            Self::MaxSizeExceeded { max } => write!(f, "max size exceeded: {max}"),
        }
    }
}

/// Main error type for xjson
#[derive(Error, Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    pos: Pos,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, pos: Pos) -> Self {
        let message = kind.to_string();
        Self { kind, pos, message }
    }

    pub fn with_message(kind: ErrorKind, pos: Pos, message: impl Into<String>) -> Self {
        Self {
            kind,
            pos,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Create error at a byte offset of `source`
    pub fn at(kind: ErrorKind, source: &str, offset: usize) -> Self {
        Self::new(kind, Pos::locate(source, offset))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error at {}: {}", self.pos, self.message)
    }
}

/// Result type alias for xjson
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_display() {
        let pos = Pos::new(42, 10, 5);
        assert_eq!(pos.to_string(), "42:10:5");
    }

    #[test]
    fn test_pos_locate() {
        let source = "<a>\n  <b/>\n</a>";
        assert_eq!(Pos::locate(source, 0), Pos::new(0, 1, 1));
        assert_eq!(Pos::locate(source, 6), Pos::new(6, 2, 3));
        assert_eq!(Pos::locate(source, 1000), Pos::new(source.len(), 3, 5));
    }

    #[test]
    fn test_error_display() {
        let err = Error::at(ErrorKind::MaxDepthExceeded { max: 4 }, "\n<a>", 1);
        let display = err.to_string();
        assert_eq!(display, "error at 1:2:1: max depth exceeded: 4");
        assert_eq!(err.kind(), &ErrorKind::MaxDepthExceeded { max: 4 });
    }

    #[test]
    fn test_error_with_message() {
        let err = Error::with_message(ErrorKind::InvalidUtf8, Pos::default(), "bad byte at 3");
        assert_eq!(err.message(), "bad byte at 3");
        assert_eq!(err.pos(), Pos::default());
    }
}
