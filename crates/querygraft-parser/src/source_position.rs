/// A zero-based position within snippet source text.
///
/// Tracks the line, the UTF-8 character column (characters, not bytes), and
/// the byte offset from the start of the source.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SourcePosition {
    line: usize,
    col: usize,
    byte_offset: usize,
}

impl SourcePosition {
    pub fn new(line: usize, col: usize, byte_offset: usize) -> Self {
        Self {
            line,
            col,
            byte_offset,
        }
    }

    /// The zero-based line number.
    pub fn line(&self) -> usize {
        self.line
    }

    /// The zero-based UTF-8 character column.
    pub fn col(&self) -> usize {
        self.col
    }

    /// The byte offset from the start of the source text.
    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }
}

impl Default for SourcePosition {
    fn default() -> Self {
        Self::new(0, 0, 0)
    }
}
