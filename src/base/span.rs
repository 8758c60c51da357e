//! Byte-offset ranges and line/column conversion.

pub use text_size::{TextRange, TextSize};

/// Returns true if `offset` lies inside `range` or touches either end.
///
/// Completion positions sit *between* characters, so a cursor right after
/// the last character of a name still belongs to that name.
pub fn range_touches(range: TextRange, offset: TextSize) -> bool {
    range.start() <= offset && offset <= range.end()
}

/// A zero-based line/column pair. Columns count bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

/// Maps between byte offsets and [`LineCol`] positions for one text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineIndex {
    /// Offset of the first byte of every line.
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(TextSize::new(i as u32 + 1));
            }
        }
        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    /// Convert an offset to a line/column position.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let offset = offset.min(self.len);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        LineCol {
            line: line as u32,
            col: u32::from(offset - self.line_starts[line]),
        }
    }

    /// Convert a line/column position to an offset, clamped to the text.
    pub fn offset(&self, pos: LineCol) -> TextSize {
        match self.line_starts.get(pos.line as usize) {
            Some(&start) => (start + TextSize::new(pos.col)).min(self.len),
            None => self.len,
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
