//! Source indexing: turns a raw byte buffer into a structure that can answer
//! "what line/column is this byte offset on" in O(log n).

use crate::error::{RenderError, Result};

/// A single source file: its display path and an index over its byte buffer.
///
/// Line starts are byte offsets of the first byte of each line, found by scanning for `\n`
/// only; a lone `\r` does not start a new line but is kept in the printed text. Unlike a
/// compiler's source map, this index always keeps a final implicit line whose end is the
/// buffer length, even when the buffer ends in a trailing newline -- an offset equal to the
/// buffer length must resolve to that final line's column 1.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: String,
    src: String,
    line_starts: Vec<u32>,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, src: impl Into<String>) -> Self {
        let src = src.into();
        let line_starts = analyze_line_starts(&src);
        Self { path: path.into(), src, line_starts }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn len(&self) -> u32 {
        self.src.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.src.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// The 0-based byte range of `line` (0-based), excluding its terminating `\n`.
    pub fn line_byte_range(&self, line: usize) -> std::ops::Range<u32> {
        let start = self.line_starts[line];
        let end = if line + 1 < self.line_starts.len() {
            let next = self.line_starts[line + 1];
            // exclude the newline itself
            if next > start && self.src.as_bytes()[(next - 1) as usize] == b'\n' {
                next - 1
            } else {
                next
            }
        } else {
            self.len()
        };
        start..end
    }

    /// The text of `line` (0-based), with any trailing `\n` (and `\r`) stripped.
    pub fn line_text(&self, line: usize) -> &str {
        let range = self.line_byte_range(line);
        let mut text = &self.src[range.start as usize..range.end as usize];
        if let Some(stripped) = text.strip_suffix('\r') {
            text = stripped;
        }
        text
    }

    /// Resolves a byte offset to a 0-based `(line, column)` pair, where column is 0-based
    /// bytes-from-line-start. `offset` may equal the buffer length.
    pub fn lookup(&self, offset: u32) -> (usize, u32) {
        // partition_point: first line start greater than offset is the upper bound.
        let line = self.line_starts.partition_point(|&s| s <= offset) - 1;
        let col = offset - self.line_starts[line];
        (line, col)
    }

    pub fn validate_span(&self, span: crate::span::Span) -> Result<()> {
        if span.start > span.end || span.end > self.len() {
            return Err(RenderError::InvalidSpan { start: span.start, end: span.end, len: self.len() });
        }
        Ok(())
    }
}

fn analyze_line_starts(src: &str) -> Vec<u32> {
    let mut starts = vec![0u32];
    for (i, b) in src.bytes().enumerate() {
        if b == b'\n' {
            starts.push(i as u32 + 1);
        }
    }
    starts
}

/// An in-memory table of source files, indexed by an integer file id.
///
/// This is the one concrete [source provider](crate) a caller needs: the renderer performs no
/// filesystem access of its own, so every byte it touches must already live in this table.
#[derive(Debug, Clone, Default)]
pub struct SourceMap {
    files: Vec<SourceFile>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file to the table and returns its id.
    pub fn add(&mut self, path: impl Into<String>, src: impl Into<String>) -> u32 {
        let id = self.files.len() as u32;
        self.files.push(SourceFile::new(path, src));
        id
    }

    pub fn get(&self, id: u32) -> Result<&SourceFile> {
        self.files.get(id as usize).ok_or(RenderError::UnknownFile(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_starts_basic() {
        let f = SourceFile::new("f", "abc\ndef\nghi");
        assert_eq!(f.line_count(), 3);
        assert_eq!(f.line_text(0), "abc");
        assert_eq!(f.line_text(1), "def");
        assert_eq!(f.line_text(2), "ghi");
    }

    #[test]
    fn lookup_at_buffer_end_after_trailing_newline() {
        let f = SourceFile::new("f", "abc\n");
        // offset 4 == buffer length, must land on the implicit next line, column 0.
        assert_eq!(f.lookup(4), (1, 0));
        assert_eq!(f.line_count(), 2);
        assert_eq!(f.line_text(1), "");
    }

    #[test]
    fn lookup_at_line_start_is_column_zero() {
        let f = SourceFile::new("f", "abc\ndef");
        assert_eq!(f.lookup(4), (1, 0));
    }

    #[test]
    fn empty_source_has_one_line() {
        let f = SourceFile::new("f", "");
        assert_eq!(f.line_count(), 1);
        assert_eq!(f.lookup(0), (0, 0));
    }

    #[test]
    fn validate_span_rejects_out_of_range() {
        let f = SourceFile::new("f", "abc");
        assert!(f.validate_span(crate::span::Span::new(1, 5)).is_err());
        assert!(f.validate_span(crate::span::Span::new(3, 1)).is_err());
        assert!(f.validate_span(crate::span::Span::new(0, 3)).is_ok());
    }
}
