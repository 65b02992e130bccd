//! Lifts a byte-offset [`Span`] into a [`LocatedSpan`]: 1-based start/end line and column,
//! plus a classification used throughout the rest of the core.

use crate::error::{RenderError, Result};
use crate::source::SourceFile;
use crate::span::Span;

/// A 1-based line/column pair, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineColumn {
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    ZeroWidth,
    SingleLine,
    MultiLine,
}

#[derive(Debug, Clone, Copy)]
pub struct LocatedSpan {
    pub start: LineColumn,
    pub end: LineColumn,
    pub kind: SpanKind,
    /// 0-based start line, kept around so later stages don't need to re-subtract 1.
    pub start_line0: usize,
    pub end_line0: usize,
}

/// Resolves `span` against `file`, applying the end-at-newline rule: if `span.end` falls
/// exactly on the start of a following line, the located end is attributed to the previous
/// line's position just past its last character, rather than to column 1 of the next line.
/// This keeps caret underlines from spilling onto a line the span doesn't actually touch.
pub fn resolve(file: &SourceFile, span: Span) -> Result<LocatedSpan> {
    file.validate_span(span)?;

    if span.is_empty() {
        let (line0, col0) = file.lookup(span.start);
        let lc = LineColumn { line: line0 as u32 + 1, column: col0 + 1 };
        return Ok(LocatedSpan {
            start: lc,
            end: lc,
            kind: SpanKind::ZeroWidth,
            start_line0: line0,
            end_line0: line0,
        });
    }

    let (start_line0, start_col0) = file.lookup(span.start);
    let start = LineColumn { line: start_line0 as u32 + 1, column: start_col0 + 1 };

    let is_line_start = file.lookup(span.end).1 == 0 && span.end > span.start;
    let (end_line0, end_col0) = if is_line_start {
        file.lookup(span.end - 1)
    } else {
        file.lookup(span.end)
    };
    let end = LineColumn { line: end_line0 as u32 + 1, column: end_col0 + 1 };

    let kind = if end_line0 == start_line0 { SpanKind::SingleLine } else { SpanKind::MultiLine };

    Ok(LocatedSpan { start, end, kind, start_line0, end_line0 })
}
