//! Chooses which source lines to print, where to elide, and the gutter width, then lays out
//! the exact sequence of rows the [row emitter](crate::render::rows) walks.

use std::collections::BTreeSet;

use crate::diagnostic::Annotation;
use crate::render::classify::FileGroup;
use crate::render::located::SpanKind;
use crate::source::SourceFile;

/// One row of a planned file-group layout, in emission order.
#[derive(Debug, Clone)]
pub enum Row {
    /// Print the 0-based source line verbatim, with active rail prefixes.
    Source(usize),
    /// A run of at least two uninteresting lines collapsed to a single `...` row. The sample
    /// line is used only to decide which rails are active through the run.
    Elision { sample_line0: usize },
    /// A single-line or zero-width annotation's caret row, following its source row.
    Inline(usize),
    /// A label continuation line for the annotation at this index; `cont` is 1-based into
    /// the label's non-empty lines after the first.
    LabelCont { ann_index: usize, cont: usize },
    /// The rail-opening row for a multi-line annotation's start line.
    MultiOpen(usize),
    /// The rail-closing row (with label) for a multi-line annotation's end line.
    MultiClose(usize),
}

#[derive(Debug, Clone)]
pub struct Plan {
    pub gutter_width: usize,
    pub rows: Vec<Row>,
}

fn digits(mut n: usize) -> usize {
    if n == 0 {
        return 1;
    }
    let mut d = 0;
    while n > 0 {
        d += 1;
        n /= 10;
    }
    d
}

/// Non-empty label lines after splitting on `\n`, with a single trailing empty piece (from a
/// label ending in `\n`) dropped. A label with no embedded newlines yields exactly one line.
pub(crate) fn label_lines(label: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = label.split('\n').collect();
    if lines.len() > 1 && lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

/// Plans the row sequence for `group` against `file`. `annotations` is the owning
/// diagnostic's full annotation list, indexed by each located annotation's `ann_idx`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn plan(group: &FileGroup, file: &SourceFile, annotations: &[Annotation]) -> Plan {
    let mut interesting: BTreeSet<usize> = BTreeSet::new();
    for a in &group.annotations {
        interesting.insert(a.located.start_line0);
        interesting.insert(a.located.end_line0);
    }

    if interesting.is_empty() {
        return Plan { gutter_width: 1, rows: Vec::new() };
    }

    let first = *interesting.first().unwrap();
    let last = *interesting.last().unwrap();
    let last_line0 = file.line_count() - 1;
    let window_start = first.saturating_sub(1);
    let window_end = (last + 1).min(last_line0);

    let gutter_width = digits(window_end + 1);

    let mut rows = Vec::new();
    let mut line0 = window_start;
    while line0 <= window_end {
        if !interesting.contains(&line0) {
            let run_start = line0;
            let mut run_end = line0;
            while run_end + 1 <= window_end && !interesting.contains(&(run_end + 1)) {
                run_end += 1;
            }
            let run_len = run_end - run_start + 1;
            if run_len >= 2 {
                rows.push(Row::Elision { sample_line0: run_start });
                line0 = run_end + 1;
                continue;
            }
        }

        rows.push(Row::Source(line0));
        emit_annotation_rows_for_line(group, line0, annotations, &mut rows);
        line0 += 1;
    }

    Plan { gutter_width, rows }
}

fn emit_annotation_rows_for_line(
    group: &FileGroup,
    line0: usize,
    annotations: &[Annotation],
    rows: &mut Vec<Row>,
) {
    let mut inline: Vec<usize> = group
        .annotations
        .iter()
        .enumerate()
        .filter(|(_, a)| {
            a.located.kind != SpanKind::MultiLine && a.located.start_line0 == line0
        })
        .map(|(i, _)| i)
        .collect();
    inline.sort_by(|&a, &b| {
        let la = &group.annotations[a].located;
        let lb = &group.annotations[b].located;
        la.start.column.cmp(&lb.start.column).then_with(|| la.end.column.cmp(&lb.end.column)).then_with(|| a.cmp(&b))
    });
    for idx in inline {
        rows.push(Row::Inline(idx));
        push_label_continuations(group, idx, annotations, rows);
    }

    let mut closing: Vec<usize> = group
        .annotations
        .iter()
        .enumerate()
        .filter(|(_, a)| a.located.kind == SpanKind::MultiLine && a.located.end_line0 == line0)
        .map(|(i, _)| i)
        .collect();
    closing.sort_by_key(|&i| group.annotations[i].rail);
    for idx in closing {
        rows.push(Row::MultiClose(idx));
        push_label_continuations(group, idx, annotations, rows);
    }

    let mut opening: Vec<usize> = group
        .annotations
        .iter()
        .enumerate()
        .filter(|(_, a)| a.located.kind == SpanKind::MultiLine && a.located.start_line0 == line0)
        .map(|(i, _)| i)
        .collect();
    opening.sort_by_key(|&i| group.annotations[i].rail);
    for idx in opening {
        rows.push(Row::MultiOpen(idx));
    }
}

fn push_label_continuations(
    group: &FileGroup,
    idx: usize,
    annotations: &[Annotation],
    rows: &mut Vec<Row>,
) {
    let ann_idx = group.annotations[idx].ann_idx;
    let Some(label) = &annotations[ann_idx].label else { return };
    let lines = label_lines(label);
    for cont in 1..lines.len() {
        rows.push(Row::LabelCont { ann_index: idx, cont });
    }
}
