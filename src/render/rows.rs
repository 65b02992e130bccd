//! Walks a [`Plan`] and writes each row as: gutter, separator, rail prefix, content.

use std::collections::HashMap;

use anstyle::Style;

use crate::diagnostic::{Annotation, AnnotationStyle, Severity};
use crate::error::Result;
use crate::render::classify::FileGroup;
use crate::render::plan::{label_lines, Plan, Row};
use crate::sink::Sink;
use crate::source::SourceFile;
use crate::style::Element;

/// Resolves the style for a diagnostic element; see [`crate::style::style_for`] for the
/// shipped implementation and [`crate::style::no_style`] for uncolorized output.
pub type StyleFn<'a> = &'a dyn Fn(Element, Severity) -> Style;

fn spaces(n: usize) -> String {
    " ".repeat(n)
}

fn write_styled(sink: &mut dyn Sink, style: Style, text: &str) -> Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    if style == Style::new() {
        sink.write_str(text)?;
    } else {
        sink.write_str(&format!("{style}{text}{style:#}"))?;
    }
    Ok(())
}

fn active_at(group: &FileGroup, rail: usize, line0: usize) -> bool {
    group
        .annotations
        .iter()
        .any(|a| a.rail == Some(rail) && a.located.start_line0 <= line0 && line0 <= a.located.end_line0)
}

/// The plain two-char-per-rail prefix used on source, elision, and inline annotation rows.
fn rail_prefix(group: &FileGroup, rail_count: usize, line0: usize) -> String {
    let mut s = String::with_capacity(rail_count * 2);
    for rail in 0..rail_count {
        s.push_str(if active_at(group, rail, line0) { "| " } else { "  " });
    }
    s
}

/// The prefix for a multi-line opening/closing row, where `target` shows a bend and columns
/// outside it (higher index, not yet independently active) are swept with underscores.
fn bend_prefix(
    group: &FileGroup,
    rail_count: usize,
    line0: usize,
    target: usize,
    is_close: bool,
) -> (String, usize) {
    let mut s = String::with_capacity(rail_count * 2);
    for rail in 0..rail_count {
        if rail == target {
            s.push_str(if is_close { "|_" } else { " _" });
        } else if active_at(group, rail, line0) {
            s.push_str("| ");
        } else if rail > target {
            s.push_str("__");
        } else {
            s.push_str("  ");
        }
    }
    let width = s.chars().count();
    (s, width)
}

fn pad_to(width: usize, target_col: u32, fill: char) -> String {
    let target = (target_col as usize).saturating_sub(1);
    fill.to_string().repeat(target.saturating_sub(width))
}

fn caret_element(style: AnnotationStyle) -> Element {
    match style {
        AnnotationStyle::Primary => Element::CaretPrimary,
        AnnotationStyle::Secondary => Element::CaretSecondary,
    }
}

/// Writes the rows of `plan` for `group` to `sink`, resolving colors through `style`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn emit(
    group: &FileGroup,
    file: &SourceFile,
    annotations: &[Annotation],
    plan: &Plan,
    severity: Severity,
    style: StyleFn<'_>,
    sink: &mut dyn Sink,
) -> Result<()> {
    let gw = plan.gutter_width;
    let mut label_col: HashMap<usize, usize> = HashMap::new();

    for row in &plan.rows {
        match row {
            Row::Source(line0) => {
                let line_no = line0 + 1;
                write_styled(sink, style(Element::Gutter, severity), &format!("{line_no:>gw$}"))?;
                write_styled(sink, style(Element::Separator, severity), " | ")?;
                write_styled(sink, style(Element::Rail, severity), &rail_prefix(group, group.rail_count, *line0))?;
                write_styled(sink, style(Element::Source, severity), file.line_text(*line0))?;
                sink.write_str("\n")?;
            }
            Row::Elision { sample_line0 } => {
                write_styled(sink, style(Element::Elision, severity), &format!(" {:>gw$}|", "..."))?;
                write_styled(sink, style(Element::Rail, severity), &rail_prefix(group, group.rail_count, *sample_line0))?;
                sink.write_str("\n")?;
            }
            Row::Inline(idx) => {
                let a = &group.annotations[*idx];
                let original = &annotations[a.ann_idx];
                let line0 = a.located.start_line0;
                let prefix = rail_prefix(group, group.rail_count, line0);
                let mut width = prefix.chars().count();
                let pad = pad_to(width, a.located.start.column, ' ');
                width += pad.chars().count();

                write_styled(sink, style(Element::Gutter, severity), &spaces(gw))?;
                write_styled(sink, style(Element::Separator, severity), " | ")?;
                write_styled(sink, style(Element::Rail, severity), &prefix)?;
                sink.write_str(&pad)?;

                let marker = original.style.marker();
                let zero_width = a.located.start == a.located.end;
                let markers = if zero_width {
                    marker.to_string().repeat(2)
                } else {
                    marker.to_string().repeat((a.located.end.column - a.located.start.column) as usize)
                };
                write_styled(sink, style(caret_element(original.style), severity), &markers)?;
                width += markers.chars().count();

                if let Some(label) = &original.label {
                    let lines = label_lines(label);
                    if !zero_width {
                        sink.write_str(" ")?;
                        width += 1;
                    }
                    write_styled(sink, style(Element::Label, severity), lines[0])?;
                    label_col.insert(*idx, width - group.rail_count * 2);
                }
                sink.write_str("\n")?;
            }
            Row::MultiOpen(idx) => {
                let a = &group.annotations[*idx];
                let line0 = a.located.start_line0;
                let rail = a.rail.expect("multi-line annotation must have a rail");
                let (prefix, width) = bend_prefix(group, group.rail_count, line0, rail, false);
                let pad = pad_to(width, a.located.start.column, '_');

                write_styled(sink, style(Element::Gutter, severity), &spaces(gw))?;
                write_styled(sink, style(Element::Separator, severity), " | ")?;
                write_styled(sink, style(Element::Rail, severity), &prefix)?;
                write_styled(sink, style(Element::Rail, severity), &pad)?;
                let ann_style = annotations[a.ann_idx].style;
                write_styled(sink, style(caret_element(ann_style), severity), &ann_style.marker().to_string())?;
                sink.write_str("\n")?;
            }
            Row::MultiClose(idx) => {
                let a = &group.annotations[*idx];
                let line0 = a.located.end_line0;
                let rail = a.rail.expect("multi-line annotation must have a rail");
                let (prefix, width) = bend_prefix(group, group.rail_count, line0, rail, true);
                let pad = pad_to(width, a.located.end.column, '_');
                let mut w = width + pad.chars().count();

                write_styled(sink, style(Element::Gutter, severity), &spaces(gw))?;
                write_styled(sink, style(Element::Separator, severity), " | ")?;
                write_styled(sink, style(Element::Rail, severity), &prefix)?;
                write_styled(sink, style(Element::Rail, severity), &pad)?;

                let ann_style = annotations[a.ann_idx].style;
                write_styled(sink, style(caret_element(ann_style), severity), &ann_style.marker().to_string())?;
                w += 1;

                if let Some(label) = &annotations[a.ann_idx].label {
                    let lines = label_lines(label);
                    sink.write_str(" ")?;
                    w += 1;
                    write_styled(sink, style(Element::Label, severity), lines[0])?;
                    label_col.insert(*idx, w - group.rail_count * 2);
                }
                sink.write_str("\n")?;
            }
            Row::LabelCont { ann_index, cont } => {
                let a = &group.annotations[*ann_index];
                let original = &annotations[a.ann_idx];
                let label = original.label.as_deref().unwrap_or_default();
                let lines = label_lines(label);
                let line0 = a.located.end_line0;
                let indent = *label_col.get(ann_index).unwrap_or(&0);

                write_styled(sink, style(Element::Gutter, severity), &spaces(gw))?;
                write_styled(sink, style(Element::Separator, severity), " | ")?;
                write_styled(sink, style(Element::Rail, severity), &rail_prefix(group, group.rail_count, line0))?;
                sink.write_str(&spaces(indent))?;
                write_styled(sink, style(Element::Label, severity), lines[*cont])?;
                sink.write_str("\n")?;
            }
        }
    }

    Ok(())
}
