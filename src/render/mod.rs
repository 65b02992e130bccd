//! The core layout and rendering engine: turns a [`Diagnostic`](crate::diagnostic::Diagnostic)
//! into text written to a [`Sink`](crate::sink::Sink).
//!
//! Component breakdown, leaves first: [`located`] (byte span -> line/column), [`classify`]
//! (group annotations by file, assign rail columns), [`plan`] (choose lines to print, where
//! to elide, gutter width), [`rows`] (write each row). [`render`] drives all four.

pub mod classify;
pub mod located;
pub mod plan;
pub mod rows;

use crate::diagnostic::Diagnostic;
use crate::error::Result;
use crate::sink::Sink;
use crate::source::SourceMap;
use crate::style::Element;
use rows::StyleFn;

/// Renders `diagnostic` against `sources`, writing to `sink`.
///
/// Diagnostics are rendered independently of one another: this function holds no state across
/// calls, and source files and the diagnostic are only borrowed for the duration of the call.
#[tracing::instrument(level = "debug", skip_all, fields(severity = diagnostic.severity.as_str()))]
pub fn render(
    sources: &SourceMap,
    diagnostic: &Diagnostic,
    style: StyleFn<'_>,
    sink: &mut dyn Sink,
) -> Result<()> {
    let groups = classify::classify(sources, diagnostic)?;

    let header_style = style(Element::Header, diagnostic.severity);
    let header = match &diagnostic.name {
        Some(name) if !name.is_empty() => {
            format!("{}[{}]: {}", diagnostic.severity.as_str(), name, diagnostic.message)
        }
        _ => format!("{}: {}", diagnostic.severity.as_str(), diagnostic.message),
    };
    if header_style == anstyle::Style::new() {
        sink.write_str(&header)?;
    } else {
        sink.write_str(&format!("{header_style}{header}{header_style:#}"))?;
    }
    sink.write_str("\n")?;

    let mut last_gutter_width = 1usize;

    for group in &groups {
        let file = sources.get(group.file)?;
        let file_plan = plan::plan(group, file, &diagnostic.annotations);
        last_gutter_width = file_plan.gutter_width.max(1);

        if let Some(first) = group.annotations.first() {
            let loc = &first.located;
            let locator_style = style(Element::Locator, diagnostic.severity);
            let locator = format!("--> {}:{}:{}", file.path(), loc.start.line, loc.start.column);
            sink.write_str(&" ".repeat(last_gutter_width))?;
            if locator_style == anstyle::Style::new() {
                sink.write_str(&locator)?;
            } else {
                sink.write_str(&format!("{locator_style}{locator}{locator_style:#}"))?;
            }
            sink.write_str("\n")?;
        }

        rows::emit(group, file, &diagnostic.annotations, &file_plan, diagnostic.severity, style, sink)?;
    }

    for note in &diagnostic.notes {
        sink.write_str(&" ".repeat(last_gutter_width + 1))?;
        sink.write_str("= ")?;
        sink.write_str(note)?;
        sink.write_str("\n")?;
    }

    Ok(())
}
