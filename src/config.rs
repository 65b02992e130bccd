//! A small, explicit configuration record for rendering, plus a convenience entry point that
//! wires a [`SourceMap`], a [`Diagnostic`], and a writer together without the caller having to
//! pick a [`style_for`]/[`no_style`] function or wrap the writer in an [`AutoStream`] by hand.
//!
//! This is the full extent of configuration the crate needs: it has no filesystem, network, or
//! plugin surface, so there is nothing here beyond the one real knob a caller has -- whether to
//! colorize.

use std::io::Write;

use anstream::{AutoStream, ColorChoice};

use crate::diagnostic::Diagnostic;
use crate::error::Result;
use crate::render;
use crate::sink;
use crate::source::SourceMap;
use crate::style;

/// Rendering configuration.
///
/// Mirrors the shape of the teacher crate's `HumanEmitter::new`/`stderr` constructors, which
/// take an explicit [`ColorChoice`] rather than probing the terminal themselves.
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    pub color: ColorChoice,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { color: ColorChoice::Auto }
    }
}

impl RenderConfig {
    pub fn new(color: ColorChoice) -> Self {
        Self { color }
    }

    /// Never emit ANSI styling, regardless of the writer.
    pub fn plain() -> Self {
        Self { color: ColorChoice::Never }
    }
}

/// Renders `diagnostic` against `sources` to `writer`, resolving colors according to `config`.
///
/// `writer` is wrapped in an [`AutoStream`] so that a [`ColorChoice::Auto`] caller still gets
/// colorized output on a real terminal; the core itself never probes `writer` for terminal-ness.
#[tracing::instrument(level = "debug", skip_all)]
pub fn render_to<W: Write>(
    sources: &SourceMap,
    diagnostic: &Diagnostic,
    config: &RenderConfig,
    writer: W,
) -> Result<()> {
    let mut stream: AutoStream<W> = sink::wrap(writer, config.color);
    let style_fn = if matches!(config.color, ColorChoice::Never) {
        &style::no_style as render::rows::StyleFn<'_>
    } else {
        &style::style_for as render::rows::StyleFn<'_>
    };
    render::render(sources, diagnostic, style_fn, &mut stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::{Annotation, Diagnostic, Severity};
    use crate::span::Span;

    #[test]
    fn plain_config_never_colorizes() {
        let mut sources = SourceMap::new();
        let f = sources.add("f.rs", "abc\n");
        let mut d = Diagnostic::error("msg");
        d.annotations.push(Annotation::primary(f, Span::new(0, 1)));

        let mut buf = Vec::new();
        render_to(&sources, &d, &RenderConfig::plain(), &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(!out.contains('\u{1b}'));
        assert!(out.starts_with("error: msg\n"));
    }
}
