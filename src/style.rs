//! Color resolution: maps a diagnostic element and severity to an [`anstyle::Style`].
//!
//! The renderer never probes the terminal itself; the caller passes an explicit
//! [`anstream::ColorChoice`] that the [sink](crate::sink) resolves once, up front.

use anstyle::{AnsiColor, Color, Style};

use crate::diagnostic::Severity;

const fn intense(color: AnsiColor) -> Color {
    Color::Ansi(color.bright(true))
}

/// The element of a rendered diagnostic a style is being requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Header,
    Locator,
    Gutter,
    Separator,
    Rail,
    CaretPrimary,
    CaretSecondary,
    Label,
    Elision,
    Source,
}

impl Severity {
    const fn ansi_color(self) -> Option<AnsiColor> {
        match self {
            Self::Error | Self::Bug => Some(AnsiColor::Red),
            Self::Warning => Some(AnsiColor::Yellow),
            Self::Note => Some(AnsiColor::Green),
            Self::Help => Some(AnsiColor::Cyan),
        }
    }

    const fn color(self) -> Option<Color> {
        match self.ansi_color() {
            Some(c) => Some(intense(c)),
            None => None,
        }
    }
}

/// Resolves the style for `element` under `severity`.
///
/// This is the crate's one shippable color policy; a caller who wants a different palette can
/// write their own function of this same shape and drive [`crate::render`] with it directly,
/// since the core only ever calls through this signature.
pub fn style_for(element: Element, severity: Severity) -> Style {
    const BRIGHT_BLUE: Color = intense(AnsiColor::Blue);

    let s = Style::new();
    match element {
        Element::Header => s.fg_color(severity.color()).bold(),
        Element::Locator => s.fg_color(Some(BRIGHT_BLUE)).bold(),
        Element::Gutter => s.fg_color(Some(BRIGHT_BLUE)).bold(),
        Element::Separator => s.fg_color(Some(BRIGHT_BLUE)).bold(),
        Element::Rail => s.fg_color(Some(BRIGHT_BLUE)).bold(),
        Element::CaretPrimary => s.fg_color(severity.color()).bold(),
        Element::CaretSecondary => s.fg_color(Some(BRIGHT_BLUE)).bold(),
        Element::Label => s.fg_color(severity.color()).bold(),
        Element::Elision => s.fg_color(Some(BRIGHT_BLUE)).bold(),
        Element::Source => s,
    }
}

/// A no-op resolver that always returns an empty style, for uncolorized output.
pub fn no_style(_element: Element, _severity: Severity) -> Style {
    Style::new()
}
