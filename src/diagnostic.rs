//! The public diagnostic construction surface.
//!
//! Deliberately an explicit configuration record rather than a fluent `with_*` builder: every
//! field a diagnostic needs is already known by the time the caller has one to build, and a
//! record keeps construction sites a single literal instead of a chain of calls.

use crate::span::Span;

/// Severity of a diagnostic. Also selects its default color via the [style
/// collaborator](crate::style).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Error,
    Warning,
    Note,
    Help,
    Bug,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Note => "note",
            Self::Help => "help",
            Self::Bug => "bug",
        }
    }
}

/// Whether an annotation is drawn with carets (`^`, primary) or dashes (`-`, secondary).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationStyle {
    Primary,
    Secondary,
}

impl AnnotationStyle {
    pub(crate) fn marker(self) -> char {
        match self {
            Self::Primary => '^',
            Self::Secondary => '-',
        }
    }
}

/// A single annotation: a span into one file, with an optional label and a style that
/// decides how it is drawn.
#[derive(Debug, Clone)]
pub struct Annotation {
    pub file: u32,
    pub span: Span,
    pub label: Option<String>,
    pub style: AnnotationStyle,
}

impl Annotation {
    pub fn primary(file: u32, span: Span) -> Self {
        Self { file, span, label: None, style: AnnotationStyle::Primary }
    }

    pub fn secondary(file: u32, span: Span) -> Self {
        Self { file, span, label: None, style: AnnotationStyle::Secondary }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A diagnostic ready to be rendered: a severity, an optional short name, a message, an
/// ordered set of annotations (which may span multiple files), and trailing notes.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub name: Option<String>,
    pub message: String,
    pub annotations: Vec<Annotation>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            name: None,
            message: message.into(),
            annotations: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }
}
