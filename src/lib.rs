#![doc = include_str!("../README.md")]

#[macro_use]
extern crate tracing;

pub mod config;
pub mod diagnostic;
pub mod error;
pub mod render;
pub mod sink;
pub mod source;
pub mod span;
pub mod style;

pub use config::{render_to, RenderConfig};
pub use diagnostic::{Annotation, AnnotationStyle, Diagnostic, Severity};
pub use error::{RenderError, Result};
pub use render::render;
pub use sink::Sink;
pub use source::{SourceFile, SourceMap};
pub use span::Span;
pub use style::{style_for, Element};

pub use anstream::ColorChoice;
