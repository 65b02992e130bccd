use std::io;

/// Errors that can occur while rendering a diagnostic.
///
/// No error kind here is recovered from silently: a malformed input (an invalid span or an
/// annotation referencing an unknown file) is a programmer error at the call site, and a
/// render is aborted rather than producing partial or best-effort output.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("invalid span {start}..{end} (source has {len} bytes)")]
    InvalidSpan { start: u32, end: u32, len: u32 },

    #[error("annotation references unknown file id {0}")]
    UnknownFile(u32),

    #[error("failed to write rendered diagnostic")]
    Sink(#[source] io::Error),
}

impl From<io::Error> for RenderError {
    fn from(e: io::Error) -> Self {
        Self::Sink(e)
    }
}

pub type Result<T = (), E = RenderError> = std::result::Result<T, E>;
