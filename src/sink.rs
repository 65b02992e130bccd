//! Output sinks the renderer writes bytes to.

use std::io::{self, Write};

use anstream::{AutoStream, ColorChoice};

/// A destination for rendered bytes.
///
/// The renderer writes exactly the bytes the [row emitter](crate::render) produces, plus a
/// terminating newline per diagnostic; it performs no buffering policy of its own.
pub trait Sink {
    fn write_str(&mut self, s: &str) -> io::Result<()>;
}

impl<W: Write> Sink for AutoStream<W> {
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.write_all(s.as_bytes())
    }
}

/// Wraps any [`std::io::Write`] writer as a [`Sink`], resolving `color` once up front rather
/// than probing the writer's terminal-ness internally.
pub fn wrap<W: Write>(writer: W, color: ColorChoice) -> AutoStream<W> {
    AutoStream::new(writer, color)
}

/// An in-memory sink, for embedding the renderer or for tests that check the literal output.
#[derive(Debug, Default)]
pub struct StringSink {
    buf: String,
}

impl StringSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_string(self) -> String {
        self.buf
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }
}

impl Sink for StringSink {
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.buf.push_str(s);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_sink_accumulates() {
        let mut sink = StringSink::new();
        sink.write_str("a").unwrap();
        sink.write_str("b").unwrap();
        assert_eq!(sink.into_string(), "ab");
    }
}
