//! End-to-end scenario tests against a fixture this crate defines itself (see
//! `SPEC_FULL.md` §8: the upstream golden fixture text is not part of this repository, so
//! these scenarios are built the same shapes described there -- single-line labelled,
//! single-line multi-line-label, multi-line with elision, multi-line reaching end of file,
//! a short multi-line span, a three-line label with its trailing empty piece dropped, and
//! two inline annotations sharing one line -- against a fixture defined here.

use diagnostic_render::diagnostic::{Annotation, Diagnostic, Severity};
use diagnostic_render::render::render;
use diagnostic_render::sink::StringSink;
use diagnostic_render::source::SourceMap;
use diagnostic_render::span::Span;
use diagnostic_render::style::no_style;

const FIB: &str = "fn fibonacci(n: u32) -> u32 {\n    if n < 2 {\n        return n;\n    }\n    let mut a = 0;\n    let mut b = 1;\n    for _ in 2..=n {\n        let c = a + b;\n        a = b;\n        b = c;\n    }\n    b\n}\n\nfn main() {\n    for i in 0..10 {\n        println!(\"{}\", fibonacci(i));\n    }\n}";

/// Routes `tracing` events emitted by the render path through the test harness's own
/// captured output instead of stdout, so `cargo test -- --nocapture` shows them per-test.
fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn rendered(diagnostic: &Diagnostic, sources: &SourceMap) -> String {
    init_tracing();
    let mut sink = StringSink::new();
    render(sources, diagnostic, &no_style, &mut sink).unwrap();
    sink.into_string()
}

#[test]
fn single_line_labelled() {
    let mut sources = SourceMap::new();
    let file = sources.add("src/path/to/file.something", FIB);

    let mut d = Diagnostic::new(Severity::Error, "Test message");
    d.name = Some("test/one/singleline/1/labelled".to_string());
    d.annotations.push(Annotation::primary(file, Span::new(0, 3)).with_label("annotation 1"));

    let out = rendered(&d, &sources);
    assert_eq!(
        out,
        "error[test/one/singleline/1/labelled]: Test message\n\
         \x20 --> src/path/to/file.something:1:1\n\
         1 | fn fibonacci(n: u32) -> u32 {\n\
         \x20 | ^^^ annotation 1\n\
         2 |     if n < 2 {\n"
    );
}

#[test]
fn single_line_multiline_label() {
    let mut sources = SourceMap::new();
    let file = sources.add("src/path/to/file.something", FIB);

    let mut d = Diagnostic::new(Severity::Error, "Test message");
    d.annotations
        .push(Annotation::primary(file, Span::new(0, 3)).with_label("annotation 1\nsecond line"));

    let out = rendered(&d, &sources);
    assert_eq!(
        out,
        "error: Test message\n\
         \x20 --> src/path/to/file.something:1:1\n\
         1 | fn fibonacci(n: u32) -> u32 {\n\
         \x20 | ^^^ annotation 1\n\
         \x20 |     second line\n\
         2 |     if n < 2 {\n"
    );
}

#[test]
fn zero_width_labelled_primary() {
    let mut sources = SourceMap::new();
    let file = sources.add("src/path/to/file.something", FIB);

    let mut d = Diagnostic::new(Severity::Error, "Test message");
    d.annotations.push(Annotation::primary(file, Span::at(5)).with_label("annotation 1"));

    let out = rendered(&d, &sources);
    // No space between the caret run and the label for a zero-width annotation.
    assert_eq!(
        out,
        "error: Test message\n\
         \x20 --> src/path/to/file.something:1:6\n\
         1 | fn fibonacci(n: u32) -> u32 {\n\
         \x20 |      ^^annotation 1\n\
         2 |     if n < 2 {\n"
    );
}

#[test]
fn zero_width_labelled_secondary() {
    let mut sources = SourceMap::new();
    let file = sources.add("src/path/to/file.something", FIB);

    let mut d = Diagnostic::new(Severity::Warning, "Test message");
    d.annotations.push(Annotation::secondary(file, Span::at(5)).with_label("annotation 1"));

    let out = rendered(&d, &sources);
    assert_eq!(
        out,
        "warning: Test message\n\
         \x20 --> src/path/to/file.something:1:6\n\
         1 | fn fibonacci(n: u32) -> u32 {\n\
         \x20 |      --annotation 1\n\
         2 |     if n < 2 {\n"
    );
}

#[test]
fn short_multiline_span_no_intermediate_lines() {
    let mut sources = SourceMap::new();
    let file = sources.add("src/path/to/file.something", FIB);

    // Covers all of lines 5 and 6 ("    let mut a = 0;" / "    let mut b = 1;").
    let mut d = Diagnostic::new(Severity::Error, "Test message");
    d.annotations.push(Annotation::primary(file, Span::new(69, 106)).with_label("annotation 1"));

    let out = rendered(&d, &sources);
    assert_eq!(
        out,
        "error: Test message\n\
         \x20 --> src/path/to/file.something:5:1\n\
         4 |       }\n\
         5 | |     let mut a = 0;\n\
         \x20 |  _^\n\
         6 | |     let mut b = 1;\n\
         \x20 | |_________________^ annotation 1\n\
         7 |       for _ in 2..=n {\n"
    );
}

#[test]
fn three_line_label_drops_trailing_empty_line() {
    let mut sources = SourceMap::new();
    let file = sources.add("src/path/to/file.something", FIB);

    let mut d = Diagnostic::new(Severity::Error, "Test message");
    d.name = Some("test/end-to-end/labelled-multiline".to_string());
    d.annotations.push(
        Annotation::primary(file, Span::new(69, 87))
            .with_label("annotation 1\nsecond line\nthird line\n"),
    );

    let out = rendered(&d, &sources);
    assert_eq!(
        out,
        "error[test/end-to-end/labelled-multiline]: Test message\n\
         \x20 --> src/path/to/file.something:5:1\n\
         4 |     }\n\
         5 |     let mut a = 0;\n\
         \x20 | ^^^^^^^^^^^^^^^^^^ annotation 1\n\
         \x20 |                    second line\n\
         \x20 |                    third line\n\
         6 |     let mut b = 1;\n"
    );
    // No fourth, empty continuation row: three rows total for this annotation (caret + 2 conts).
    assert_eq!(out.matches("line\n").count(), 2);
}

#[test]
fn two_inline_annotations_on_one_line_ordered_by_column() {
    let mut sources = SourceMap::new();
    let file = sources.add("src/path/to/file.something", FIB);

    let mut d = Diagnostic::new(Severity::Error, "Test message");
    // Both spans start at column 1 (byte 45 is the first byte of line 3); the shorter
    // secondary span draws first because ties on start column break on end column.
    d.annotations.push(Annotation::secondary(file, Span::new(45, 51)).with_label("call"));
    d.annotations.push(Annotation::primary(file, Span::new(45, 62)).with_label("whole stmt"));

    let out = rendered(&d, &sources);
    assert_eq!(
        out,
        "error: Test message\n\
         \x20 --> src/path/to/file.something:3:1\n\
         2 |     if n < 2 {\n\
         3 |         return n;\n\
         \x20 | ------ call\n\
         \x20 | ^^^^^^^^^^^^^^^^^ whole stmt\n\
         4 |     }\n"
    );
}

#[test]
fn multiline_span_with_elision() {
    let mut sources = SourceMap::new();
    let file = sources.add("src/path/to/file.something", FIB);

    // Spans line 1 through line 9, far enough apart that the middle lines are elided.
    let mut d = Diagnostic::new(Severity::Error, "Test message");
    d.name = Some("test/multi/elision".to_string());
    d.annotations.push(Annotation::primary(file, Span::new(0, 165)).with_label("annotation 1"));

    let out = rendered(&d, &sources);
    assert_eq!(
        out,
        "error[test/multi/elision]: Test message\n\
         \x20 --> src/path/to/file.something:1:1\n\
         \x201 | | fn fibonacci(n: u32) -> u32 {\n\
         \x20  |  _^\n\
         \x20...|| \n\
         \x209 | |         a = b;\n\
         \x20  | |_____________^ annotation 1\n\
         10 |           b = c;\n"
    );
}

#[test]
fn multiline_span_reaching_end_of_file_widens_gutter() {
    let mut sources = SourceMap::new();
    let file = sources.add("src/path/to/file.something", FIB);

    let mut d = Diagnostic::new(Severity::Error, "Test message");
    d.name = Some("test/multi/eof".to_string());
    d.annotations.push(Annotation::primary(file, Span::new(0, 274)).with_label("annotation 1"));

    let out = rendered(&d, &sources);
    assert_eq!(
        out,
        "error[test/multi/eof]: Test message\n\
         \x20 --> src/path/to/file.something:1:1\n\
         \x201 | | fn fibonacci(n: u32) -> u32 {\n\
         \x20  |  _^\n\
         \x20...|| \n\
         19 | | }\n\
         \x20  | |_^ annotation 1\n"
    );
}

#[test]
fn notes_follow_the_last_file_group() {
    let mut sources = SourceMap::new();
    let file = sources.add("src/path/to/file.something", FIB);

    let mut d = Diagnostic::new(Severity::Error, "Test message");
    d.annotations.push(Annotation::primary(file, Span::new(0, 3)).with_label("annotation 1"));
    d.notes.push("first note".to_string());
    d.notes.push("try this instead".to_string());

    let out = rendered(&d, &sources);
    assert_eq!(
        out,
        "error: Test message\n\
         \x20 --> src/path/to/file.something:1:1\n\
         1 | fn fibonacci(n: u32) -> u32 {\n\
         \x20 | ^^^ annotation 1\n\
         2 |     if n < 2 {\n\
         \x20 = first note\n\
         \x20 = try this instead\n"
    );
}

#[test]
fn unknown_file_id_is_an_error() {
    init_tracing();
    let sources = SourceMap::new();
    let mut d = Diagnostic::new(Severity::Error, "Test message");
    d.annotations.push(Annotation::primary(99, Span::new(0, 3)));

    let mut sink = StringSink::new();
    let err = render(&sources, &d, &no_style, &mut sink).unwrap_err();
    assert!(matches!(err, diagnostic_render::error::RenderError::UnknownFile(99)));
}

#[test]
fn invalid_span_is_an_error() {
    init_tracing();
    let mut sources = SourceMap::new();
    let file = sources.add("f", "abc");
    let mut d = Diagnostic::new(Severity::Error, "Test message");
    d.annotations.push(Annotation::primary(file, Span::new(2, 1)));

    let mut sink = StringSink::new();
    let err = render(&sources, &d, &no_style, &mut sink).unwrap_err();
    assert!(matches!(err, diagnostic_render::error::RenderError::InvalidSpan { .. }));
}

#[test]
fn rerendering_is_byte_identical() {
    let mut sources = SourceMap::new();
    let file = sources.add("src/path/to/file.something", FIB);
    let mut d = Diagnostic::new(Severity::Error, "Test message");
    d.annotations.push(Annotation::primary(file, Span::new(0, 3)).with_label("annotation 1"));

    let once = rendered(&d, &sources);
    let twice = rendered(&d, &sources);
    assert_eq!(once, twice);
}

#[test]
fn removing_secondary_annotation_preserves_other_rows() {
    let mut sources = SourceMap::new();
    let file = sources.add("src/path/to/file.something", FIB);
    let mut d_with = Diagnostic::new(Severity::Error, "Test message");
    d_with.annotations.push(Annotation::primary(file, Span::new(0, 3)).with_label("annotation 1"));
    d_with.annotations.push(Annotation::secondary(file, Span::new(45, 51)).with_label("other"));

    let mut d_without = Diagnostic::new(Severity::Error, "Test message");
    d_without.annotations.push(Annotation::primary(file, Span::new(0, 3)).with_label("annotation 1"));

    // Removing a secondary annotation that touches a different line only removes its own
    // rows; it does not reflow the primary annotation's own row.
    let with_out = rendered(&d_with, &sources);
    let without_out = rendered(&d_without, &sources);
    let first_four_lines = |s: &str| s.lines().take(4).collect::<Vec<_>>().join("\n");
    assert_eq!(first_four_lines(&with_out), first_four_lines(&without_out));
}

#[test]
fn diagnostic_without_name_omits_brackets() {
    let mut sources = SourceMap::new();
    let file = sources.add("f", "abc\n");
    let mut d = Diagnostic::new(Severity::Help, "just a message");
    d.annotations.push(Annotation::primary(file, Span::new(0, 1)));

    let out = rendered(&d, &sources);
    assert!(out.starts_with("help: just a message\n"));
}

