//! Integration tests for the insect front end

use std::collections::VecDeque;
use std::fs;
use std::io::Cursor;

use insect_core::{Calculator, Environment, Evaluator, Format, MessageKind};
use insect_repl::rc::bootstrap;
use insect_repl::session::CLEAR_SCREEN;
use insect_repl::{
    single_shot, stream, ClipboardSink, InteractiveSession, LineProcessor, LineSource,
    ReaderSource, ReplError, ReplResult, Vocabulary,
};
use tempfile::TempDir;

/// Keyboard stand-in that replays fixed lines
struct ScriptedSource {
    lines: VecDeque<String>,
    refreshes: Vec<Vocabulary>,
}

impl ScriptedSource {
    fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|s| s.to_string()).collect(),
            refreshes: Vec::new(),
        }
    }
}

impl LineSource for ScriptedSource {
    fn next_line(&mut self) -> ReplResult<Option<String>> {
        Ok(self.lines.pop_front())
    }

    fn refresh_completions(&mut self, vocabulary: Vocabulary) {
        self.refreshes.push(vocabulary);
    }
}

#[derive(Default)]
struct FakeClipboard {
    contents: Option<String>,
    calls: usize,
}

impl ClipboardSink for FakeClipboard {
    fn set_text(&mut self, text: &str) -> ReplResult<()> {
        self.calls += 1;
        self.contents = Some(text.to_string());
        Ok(())
    }
}

struct BrokenClipboard;

impl ClipboardSink for BrokenClipboard {
    fn set_text(&mut self, _text: &str) -> ReplResult<()> {
        Err(ReplError::Clipboard("no display".to_string()))
    }
}

struct Output {
    code: i32,
    out: String,
    err: String,
}

fn run_session<C: ClipboardSink>(
    lines: &[&str],
    clipboard: C,
) -> (Output, InteractiveSession<ScriptedSource, C>) {
    let mut processor = LineProcessor::new(Calculator::new());
    let mut session = InteractiveSession::new(ScriptedSource::new(lines), clipboard);
    let (mut out, mut err) = (Vec::new(), Vec::new());
    let code = session.run(&mut processor, &mut out, &mut err).unwrap();
    let output = Output {
        code,
        out: String::from_utf8(out).unwrap(),
        err: String::from_utf8(err).unwrap(),
    };
    (output, session)
}

fn run_stream(processor: &mut LineProcessor<Calculator>, input: &str) -> Output {
    let mut source = ReaderSource::new(Cursor::new(input.to_string()));
    let (mut out, mut err) = (Vec::new(), Vec::new());
    let code = stream::run(processor, &mut source, &mut out, &mut err).unwrap();
    Output {
        code,
        out: String::from_utf8(out).unwrap(),
        err: String::from_utf8(err).unwrap(),
    }
}

#[test]
fn test_trivial_lines_change_nothing() {
    let mut processor = LineProcessor::new(Calculator::new());
    processor.process(Format::Plain, "a = 2");
    let before = processor.environment().clone();

    for line in ["", "   ", "# a = 5", "  # b = 1"] {
        assert!(processor.process(Format::Plain, line).is_none());
    }
    assert_eq!(processor.environment(), &before);
}

#[test]
fn test_stream_uses_earlier_assignments() {
    let mut processor = LineProcessor::new(Calculator::new());
    let output = run_stream(&mut processor, "a = 2\na * 3\n");
    assert_eq!(output.code, 0);
    assert_eq!(output.out, "6\n");
    assert!(output.err.is_empty());
}

#[test]
fn test_stream_halts_on_first_error() {
    let mut processor = LineProcessor::new(Calculator::new());
    let output = run_stream(&mut processor, "1/0bad\n2+2\n");
    assert_eq!(output.code, 1);
    assert!(output.out.is_empty());
    assert_eq!(output.err, "Unknown identifier: 'bad'\n");
    assert!(processor.environment().last_result().is_none());
}

#[test]
fn test_single_shot_empty_argument() {
    let mut processor = LineProcessor::new(Calculator::new());
    let (mut out, mut err) = (Vec::new(), Vec::new());
    let code = single_shot::run(&mut processor, "", &mut out, &mut err).unwrap();
    assert_eq!(code, 0);
    assert!(out.is_empty());
    assert!(err.is_empty());
}

#[test]
fn test_stream_and_single_shot_agree() {
    let lines = [
        "width = 3 m",
        "height = 2 m",
        "area = width * height",
        "speed = 100 km/h",
    ];

    let mut streamed = LineProcessor::new(Calculator::new());
    let output = run_stream(&mut streamed, &lines.join("\n"));
    assert_eq!(output.code, 0);

    let mut single = LineProcessor::new(Calculator::new());
    for line in lines {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        single_shot::run(&mut single, line, &mut out, &mut err).unwrap();
    }

    assert_eq!(streamed.environment(), single.environment());
    let area = streamed.process(Format::Plain, "area").unwrap();
    assert_eq!(area.msg, "6 m^2");
}

#[test]
fn test_session_quit() {
    let (output, session) = run_session(
        &["x = 4", "2 m + 1 s", "quit", "12345 * 2"],
        FakeClipboard::default(),
    );
    assert_eq!(output.code, 0);
    assert!(output.err.contains("Conversion error"));
    assert!(!output.out.contains("24690"));
    assert_eq!(session.clipboard().calls, 0);
}

#[test]
fn test_session_end_of_input() {
    let (output, _) = run_session(&["1 + 1"], FakeClipboard::default());
    assert_eq!(output.code, 0);
    assert!(output.out.contains('2'));
    assert!(output.out.ends_with("\n\n"));
}

#[test]
fn test_session_copy_without_value() {
    let (output, session) = run_session(&["copy"], FakeClipboard::default());
    assert_eq!(output.code, 0);
    assert!(output.out.contains("No result to copy."));
    assert_eq!(session.clipboard().calls, 0);
    assert!(session.clipboard().contents.is_none());
}

#[test]
fn test_session_copy_last_value() {
    let (output, session) = run_session(&["3 km + 500 m", "copy"], FakeClipboard::default());
    assert!(output.out.contains("Copied result '3.5 km' to clipboard."));
    assert_eq!(session.clipboard().contents.as_deref(), Some("3.5 km"));
}

#[test]
fn test_session_copy_failure_continues() {
    let (output, _) = run_session(&["2", "copy", "3 + 3"], BrokenClipboard);
    assert_eq!(output.code, 0);
    assert!(output.err.contains("no display"));
    assert!(output.out.contains('6'));
}

#[test]
fn test_session_clear_screen() {
    let (output, _) = run_session(&["clear"], FakeClipboard::default());
    assert_eq!(output.out, CLEAR_SCREEN);
}

#[test]
fn test_session_refreshes_completions() {
    let mut processor = LineProcessor::new(Calculator::new());
    let mut source = ScriptedSource::new(&["distance = 5 km"]);
    let mut session = InteractiveSession::new(&mut source, FakeClipboard::default());
    let (mut out, mut err) = (Vec::new(), Vec::new());
    session.run(&mut processor, &mut out, &mut err).unwrap();
    drop(session);

    // One refresh per prompt, the last one sees the new binding
    assert_eq!(source.refreshes.len(), 2);
    assert!(!source.refreshes[0].words().contains(&"distance".to_string()));
    assert!(source.refreshes[1].words().contains(&"distance".to_string()));
}

#[test]
fn test_rc_missing_file() {
    let dir = TempDir::new().unwrap();
    let mut processor = LineProcessor::new(Calculator::new());
    bootstrap(&mut processor, &dir.path().join("absent")).unwrap();
    assert_eq!(processor.environment(), &Calculator::new().initial_environment());
}

#[test]
fn test_rc_lines_in_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".insectrc");
    fs::write(
        &path,
        "# constants\nlength = 2 m\n\ndouble(x) = 2 x\narea = double(length) * length\n",
    )
    .unwrap();

    let mut processor = LineProcessor::new(Calculator::new());
    bootstrap(&mut processor, &path).unwrap();

    let response = processor.process(Format::Plain, "area").unwrap();
    assert_eq!(response.kind, MessageKind::Value);
    assert_eq!(response.msg, "8 m^2");
}

#[test]
fn test_rc_error_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".insectrc");
    fs::write(&path, "a = 1\nb = a + 1 m\nc = 3\n").unwrap();

    let mut processor = LineProcessor::new(Calculator::new());
    match bootstrap(&mut processor, &path) {
        Err(ReplError::Startup { path: failed, message }) => {
            assert_eq!(failed, path);
            assert!(message.starts_with("Conversion error"));
        }
        other => panic!("expected startup error, got {:?}", other),
    }
    assert!(processor.environment().value("c").is_none());
}

#[test]
fn test_rc_unreadable_path_propagates() {
    let dir = TempDir::new().unwrap();
    let mut processor = LineProcessor::new(Calculator::new());
    // A directory cannot be read as a startup file
    let result = bootstrap(&mut processor, dir.path());
    assert!(matches!(result, Err(ReplError::Io(_))));
    assert_eq!(processor.environment(), &Environment::initial());
}

#[test]
fn test_stream_reports_unrepresentable_input() {
    let mut processor = LineProcessor::new(Calculator::new());
    let output = run_stream(&mut processor, "x = m^2147483647\nx * m\n1 + 1\n");
    assert_eq!(output.code, 1);
    assert!(output.out.is_empty());
    assert_eq!(output.err, "Unit exponent out of range\n");

    let mut processor = LineProcessor::new(Calculator::new());
    let nested = format!("{}1{}\n2 + 2\n", "(".repeat(100_000), ")".repeat(100_000));
    let output = run_stream(&mut processor, &nested);
    assert_eq!(output.code, 1);
    assert!(output.err.starts_with("Parse error"));
}
