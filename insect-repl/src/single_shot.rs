//! One expression from the command line, then exit

use std::io::Write;

use insect_core::{Evaluator, Format, MessageKind};

use crate::error::ReplResult;
use crate::processor::LineProcessor;

/// Evaluate `line` once.
///
/// Values and info go to `out`, errors to `err`. The exit status is 0 even
/// when the expression fails.
pub fn run<E: Evaluator>(
    processor: &mut LineProcessor<E>,
    line: &str,
    out: &mut impl Write,
    err: &mut impl Write,
) -> ReplResult<i32> {
    if let Some(response) = processor.process(Format::Plain, line) {
        match response.kind {
            MessageKind::Value | MessageKind::Info => writeln!(out, "{}", response.msg)?,
            MessageKind::Error => writeln!(err, "{}", response.msg)?,
            _ => {}
        }
    }
    Ok(0)
}
