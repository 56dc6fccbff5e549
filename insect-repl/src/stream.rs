//! Non-interactive consumption of piped input

use std::io::Write;

use insect_core::{Evaluator, Format, MessageKind};
use tracing::debug;

use crate::error::ReplResult;
use crate::processor::LineProcessor;
use crate::source::LineSource;

/// Evaluate lines until end of input, the first error or `quit`.
///
/// Only values are printed. An error is written to `err` and ends the run
/// with status 1; no later line is read.
pub fn run<E: Evaluator>(
    processor: &mut LineProcessor<E>,
    source: &mut impl LineSource,
    out: &mut impl Write,
    err: &mut impl Write,
) -> ReplResult<i32> {
    while let Some(line) = source.next_line()? {
        let Some(response) = processor.process(Format::Plain, &line) else {
            continue;
        };
        match response.kind {
            MessageKind::Value => writeln!(out, "{}", response.msg)?,
            MessageKind::Error => {
                writeln!(err, "{}", response.msg)?;
                debug!("stopping at first error");
                return Ok(1);
            }
            MessageKind::Quit => return Ok(0),
            _ => {}
        }
    }
    Ok(0)
}
