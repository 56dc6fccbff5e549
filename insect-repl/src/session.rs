//! The interactive prompt loop

use std::io::Write;

use insect_core::{Evaluator, Format, MessageKind};
use tracing::warn;

use crate::clipboard::ClipboardSink;
use crate::completer::Vocabulary;
use crate::error::ReplResult;
use crate::processor::LineProcessor;
use crate::source::LineSource;

/// Erase the display and move the cursor home
pub const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Prompt, evaluate, dispatch, repeat, until `quit` or end of input
pub struct InteractiveSession<S, C> {
    source: S,
    clipboard: C,
}

impl<S: LineSource, C: ClipboardSink> InteractiveSession<S, C> {
    pub fn new(source: S, clipboard: C) -> Self {
        Self { source, clipboard }
    }

    /// Run the session to completion and return the exit status.
    ///
    /// Errors in evaluated lines are reported and the session goes on.
    pub fn run<E: Evaluator>(
        &mut self,
        processor: &mut LineProcessor<E>,
        out: &mut impl Write,
        err: &mut impl Write,
    ) -> ReplResult<i32> {
        loop {
            let vocabulary = Vocabulary::collect(processor.evaluator(), processor.environment());
            self.source.refresh_completions(vocabulary);

            let Some(line) = self.source.next_line()? else {
                return Ok(0);
            };
            let Some(response) = processor.process(Format::Console, &line) else {
                continue;
            };

            match response.kind {
                MessageKind::Quit => return Ok(0),
                MessageKind::Clear => {
                    write!(out, "{}", CLEAR_SCREEN)?;
                    out.flush()?;
                }
                MessageKind::Copy => self.copy(&response.msg, out, err)?,
                MessageKind::Error => writeln!(err, "{}\n", response.msg)?,
                MessageKind::Value | MessageKind::ValueSet | MessageKind::Info => {
                    writeln!(out, "{}\n", response.msg)?
                }
            }
        }
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    fn copy(&mut self, text: &str, out: &mut impl Write, err: &mut impl Write) -> ReplResult<()> {
        if text.is_empty() {
            writeln!(out, "\nNo result to copy.\n")?;
            return Ok(());
        }

        match self.clipboard.set_text(text) {
            Ok(()) => writeln!(out, "\nCopied result '{}' to clipboard.\n", text)?,
            Err(e) => {
                warn!(error = %e, "copy failed");
                writeln!(err, "\n{}\n", e)?;
            }
        }
        Ok(())
    }
}
