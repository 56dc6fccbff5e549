//! Wiring a chosen mode to its input and output

use std::io;

use insect_core::Evaluator;
use tracing::{debug, error};

use crate::clipboard::SystemClipboard;
use crate::config::ReplConfig;
use crate::dispatch::Mode;
use crate::editor::EditorSource;
use crate::error::{ReplError, ReplResult};
use crate::processor::LineProcessor;
use crate::rc;
use crate::session::InteractiveSession;
use crate::single_shot;
use crate::source::ReaderSource;
use crate::stream;

/// One insect process: configuration plus the line processor all modes share
pub struct Repl<E> {
    config: ReplConfig,
    processor: LineProcessor<E>,
}

impl<E: Evaluator> Repl<E> {
    pub fn new(config: ReplConfig, evaluator: E) -> Self {
        Self {
            config,
            processor: LineProcessor::new(evaluator),
        }
    }

    pub fn processor(&self) -> &LineProcessor<E> {
        &self.processor
    }

    /// Run `mode` against the process's standard streams and return the exit status
    pub fn run(&mut self, mode: Mode) -> ReplResult<i32> {
        debug!(?mode, "starting");
        let stdout = io::stdout();
        let stderr = io::stderr();

        match mode {
            Mode::SingleShot(line) => single_shot::run(
                &mut self.processor,
                &line,
                &mut stdout.lock(),
                &mut stderr.lock(),
            ),
            Mode::Stream => {
                if let Some(code) = self.startup()? {
                    return Ok(code);
                }
                let stdin = io::stdin();
                let mut source = ReaderSource::new(stdin.lock());
                stream::run(
                    &mut self.processor,
                    &mut source,
                    &mut stdout.lock(),
                    &mut stderr.lock(),
                )
            }
            Mode::Interactive => {
                if let Some(code) = self.startup()? {
                    return Ok(code);
                }
                let source = EditorSource::new(&self.config)?;
                let mut session = InteractiveSession::new(source, SystemClipboard::new());
                session.run(&mut self.processor, &mut io::stdout(), &mut io::stderr())
            }
        }
    }

    /// Evaluate the startup file if enabled.
    ///
    /// Returns the exit status to stop with when a line in it fails.
    pub fn startup(&mut self) -> ReplResult<Option<i32>> {
        if !self.config.load_rc {
            debug!("startup file disabled");
            return Ok(None);
        }
        let Some(path) = self.config.rc_file.clone() else {
            return Ok(None);
        };

        match rc::bootstrap(&mut self.processor, &path) {
            Ok(()) => Ok(None),
            Err(ReplError::Startup { path, message }) => {
                error!(path = %path.display(), "startup file failed");
                eprintln!("{}", message);
                Ok(Some(1))
            }
            Err(e) => Err(e),
        }
    }
}
