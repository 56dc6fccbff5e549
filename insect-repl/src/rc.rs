//! Evaluation of the per-user startup file

use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;

use insect_core::{Evaluator, Format, MessageKind};
use tracing::{debug, info};

use crate::error::{ReplError, ReplResult};
use crate::processor::LineProcessor;
use crate::source::{LineSource, ReaderSource};

/// Run every line of the startup file through the processor, in file order.
///
/// A missing file is skipped. Any other I/O failure propagates, and the
/// first line that evaluates to an error stops the bootstrap with
/// `ReplError::Startup`.
pub fn bootstrap<E: Evaluator>(processor: &mut LineProcessor<E>, path: &Path) -> ReplResult<()> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no startup file");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let mut source = ReaderSource::new(BufReader::new(file));
    let mut count = 0usize;
    while let Some(line) = source.next_line()? {
        let Some(response) = processor.process(Format::Plain, &line) else {
            continue;
        };
        count += 1;
        if response.kind == MessageKind::Error {
            return Err(ReplError::Startup {
                path: path.to_path_buf(),
                message: response.msg,
            });
        }
    }

    info!(path = %path.display(), lines = count, "loaded startup file");
    Ok(())
}
