//! Where input lines come from

use std::io::BufRead;

use crate::completer::Vocabulary;
use crate::error::ReplResult;

/// A blocking "next line" operation, independent of the underlying input.
///
/// `Ok(None)` signals end of input.
pub trait LineSource {
    fn next_line(&mut self) -> ReplResult<Option<String>>;

    /// Called before each read with the names valid at that point.
    /// Sources without completion ignore it.
    fn refresh_completions(&mut self, _vocabulary: Vocabulary) {}
}

impl<S: LineSource + ?Sized> LineSource for &mut S {
    fn next_line(&mut self) -> ReplResult<Option<String>> {
        (**self).next_line()
    }

    fn refresh_completions(&mut self, vocabulary: Vocabulary) {
        (**self).refresh_completions(vocabulary)
    }
}

/// Lines from any buffered reader: a file, a pipe or an in-memory buffer
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn next_line(&mut self) -> ReplResult<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}
