//! Clipboard access for the `copy` command

use crate::error::{ReplError, ReplResult};

/// Destination of copied results
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> ReplResult<()>;
}

/// The system clipboard, opened on first use
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> ReplResult<()> {
        let clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new().map_err(|e| ReplError::Clipboard(e.to_string()))?,
        };
        let clipboard = self.inner.insert(clipboard);
        clipboard
            .set_text(text)
            .map_err(|e| ReplError::Clipboard(e.to_string()))
    }
}
