//! Insect front end
//!
//! Turns input lines from the command line, a pipe, the startup file or an
//! interactive terminal into evaluated results, threading one environment
//! through all of them and routing each result by mode.

pub mod clipboard;
pub mod completer;
pub mod config;
pub mod dispatch;
pub mod editor;
pub mod environment;
pub mod error;
pub mod highlighter;
pub mod history;
pub mod processor;
pub mod rc;
pub mod repl;
pub mod session;
pub mod single_shot;
pub mod source;
pub mod stream;

pub use clipboard::{ClipboardSink, SystemClipboard};
pub use completer::{ReplCompleter, Vocabulary};
pub use config::ReplConfig;
pub use dispatch::{classify, Mode, USAGE};
pub use environment::EnvironmentStore;
pub use error::{ReplError, ReplResult};
pub use processor::{is_trivial, LineProcessor};
pub use repl::Repl;
pub use session::InteractiveSession;
pub use source::{LineSource, ReaderSource};

// Re-export key dependencies
pub use rustyline;
