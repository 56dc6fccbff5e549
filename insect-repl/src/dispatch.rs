//! Choosing how the process runs, once, from its arguments

use crate::error::{ReplError, ReplResult};

/// Printed for any malformed invocation
pub const USAGE: &str = "Usage:  insect [EXPR]";

const HELP_FLAGS: [&str; 2] = ["-h", "--help"];

/// The terminal mode of the process
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Evaluate one expression given on the command line
    SingleShot(String),
    /// Line-edited session on a terminal
    Interactive,
    /// Non-interactive consumption of piped or redirected input
    Stream,
}

/// Classify the invocation from positional arguments (program name excluded)
/// and whether standard input is a terminal
pub fn classify(args: &[String], stdin_is_terminal: bool) -> ReplResult<Mode> {
    match args {
        [] if stdin_is_terminal => Ok(Mode::Interactive),
        [] => Ok(Mode::Stream),
        [arg] if HELP_FLAGS.contains(&arg.as_str()) => Err(ReplError::Usage(USAGE.to_string())),
        [arg] => Ok(Mode::SingleShot(arg.clone())),
        _ => Err(ReplError::Usage(USAGE.to_string())),
    }
}
