//! What the evaluator hands back for each line

use colored::*;

use crate::environment::Environment;

/// Kind of message produced by evaluating a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// A computed result to display
    Value,
    /// A variable or function was bound
    ValueSet,
    /// Informational text such as help or a listing
    Info,
    /// Evaluation failed
    Error,
    /// The session should end
    Quit,
    /// The screen should be cleared
    Clear,
    /// The message should go to the clipboard
    Copy,
}

/// Output styling requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// No escape sequences, for pipes and scripts
    Plain,
    /// ANSI-decorated, for an interactive terminal
    Console,
}

impl Format {
    /// Style the text of a computed value
    pub fn value(&self, text: &str) -> String {
        match self {
            Format::Plain => text.to_string(),
            Format::Console => format!("   = {}", text.bright_cyan().bold()),
        }
    }

    /// Style a binding confirmation, `name = value`
    pub fn binding(&self, name: &str, text: &str) -> String {
        match self {
            Format::Plain => format!("{} = {}", name, text),
            Format::Console => format!("  {} = {}", name.bright_white().bold(), text.bright_cyan()),
        }
    }

    /// Style a heading in informational output
    pub fn heading(&self, text: &str) -> String {
        match self {
            Format::Plain => text.to_string(),
            Format::Console => text.bright_white().bold().to_string(),
        }
    }

    /// Style an error message
    pub fn error(&self, text: &str) -> String {
        match self {
            Format::Plain => text.to_string(),
            Format::Console => format!("  {}", text.red()),
        }
    }
}

/// Result of evaluating one non-trivial line
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub kind: MessageKind,
    pub msg: String,
    /// Environment the next line should see, replaced even on error
    pub new_env: Environment,
}

impl Response {
    pub fn new(kind: MessageKind, msg: impl Into<String>, new_env: Environment) -> Self {
        Self {
            kind,
            msg: msg.into(),
            new_env,
        }
    }
}
