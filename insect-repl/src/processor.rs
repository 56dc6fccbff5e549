//! The single path from an input line to the evaluator

use insect_core::{Environment, Evaluator, Format, Response};
use tracing::trace;

use crate::environment::EnvironmentStore;

/// Blank lines and `#` comments never reach the evaluator
pub fn is_trivial(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Filters trivial lines, evaluates the rest and keeps the environment current
pub struct LineProcessor<E> {
    evaluator: E,
    store: EnvironmentStore,
}

impl<E: Evaluator> LineProcessor<E> {
    /// Create a processor starting from the evaluator's initial environment
    pub fn new(evaluator: E) -> Self {
        let store = EnvironmentStore::new(evaluator.initial_environment());
        Self { evaluator, store }
    }

    /// Evaluate one line.
    ///
    /// Returns `None` for trivial lines, which leave the environment alone.
    /// Otherwise the untrimmed line is evaluated and the response's
    /// environment replaces the stored one, whatever the message kind.
    pub fn process(&mut self, format: Format, line: &str) -> Option<Response> {
        if is_trivial(line) {
            return None;
        }

        let response = self.evaluator.evaluate(format, self.store.current(), line);
        trace!(kind = ?response.kind, "evaluated line");
        self.store.replace(response.new_env.clone());
        Some(response)
    }

    pub fn environment(&self) -> &Environment {
        self.store.current()
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }
}
