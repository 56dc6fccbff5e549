//! Ownership of the evaluator environment between lines

use insect_core::Environment;

/// Holds the one live environment of a session.
///
/// Only `LineProcessor` writes to it, one line at a time.
#[derive(Debug, Clone)]
pub struct EnvironmentStore {
    current: Environment,
}

impl EnvironmentStore {
    /// Create a store around the evaluator's initial environment
    pub fn new(initial: Environment) -> Self {
        Self { current: initial }
    }

    /// The environment the next line will be evaluated in
    pub fn current(&self) -> &Environment {
        &self.current
    }

    /// Install the environment returned by an evaluation
    pub fn replace(&mut self, env: Environment) {
        self.current = env;
    }
}
