//! Variable and function bindings carried from one line to the next

use indexmap::IndexMap;

use crate::ast::Expr;
use crate::quantity::Quantity;

/// Names bound to the most recent value result
pub const LAST_RESULT_NAMES: [&str; 2] = ["ans", "_"];

/// A function defined with `name(params) = body`
#[derive(Debug, Clone, PartialEq)]
pub struct UserFunction {
    pub params: Vec<String>,
    pub body: Expr,
}

impl UserFunction {
    /// Signature and body, as typed by the user
    pub fn describe(&self, name: &str) -> String {
        format!("{}({}) = {}", name, self.params.join(", "), self.body)
    }
}

/// Accumulated evaluator state.
///
/// Environments are values: evaluation never mutates one in place, it returns
/// the environment the next line should see.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    values: IndexMap<String, Quantity>,
    functions: IndexMap<String, UserFunction>,
}

impl Environment {
    /// An environment with no bindings at all
    pub fn empty() -> Self {
        Self {
            values: IndexMap::new(),
            functions: IndexMap::new(),
        }
    }

    /// The environment every session starts from
    pub fn initial() -> Self {
        let mut env = Self::empty();
        env.set_value("pi", Quantity::scalar(std::f64::consts::PI));
        env.set_value("e", Quantity::scalar(std::f64::consts::E));
        env
    }

    pub fn value(&self, name: &str) -> Option<&Quantity> {
        self.values.get(name)
    }

    pub fn function(&self, name: &str) -> Option<&UserFunction> {
        self.functions.get(name)
    }

    /// Bind a variable, dropping any function of the same name
    pub fn set_value(&mut self, name: &str, value: Quantity) {
        self.functions.shift_remove(name);
        self.values.insert(name.to_string(), value);
    }

    /// Bind a function, dropping any variable of the same name
    pub fn set_function(&mut self, name: &str, function: UserFunction) {
        self.values.shift_remove(name);
        self.functions.insert(name.to_string(), function);
    }

    /// Remember a value result under `ans` and `_`
    pub fn set_last_result(&mut self, value: &Quantity) {
        for name in LAST_RESULT_NAMES {
            self.values.insert(name.to_string(), value.clone());
        }
    }

    pub fn last_result(&self) -> Option<&Quantity> {
        self.values.get(LAST_RESULT_NAMES[0])
    }

    /// Variable names in binding order
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = (&str, &Quantity)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn functions(&self) -> impl Iterator<Item = (&str, &UserFunction)> {
        self.functions.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::initial()
    }
}
