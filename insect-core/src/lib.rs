//! Insect core
//!
//! This crate provides the evaluator behind the insect calculator:
//! - Tokenizing and parsing of single input lines
//! - Physical units with dimension checking and conversion
//! - The environment of variables and user functions
//! - The `Evaluator` trait the front end talks to

pub mod ast;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod quantity;
pub mod response;
pub mod units;

pub use environment::Environment;
pub use error::{EvalError, EvalResult};
pub use evaluator::{Calculator, Evaluator};
pub use quantity::Quantity;
pub use response::{Format, MessageKind, Response};
