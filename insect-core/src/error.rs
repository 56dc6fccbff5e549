//! Error types for the evaluator

use thiserror::Error;

/// Result type for evaluator operations
pub type EvalResult<T> = Result<T, EvalError>;

/// Errors that can occur while lexing, parsing or evaluating a line
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EvalError {
    /// Input contained a character sequence the lexer does not know
    #[error("Parse error: unexpected input '{text}' at position {position}")]
    InvalidToken { position: usize, text: String },

    /// A token appeared where the grammar does not allow it
    #[error("Parse error: expected {expected}, found '{found}'")]
    UnexpectedToken { expected: String, found: String },

    /// Parentheses, calls or signs nested too deeply
    #[error("Parse error: nesting deeper than {0} levels")]
    NestingTooDeep(usize),

    /// Line has more tokens than the parser accepts
    #[error("Parse error: input longer than {0} tokens")]
    InputTooLong(usize),

    /// Input ended in the middle of an expression
    #[error("Parse error: unexpected end of input")]
    UnexpectedEof,

    /// Name is neither a variable, a function nor a unit
    #[error("Unknown identifier: '{0}'")]
    UnknownIdentifier(String),

    /// Name is bound but is not callable
    #[error("'{0}' is not a function")]
    NotAFunction(String),

    /// Function called with the wrong number of arguments
    #[error("Wrong number of arguments for '{name}': expected {expected}, got {actual}")]
    Arity {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// Operands of an addition or conversion have different dimensions
    #[error("Conversion error: cannot convert '{from}' to '{to}'")]
    IncompatibleUnits { from: String, to: String },

    /// Operation requires a dimensionless argument
    #[error("Argument of '{0}' must be dimensionless")]
    NotDimensionless(String),

    /// Exponent is not usable with a quantity carrying units
    #[error("Exponent {0} is not an integer and the base has units")]
    NonIntegerExponent(f64),

    /// Unit exponents grew past what can be represented
    #[error("Unit exponent out of range")]
    ExponentOverflow,

    /// Division by a zero quantity
    #[error("Division by zero")]
    DivisionByZero,

    /// Attempt to rebind a reserved name
    #[error("'{0}' is reserved and cannot be assigned")]
    Reserved(String),

    /// User function calls nested too deeply
    #[error("Maximum call depth of {0} exceeded")]
    RecursionLimit(usize),

    /// Calculation produced NaN or infinity
    #[error("Numerical error: result is not a finite number")]
    NotFinite,
}
