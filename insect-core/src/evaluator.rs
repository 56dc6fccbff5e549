//! Line evaluation: the seam between the front end and the calculator

use tracing::trace;

use crate::ast::{BinaryOp, Command, Expr, Statement};
use crate::environment::{Environment, UserFunction, LAST_RESULT_NAMES};
use crate::error::{EvalError, EvalResult};
use crate::parser::parse_statement;
use crate::quantity::Quantity;
use crate::response::{Format, MessageKind, Response};
use crate::units;

/// Anything that can turn a line and an environment into a response.
///
/// Implementations must be pure with respect to the environment they are
/// given: the only state change is the `new_env` of the returned response.
pub trait Evaluator {
    /// Environment a fresh session starts from
    fn initial_environment(&self) -> Environment;

    /// Evaluate one line
    fn evaluate(&self, format: Format, env: &Environment, line: &str) -> Response;

    /// Variable names bound in `env`
    fn identifiers(&self, env: &Environment) -> Vec<String>;

    /// Callable names: built-ins first, then user functions
    fn functions(&self, env: &Environment) -> Vec<String>;

    /// Every unit spelling the evaluator accepts
    fn supported_units(&self) -> Vec<String>;

    /// Command words recognised as whole lines
    fn commands(&self) -> Vec<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Builtin {
    Sqrt,
    Abs,
    Round,
    Floor,
    Ceil,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Exp,
    Ln,
    Log10,
}

const BUILTINS: &[(&str, Builtin)] = &[
    ("sqrt", Builtin::Sqrt),
    ("abs", Builtin::Abs),
    ("round", Builtin::Round),
    ("floor", Builtin::Floor),
    ("ceil", Builtin::Ceil),
    ("sin", Builtin::Sin),
    ("cos", Builtin::Cos),
    ("tan", Builtin::Tan),
    ("asin", Builtin::Asin),
    ("acos", Builtin::Acos),
    ("atan", Builtin::Atan),
    ("exp", Builtin::Exp),
    ("ln", Builtin::Ln),
    ("log10", Builtin::Log10),
];

impl Builtin {
    fn lookup(name: &str) -> Option<Builtin> {
        BUILTINS.iter().find(|(n, _)| *n == name).map(|(_, b)| *b)
    }

    fn apply(self, name: &str, arg: &Quantity) -> EvalResult<Quantity> {
        let scalar = |f: fn(f64) -> f64| -> EvalResult<Quantity> {
            Ok(Quantity::scalar(f(arg.as_scalar(name)?)))
        };
        match self {
            Builtin::Sqrt => arg.sqrt(),
            Builtin::Abs => Ok(arg.with_value(arg.value().abs())),
            Builtin::Round => Ok(arg.with_value(arg.value().round())),
            Builtin::Floor => Ok(arg.with_value(arg.value().floor())),
            Builtin::Ceil => Ok(arg.with_value(arg.value().ceil())),
            Builtin::Sin => scalar(f64::sin),
            Builtin::Cos => scalar(f64::cos),
            Builtin::Tan => scalar(f64::tan),
            Builtin::Asin => scalar(f64::asin),
            Builtin::Acos => scalar(f64::acos),
            Builtin::Atan => scalar(f64::atan),
            Builtin::Exp => scalar(f64::exp),
            Builtin::Ln => scalar(f64::ln),
            Builtin::Log10 => scalar(f64::log10),
        }
    }
}

const HELP_TEXT: &str = "\
Enter an expression to evaluate it, for example
    3 km / 45 min -> km/h
    sqrt(2 m * 8 m)
Bind names with 'x = 12 kg' and define functions with 'f(x) = x^2'.
The last result is available as 'ans' or '_'.

Commands:
    help, ?          show this text
    list, ls, ll     show variables and functions
    reset            forget all variables and functions
    copy, cp         copy the last result to the clipboard
    clear, cls       clear the screen
    quit, exit       leave the calculator";

/// Local bindings while evaluating a function body
struct Scope<'a> {
    env: &'a Environment,
    locals: Vec<(String, Quantity)>,
    depth: usize,
}

impl<'a> Scope<'a> {
    fn root(env: &'a Environment) -> Self {
        Self {
            env,
            locals: Vec::new(),
            depth: 0,
        }
    }

    fn local(&self, name: &str) -> Option<&Quantity> {
        self.locals.iter().find(|(n, _)| n == name).map(|(_, q)| q)
    }
}

/// The built-in unit-aware calculator
#[derive(Debug, Clone)]
pub struct Calculator {
    max_depth: usize,
}

impl Calculator {
    pub fn new() -> Self {
        Self { max_depth: 128 }
    }

    fn run(&self, format: Format, env: &Environment, line: &str) -> EvalResult<Response> {
        match parse_statement(line)? {
            Statement::Command(command) => Ok(self.command(command, format, env)),
            Statement::Assign { name, expr } => {
                self.check_bindable(&name)?;
                let value = self.eval_top(&expr, env)?;
                let msg = format.binding(&name, &value.to_string());
                let mut new_env = env.clone();
                new_env.set_value(&name, value);
                Ok(Response::new(MessageKind::ValueSet, msg, new_env))
            }
            Statement::Define { name, params, body } => {
                self.check_bindable(&name)?;
                for (i, param) in params.iter().enumerate() {
                    if params[..i].contains(param) {
                        return Err(EvalError::UnexpectedToken {
                            expected: "distinct parameter names".to_string(),
                            found: param.clone(),
                        });
                    }
                }
                let signature = format!("{}({})", name, params.join(", "));
                let msg = format.binding(&signature, &body.to_string());
                let mut new_env = env.clone();
                new_env.set_function(&name, UserFunction { params, body });
                Ok(Response::new(MessageKind::ValueSet, msg, new_env))
            }
            Statement::Expression(expr) => {
                let value = self.eval_top(&expr, env)?;
                let msg = format.value(&value.to_string());
                let mut new_env = env.clone();
                new_env.set_last_result(&value);
                Ok(Response::new(MessageKind::Value, msg, new_env))
            }
        }
    }

    fn command(&self, command: Command, format: Format, env: &Environment) -> Response {
        match command {
            Command::Help => Response::new(
                MessageKind::Info,
                format!("{}\n\n{}", format.heading("insect"), HELP_TEXT),
                env.clone(),
            ),
            Command::Quit => Response::new(MessageKind::Quit, "", env.clone()),
            Command::Clear => Response::new(MessageKind::Clear, "", env.clone()),
            Command::Copy => {
                let msg = env
                    .last_result()
                    .map(|value| value.to_string())
                    .unwrap_or_default();
                Response::new(MessageKind::Copy, msg, env.clone())
            }
            Command::List => Response::new(MessageKind::Info, self.listing(format, env), env.clone()),
            Command::Reset => Response::new(
                MessageKind::Info,
                "Environment has been reset.",
                self.initial_environment(),
            ),
        }
    }

    fn listing(&self, format: Format, env: &Environment) -> String {
        let mut lines = vec![format.heading("List of variables:")];
        lines.extend(
            env.values()
                .map(|(name, value)| format!("  {} = {}", name, value)),
        );
        let mut functions = env.functions().peekable();
        if functions.peek().is_some() {
            lines.push(String::new());
            lines.push(format.heading("List of functions:"));
            lines.extend(functions.map(|(name, f)| format!("  {}", f.describe(name))));
        }
        lines.join("\n")
    }

    fn check_bindable(&self, name: &str) -> EvalResult<()> {
        let reserved = Command::from_word(name).is_some()
            || Builtin::lookup(name).is_some()
            || units::lookup(name).is_some()
            || LAST_RESULT_NAMES.contains(&name);
        if reserved {
            Err(EvalError::Reserved(name.to_string()))
        } else {
            Ok(())
        }
    }

    fn eval_top(&self, expr: &Expr, env: &Environment) -> EvalResult<Quantity> {
        let value = self.eval(expr, &Scope::root(env))?;
        if value.value().is_finite() {
            Ok(value)
        } else {
            Err(EvalError::NotFinite)
        }
    }

    fn eval(&self, expr: &Expr, scope: &Scope<'_>) -> EvalResult<Quantity> {
        match expr {
            Expr::Number(n) => Ok(Quantity::scalar(*n)),
            Expr::Identifier(name) => self.resolve(name, scope),
            Expr::Negate(inner) => Ok(self.eval(inner, scope)?.neg()),
            Expr::Binary { op, lhs, rhs } => {
                let lhs = self.eval(lhs, scope)?;
                let rhs = self.eval(rhs, scope)?;
                match op {
                    BinaryOp::Add => lhs.add(&rhs),
                    BinaryOp::Sub => lhs.sub(&rhs),
                    BinaryOp::Mul => lhs.mul(&rhs),
                    BinaryOp::Div => lhs.div(&rhs),
                    BinaryOp::Pow => lhs.pow(&rhs),
                }
            }
            Expr::Call { name, args } => self.call(name, args, scope),
            Expr::Convert { value, target } => {
                let value = self.eval(value, scope)?;
                let target = self.eval(target, scope)?;
                value.convert_to(&target)
            }
        }
    }

    fn resolve(&self, name: &str, scope: &Scope<'_>) -> EvalResult<Quantity> {
        if let Some(value) = scope.local(name).or_else(|| scope.env.value(name)) {
            return Ok(value.clone());
        }
        units::lookup(name)
            .map(Quantity::unit)
            .ok_or_else(|| EvalError::UnknownIdentifier(name.to_string()))
    }

    fn call(&self, name: &str, args: &[Expr], scope: &Scope<'_>) -> EvalResult<Quantity> {
        // A bound value followed by parentheses is a product: `x (1 + 2)`
        let is_value = scope.local(name).is_some()
            || scope.env.value(name).is_some()
            || (scope.env.function(name).is_none() && units::lookup(name).is_some());
        if is_value {
            if args.len() != 1 {
                return Err(EvalError::NotAFunction(name.to_string()));
            }
            let factor = self.resolve(name, scope)?;
            return factor.mul(&self.eval(&args[0], scope)?);
        }

        if let Some(function) = scope.env.function(name) {
            if args.len() != function.params.len() {
                return Err(EvalError::Arity {
                    name: name.to_string(),
                    expected: function.params.len(),
                    actual: args.len(),
                });
            }
            if scope.depth >= self.max_depth {
                return Err(EvalError::RecursionLimit(self.max_depth));
            }
            let mut locals = Vec::with_capacity(args.len());
            for (param, arg) in function.params.iter().zip(args) {
                locals.push((param.clone(), self.eval(arg, scope)?));
            }
            trace!(function = name, depth = scope.depth + 1, "calling user function");
            let inner = Scope {
                env: scope.env,
                locals,
                depth: scope.depth + 1,
            };
            return self.eval(&function.body, &inner);
        }

        if let Some(builtin) = Builtin::lookup(name) {
            if args.len() != 1 {
                return Err(EvalError::Arity {
                    name: name.to_string(),
                    expected: 1,
                    actual: args.len(),
                });
            }
            let arg = self.eval(&args[0], scope)?;
            return builtin.apply(name, &arg);
        }

        Err(EvalError::UnknownIdentifier(name.to_string()))
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator for Calculator {
    fn initial_environment(&self) -> Environment {
        Environment::initial()
    }

    fn evaluate(&self, format: Format, env: &Environment, line: &str) -> Response {
        match self.run(format, env, line) {
            Ok(response) => response,
            Err(err) => Response::new(
                MessageKind::Error,
                format.error(&err.to_string()),
                env.clone(),
            ),
        }
    }

    fn identifiers(&self, env: &Environment) -> Vec<String> {
        env.identifiers().map(String::from).collect()
    }

    fn functions(&self, env: &Environment) -> Vec<String> {
        BUILTINS
            .iter()
            .map(|(name, _)| name.to_string())
            .chain(env.functions().map(|(name, _)| name.to_string()))
            .collect()
    }

    fn supported_units(&self) -> Vec<String> {
        units::supported_units()
    }

    fn commands(&self) -> Vec<String> {
        Command::WORDS.iter().map(|(word, _)| word.to_string()).collect()
    }
}
