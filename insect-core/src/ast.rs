//! Syntax tree for a single input line

use std::fmt;

use crate::quantity::format_number;

/// Binary operators, in the order of their precedence groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            BinaryOp::Add | BinaryOp::Sub => 2,
            BinaryOp::Mul | BinaryOp::Div => 3,
            BinaryOp::Pow => 5,
        }
    }
}

/// Expression node
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Identifier(String),
    Negate(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        name: String,
        args: Vec<Expr>,
    },
    /// `value -> target`
    Convert {
        value: Box<Expr>,
        target: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Convert { .. } => 1,
            Expr::Binary { op, .. } => op.precedence(),
            Expr::Negate(_) => 4,
            Expr::Number(_) | Expr::Identifier(_) | Expr::Call { .. } => 6,
        }
    }

    fn fmt_child(&self, f: &mut fmt::Formatter<'_>, child: &Expr, min: u8) -> fmt::Result {
        if child.precedence() < min {
            write!(f, "({})", child)
        } else {
            write!(f, "{}", child)
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{}", format_number(*n)),
            Expr::Identifier(name) => write!(f, "{}", name),
            Expr::Negate(inner) => {
                write!(f, "-")?;
                self.fmt_child(f, inner, 5)
            }
            Expr::Binary { op, lhs, rhs } => {
                let prec = op.precedence();
                // Power is right associative, everything else left associative
                let (left_min, right_min) = match op {
                    BinaryOp::Pow => (prec + 1, prec),
                    _ => (prec, prec + 1),
                };
                self.fmt_child(f, lhs, left_min)?;
                write!(f, " {} ", op.symbol())?;
                self.fmt_child(f, rhs, right_min)
            }
            Expr::Call { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Expr::Convert { value, target } => {
                self.fmt_child(f, value, 2)?;
                write!(f, " -> ")?;
                self.fmt_child(f, target, 2)
            }
        }
    }
}

/// Built-in commands recognised when they make up the whole line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Clear,
    Copy,
    List,
    Reset,
}

impl Command {
    /// Every spelling, paired with the command it selects
    pub const WORDS: &'static [(&'static str, Command)] = &[
        ("help", Command::Help),
        ("?", Command::Help),
        ("quit", Command::Quit),
        ("exit", Command::Quit),
        ("clear", Command::Clear),
        ("cls", Command::Clear),
        ("copy", Command::Copy),
        ("cp", Command::Copy),
        ("list", Command::List),
        ("ls", Command::List),
        ("ll", Command::List),
        ("reset", Command::Reset),
    ];

    pub fn from_word(word: &str) -> Option<Command> {
        Self::WORDS
            .iter()
            .find(|(w, _)| *w == word)
            .map(|(_, cmd)| *cmd)
    }
}

/// A parsed input line
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Command(Command),
    /// `name = expr`
    Assign { name: String, expr: Expr },
    /// `name(params) = body`
    Define {
        name: String,
        params: Vec<String>,
        body: Expr,
    },
    Expression(Expr),
}
