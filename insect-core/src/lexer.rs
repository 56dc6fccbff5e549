//! Tokenizer for calculator input using logos

use logos::Logos;

use crate::error::{EvalError, EvalResult};

#[derive(Logos, Debug, PartialEq, Clone, Copy)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"#[^\n]*")]
pub enum Token<'a> {
    // Literals
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    // Conversion keyword, before identifiers
    #[token("to")]
    To,

    // Micro sign, Greek mu and Omega appear in unit names
    #[regex(r"[a-zA-Z_µμΩ][a-zA-Z0-9_µμΩ]*", |lex| lex.slice())]
    Ident(&'a str),

    // Operators
    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    #[token("×")]
    #[token("·")]
    Star,

    #[token("/")]
    #[token("÷")]
    Slash,

    #[token("^")]
    #[token("**")]
    Caret,

    #[token("->")]
    #[token("→")]
    Arrow,

    #[token("=")]
    Equals,

    // Delimiters
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token(",")]
    Comma,
}

impl<'a> Token<'a> {
    /// Short human-readable form used in error messages
    pub fn describe(&self) -> String {
        match self {
            Token::Number(n) => n.to_string(),
            Token::Ident(name) => (*name).to_string(),
            Token::To => "to".to_string(),
            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Star => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::Caret => "^".to_string(),
            Token::Arrow => "->".to_string(),
            Token::Equals => "=".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::Comma => ",".to_string(),
        }
    }
}

/// Whether `c` can appear inside an identifier
pub fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | 'µ' | 'μ' | 'Ω')
}

/// Split a line into tokens, failing on the first unrecognised input
pub fn tokenize(input: &str) -> EvalResult<Vec<Token<'_>>> {
    let mut lexer = Token::lexer(input);
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next() {
        match token {
            Ok(token) => tokens.push(token),
            Err(()) => {
                return Err(EvalError::InvalidToken {
                    position: lexer.span().start,
                    text: lexer.slice().to_string(),
                })
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_and_units() {
        let tokens = tokenize("3.5km + .5 m").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(3.5),
                Token::Ident("km"),
                Token::Plus,
                Token::Number(0.5),
                Token::Ident("m"),
            ]
        );
    }

    #[test]
    fn test_scientific_notation() {
        let tokens = tokenize("6.02e23").unwrap();
        assert_eq!(tokens, vec![Token::Number(6.02e23)]);
    }

    #[test]
    fn test_conversion_operators() {
        let tokens = tokenize("1 km -> m to ft").unwrap();
        assert_eq!(tokens[2], Token::Arrow);
        assert_eq!(tokens[4], Token::To);
        assert_eq!(tokens[5], Token::Ident("ft"));
    }

    #[test]
    fn test_identifier_starting_with_to() {
        let tokens = tokenize("tonne").unwrap();
        assert_eq!(tokens, vec![Token::Ident("tonne")]);
    }

    #[test]
    fn test_trailing_comment_skipped() {
        let tokens = tokenize("2 * 3 # six").unwrap();
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_power_spellings() {
        assert_eq!(tokenize("2^3").unwrap()[1], Token::Caret);
        assert_eq!(tokenize("2**3").unwrap()[1], Token::Caret);
    }

    #[test]
    fn test_invalid_character() {
        let err = tokenize("2 $ 3").unwrap_err();
        assert_eq!(
            err,
            EvalError::InvalidToken {
                position: 2,
                text: "$".to_string()
            }
        );
    }

    #[test]
    fn test_unit_symbols() {
        let tokens = tokenize("5 µm + 2 μs * 3 Ω").unwrap();
        assert_eq!(tokens[1], Token::Ident("µm"));
        assert_eq!(tokens[4], Token::Ident("μs"));
        assert_eq!(tokens[7], Token::Ident("Ω"));
        assert!("kΩ".chars().all(is_identifier_char));
        assert!(!is_identifier_char('$'));
    }
}
