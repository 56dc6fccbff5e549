//! Recursive descent parser for calculator statements

use crate::ast::{BinaryOp, Command, Expr, Statement};
use crate::error::{EvalError, EvalResult};
use crate::lexer::{tokenize, Token};

/// Deepest parenthesis, call or unary nesting accepted
pub const MAX_NESTING: usize = 128;

/// Longest line accepted, in tokens
pub const MAX_TOKENS: usize = 1000;

/// Parse one input line into a statement
pub fn parse_statement(input: &str) -> EvalResult<Statement> {
    if let Some(command) = Command::from_word(input.trim()) {
        return Ok(Statement::Command(command));
    }

    let tokens = tokenize(input)?;
    if tokens.len() > MAX_TOKENS {
        return Err(EvalError::InputTooLong(MAX_TOKENS));
    }
    let mut parser = Parser::new(&tokens);

    let statement = if let Some((name, params)) = parser.definition_head()? {
        Statement::Define {
            name,
            params,
            body: parser.expression()?,
        }
    } else if let Some(name) = parser.assignment_head() {
        Statement::Assign {
            name,
            expr: parser.expression()?,
        }
    } else {
        Statement::Expression(parser.expression()?)
    };

    parser.expect_end()?;
    Ok(statement)
}

struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
    depth: usize,
}

impl<'t, 'a> Parser<'t, 'a> {
    fn new(tokens: &'t [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Run `parse` one nesting level deeper
    fn nested<T>(&mut self, parse: fn(&mut Self) -> EvalResult<T>) -> EvalResult<T> {
        if self.depth >= MAX_NESTING {
            return Err(EvalError::NestingTooDeep(MAX_NESTING));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<Token<'a>> {
        self.tokens.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<Token<'a>> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, expected: Token<'_>) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: Token<'_>) -> EvalResult<()> {
        match self.advance() {
            Some(token) if token == expected => Ok(()),
            Some(token) => Err(EvalError::UnexpectedToken {
                expected: format!("'{}'", expected.describe()),
                found: token.describe(),
            }),
            None => Err(EvalError::UnexpectedEof),
        }
    }

    fn expect_end(&mut self) -> EvalResult<()> {
        match self.peek() {
            None => Ok(()),
            Some(token) => Err(EvalError::UnexpectedToken {
                expected: "end of input".to_string(),
                found: token.describe(),
            }),
        }
    }

    /// `name =`, consumed on match
    fn assignment_head(&mut self) -> Option<String> {
        match (self.peek(), self.peek_at(1)) {
            (Some(Token::Ident(name)), Some(Token::Equals)) => {
                self.pos += 2;
                Some(name.to_string())
            }
            _ => None,
        }
    }

    /// `name(a, b) =`, consumed on match
    fn definition_head(&mut self) -> EvalResult<Option<(String, Vec<String>)>> {
        let name = match (self.peek(), self.peek_at(1)) {
            (Some(Token::Ident(name)), Some(Token::LParen)) => name,
            _ => return Ok(None),
        };
        let close = match self.tokens[self.pos..]
            .iter()
            .position(|t| *t == Token::RParen)
        {
            Some(offset) => self.pos + offset,
            None => return Ok(None),
        };
        if self.tokens.get(close + 1) != Some(&Token::Equals) {
            return Ok(None);
        }

        let mut params = Vec::new();
        for (i, token) in self.tokens[self.pos + 2..close].iter().enumerate() {
            match (i % 2, token) {
                (0, Token::Ident(param)) => params.push(param.to_string()),
                (1, Token::Comma) => {}
                (0, other) => {
                    return Err(EvalError::UnexpectedToken {
                        expected: "parameter name".to_string(),
                        found: other.describe(),
                    })
                }
                (_, other) => {
                    return Err(EvalError::UnexpectedToken {
                        expected: "',' or ')'".to_string(),
                        found: other.describe(),
                    })
                }
            }
        }
        if self.tokens[self.pos + 2..close].last() == Some(&Token::Comma) {
            return Err(EvalError::UnexpectedToken {
                expected: "parameter name".to_string(),
                found: ")".to_string(),
            });
        }

        self.pos = close + 2;
        Ok(Some((name.to_string(), params)))
    }

    fn expression(&mut self) -> EvalResult<Expr> {
        let mut expr = self.additive()?;
        while matches!(self.peek(), Some(Token::Arrow) | Some(Token::To)) {
            self.advance();
            let target = self.additive()?;
            expr = Expr::Convert {
                value: Box::new(expr),
                target: Box::new(target),
            };
        }
        Ok(expr)
    }

    fn additive(&mut self) -> EvalResult<Expr> {
        let mut expr = self.multiplicative()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.multiplicative()?;
            expr = Expr::binary(op, expr, rhs);
        }
        Ok(expr)
    }

    fn multiplicative(&mut self) -> EvalResult<Expr> {
        let mut expr = self.juxtaposition()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                _ => break,
            };
            self.advance();
            let rhs = self.juxtaposition()?;
            expr = Expr::binary(op, expr, rhs);
        }
        Ok(expr)
    }

    /// Implicit multiplication such as `3 m` or `2 pi r`, tighter than `*` and `/`
    fn juxtaposition(&mut self) -> EvalResult<Expr> {
        let mut expr = self.unary()?;
        while matches!(
            self.peek(),
            Some(Token::Number(_)) | Some(Token::Ident(_)) | Some(Token::LParen)
        ) {
            let rhs = self.power()?;
            expr = Expr::binary(BinaryOp::Mul, expr, rhs);
        }
        Ok(expr)
    }

    fn unary(&mut self) -> EvalResult<Expr> {
        if self.eat(Token::Minus) {
            return Ok(Expr::Negate(Box::new(self.nested(Self::unary)?)));
        }
        if self.eat(Token::Plus) {
            return self.nested(Self::unary);
        }
        self.power()
    }

    fn power(&mut self) -> EvalResult<Expr> {
        let base = self.primary()?;
        if self.eat(Token::Caret) {
            let exponent = self.nested(Self::unary)?;
            return Ok(Expr::binary(BinaryOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> EvalResult<Expr> {
        match self.advance() {
            Some(Token::Number(n)) => Ok(Expr::Number(n)),
            Some(Token::Ident(name)) => {
                if self.eat(Token::LParen) {
                    let args = self.nested(Self::arguments)?;
                    Ok(Expr::Call {
                        name: name.to_string(),
                        args,
                    })
                } else {
                    Ok(Expr::Identifier(name.to_string()))
                }
            }
            Some(Token::LParen) => {
                let expr = self.nested(Self::expression)?;
                self.expect(Token::RParen)?;
                Ok(expr)
            }
            Some(token) => Err(EvalError::UnexpectedToken {
                expected: "a number, name or '('".to_string(),
                found: token.describe(),
            }),
            None => Err(EvalError::UnexpectedEof),
        }
    }

    fn arguments(&mut self) -> EvalResult<Vec<Expr>> {
        let mut args = Vec::new();
        if self.eat(Token::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.expression()?);
            if self.eat(Token::Comma) {
                continue;
            }
            self.expect(Token::RParen)?;
            return Ok(args);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_expression(input: &str) -> EvalResult<Expr> {
        let tokens = tokenize(input)?;
        let mut parser = Parser::new(&tokens);
        let expr = parser.expression()?;
        parser.expect_end()?;
        Ok(expr)
    }

    fn expr(input: &str) -> String {
        parse_expression(input).unwrap().to_string()
    }

    #[test]
    fn test_precedence() {
        assert_eq!(expr("1 + 2 * 3"), "1 + 2 * 3");
        assert_eq!(expr("(1 + 2) * 3"), "(1 + 2) * 3");
        assert_eq!(expr("2 ^ 3 ^ 2"), "2 ^ 3 ^ 2");
        assert_eq!(expr("-2 ^ 2"), "-2 ^ 2");
        assert_eq!(expr("2^-1"), "2 ^ (-1)");
    }

    #[test]
    fn test_implicit_multiplication() {
        assert_eq!(expr("3 m"), "3 * m");
        assert_eq!(expr("3km / 2h"), "3 * km / (2 * h)");
        assert_eq!(expr("2 pi r"), "2 * pi * r");
    }

    #[test]
    fn test_conversion_binds_loosest() {
        let parsed = parse_expression("1 km + 200 m -> ft").unwrap();
        match parsed {
            Expr::Convert { value, target } => {
                assert_eq!(value.to_string(), "1 * km + 200 * m");
                assert_eq!(*target, Expr::Identifier("ft".to_string()));
            }
            other => panic!("expected conversion, got {:?}", other),
        }
        assert_eq!(expr("3 m to cm"), "3 * m -> cm");
    }

    #[test]
    fn test_calls() {
        assert_eq!(expr("sqrt(16 m^2)"), "sqrt(16 * m ^ 2)");
        assert_eq!(expr("f(1, 2)"), "f(1, 2)");
        assert_eq!(expr("f()"), "f()");
    }

    #[test]
    fn test_statements() {
        assert_eq!(
            parse_statement("a = 2 m").unwrap(),
            Statement::Assign {
                name: "a".to_string(),
                expr: parse_expression("2 m").unwrap(),
            }
        );
        match parse_statement("f(x, y) = x * y").unwrap() {
            Statement::Define { name, params, body } => {
                assert_eq!(name, "f");
                assert_eq!(params, vec!["x".to_string(), "y".to_string()]);
                assert_eq!(body.to_string(), "x * y");
            }
            other => panic!("expected definition, got {:?}", other),
        }
        assert_eq!(
            parse_statement("  quit ").unwrap(),
            Statement::Command(Command::Quit)
        );
        assert!(matches!(
            parse_statement("sqrt(2)").unwrap(),
            Statement::Expression(_)
        ));
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_expression("1 +").unwrap_err(), EvalError::UnexpectedEof);
        assert!(matches!(
            parse_expression("(1 + 2").unwrap_err(),
            EvalError::UnexpectedEof
        ));
        assert!(matches!(
            parse_expression("1 2 )").unwrap_err(),
            EvalError::UnexpectedToken { .. }
        ));
        assert!(matches!(
            parse_statement("f(x, 2) = x").unwrap_err(),
            EvalError::UnexpectedToken { .. }
        ));
        assert!(matches!(
            parse_statement("a = = 2").unwrap_err(),
            EvalError::UnexpectedToken { .. }
        ));
    }

    #[test]
    fn test_nesting_limit() {
        let ok = format!("{}1{}", "(".repeat(MAX_NESTING), ")".repeat(MAX_NESTING));
        assert!(parse_statement(&ok).is_ok());

        let deep = format!("{}1{}", "(".repeat(MAX_NESTING + 1), ")".repeat(MAX_NESTING + 1));
        assert_eq!(
            parse_statement(&deep).unwrap_err(),
            EvalError::NestingTooDeep(MAX_NESTING)
        );
        assert_eq!(
            parse_statement(&"-".repeat(MAX_NESTING + 1)).unwrap_err(),
            EvalError::NestingTooDeep(MAX_NESTING)
        );
        let calls = format!("{}1{}", "sqrt(".repeat(MAX_NESTING + 1), ")".repeat(MAX_NESTING + 1));
        assert_eq!(
            parse_statement(&calls).unwrap_err(),
            EvalError::NestingTooDeep(MAX_NESTING)
        );
    }

    #[test]
    fn test_token_limit() {
        let nested = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
        assert_eq!(
            parse_statement(&nested).unwrap_err(),
            EvalError::InputTooLong(MAX_TOKENS)
        );
        let chain = vec!["1"; MAX_TOKENS].join("+");
        assert_eq!(
            parse_statement(&chain).unwrap_err(),
            EvalError::InputTooLong(MAX_TOKENS)
        );
    }
}
