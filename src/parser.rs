use crate::ast::{Expr, Identifier, Program, Stmt, UnaryOp};
use crate::error::{Expected, FurError, Span};
use crate::lexer::{Token, TokenType};

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        // Every cursor method relies on a trailing Eof
        if tokens.last().map(|t| t.token_type) != Some(TokenType::Eof) {
            let span = tokens
                .last()
                .map(|t| Span::single(t.span.end, t.line, t.column))
                .unwrap_or_else(|| Span::single(0, 1, 1));
            tokens.push(Token::new(TokenType::Eof, String::new(), span));
        }
        Self { tokens, current: 0 }
    }

    pub fn parse(&mut self) -> Result<Program, FurError> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            statements.push(self.statement()?);
        }

        log::debug!("parsed {} top-level statements", statements.len());
        Ok(Program { statements })
    }

    fn statement(&mut self) -> Result<Stmt, FurError> {
        match self.peek().token_type {
            TokenType::Purr => self.print_statement(),
            TokenType::Meow => self.variable_declaration(),
            TokenType::Trick => self.function_declaration(),
            TokenType::Woof => self.woof_statement(),
            TokenType::Identifier => {
                if self.check_next(TokenType::LeftParen) {
                    let name = self.advance().clone();
                    let call = self.finish_call(name)?;
                    let span = call.span().clone();
                    Ok(Stmt::Expression { expr: call, span })
                } else {
                    let token = self.advance().clone();
                    Ok(Stmt::VariableAccess {
                        name: token.lexeme,
                        span: token.span,
                    })
                }
            }
            _ => self.expression_statement(),
        }
    }

    fn print_statement(&mut self) -> Result<Stmt, FurError> {
        let start = self.advance().span.clone();

        self.consume(
            TokenType::LeftParen,
            "'purr' takes its argument in parentheses: purr(\"hello\")",
        )?;
        let argument = self.expression()?;
        let end = self
            .consume(
                TokenType::RightParen,
                "Close the argument of 'purr' with ')'.",
            )?
            .span;

        Ok(Stmt::Print {
            argument,
            span: start.to(&end),
        })
    }

    fn variable_declaration(&mut self) -> Result<Stmt, FurError> {
        let start = self.advance().span.clone();

        let name = self
            .consume(
                TokenType::Identifier,
                "Variables are declared as: meow name = value",
            )?
            .lexeme;
        self.consume(
            TokenType::Equal,
            "A declaration needs '=' followed by a value: meow name = value",
        )?;
        let value = self.expression()?;
        let end = value.span().clone();

        Ok(Stmt::VariableDeclaration {
            name,
            value,
            span: start.to(&end),
        })
    }

    fn woof_statement(&mut self) -> Result<Stmt, FurError> {
        let start = self.advance().span.clone();

        let token = self.consume(
            TokenType::Identifier,
            "'woof' is followed by the name of a variable: woof name",
        )?;

        Ok(Stmt::VariableAccess {
            name: token.lexeme,
            span: start.to(&token.span),
        })
    }

    fn function_declaration(&mut self) -> Result<Stmt, FurError> {
        let start = self.advance().span.clone();

        let name = self
            .consume(
                TokenType::Identifier,
                "Functions are declared as: trick name(a, b) { ... }",
            )?
            .lexeme;
        self.consume(
            TokenType::LeftParen,
            "The parameter list of a function starts with '('.",
        )?;

        let mut parameters = Vec::new();
        while !self.check(TokenType::RightParen) && !self.is_at_end() {
            let token = self.consume(
                TokenType::Identifier,
                "Parameters are plain names separated by commas or spaces.",
            )?;
            parameters.push(Identifier {
                name: token.lexeme,
                span: token.span,
            });
            self.match_types(&[TokenType::Comma]);
        }

        self.consume(
            TokenType::RightParen,
            "Close the parameter list with ')'.",
        )?;
        self.consume(
            TokenType::LeftBrace,
            "A function body is enclosed in braces: { ... }",
        )?;

        let mut body = Vec::new();
        while !self.check(TokenType::RightBrace) && !self.is_at_end() {
            body.push(self.statement()?);
        }

        let end = self
            .consume(
                TokenType::RightBrace,
                "Close the function body with '}'.",
            )?
            .span;

        Ok(Stmt::FunctionDeclaration {
            name,
            parameters,
            body,
            span: start.to(&end),
        })
    }

    fn expression_statement(&mut self) -> Result<Stmt, FurError> {
        let expr = self.expression()?;
        let span = expr.span().clone();
        Ok(Stmt::Expression { expr, span })
    }

    /// Parses the argument list of a call whose name has just been consumed.
    fn finish_call(&mut self, name: Token) -> Result<Expr, FurError> {
        self.consume(TokenType::LeftParen, "A call needs '(' after the name.")?;

        let mut args = Vec::new();
        while !self.check(TokenType::RightParen) && !self.is_at_end() {
            args.push(self.expression()?);
            self.match_types(&[TokenType::Comma]);
        }

        let end = self
            .consume(
                TokenType::RightParen,
                "Function calls must be closed with ')' after the arguments. Example: func(arg1, arg2)",
            )?
            .span;

        Ok(Expr::FunctionCall {
            name: name.lexeme,
            args,
            span: name.span.to(&end),
        })
    }

    fn expression(&mut self) -> Result<Expr, FurError> {
        self.binary(0)
    }

    /// Precedence climbing: keep folding operators while they bind tighter
    /// than `min_precedence`, which makes equal precedence left-associative.
    fn binary(&mut self, min_precedence: u8) -> Result<Expr, FurError> {
        let mut left = self.primary()?;

        loop {
            let operator_token = self.peek().clone();
            let (operator, precedence) = match operator_token.token_type.binary_op() {
                Some((operator, precedence)) if precedence > min_precedence => {
                    (operator, precedence)
                }
                _ => break,
            };
            self.advance();

            let right = self.binary(precedence).map_err(|error| {
                if error.help.is_some() {
                    error
                } else {
                    error.with_help(format!(
                        "Arithmetic operators like '{}' require expressions on both sides.",
                        operator_token.lexeme
                    ))
                }
            })?;

            let span = left.span().to(right.span());
            left = Expr::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
                span,
            };
        }

        Ok(left)
    }

    fn primary(&mut self) -> Result<Expr, FurError> {
        let token = self.peek().clone();

        match token.token_type {
            TokenType::Minus => {
                self.advance();
                let operand = self.primary()?;
                let span = token.span.to(operand.span());
                Ok(Expr::Unary {
                    operator: UnaryOp::Negate,
                    operand: Box::new(operand),
                    span,
                })
            }
            TokenType::Integer => {
                self.advance();
                let value = token.lexeme.parse::<i64>().map_err(|_| {
                    self.error_at(Expected::IntegerInRange, &token).with_help(format!(
                        "Integer literals must lie between {} and {}.",
                        i64::MIN,
                        i64::MAX
                    ))
                })?;
                Ok(Expr::IntegerLiteral {
                    value,
                    span: token.span,
                })
            }
            TokenType::Float => {
                self.advance();
                let value = token
                    .lexeme
                    .parse::<f64>()
                    .map_err(|_| self.error_at(Expected::Expression, &token))?;
                Ok(Expr::FloatLiteral {
                    value,
                    span: token.span,
                })
            }
            TokenType::String => {
                self.advance();
                Ok(Expr::StringLiteral {
                    value: token.lexeme,
                    span: token.span,
                })
            }
            TokenType::Identifier => {
                self.advance();
                if self.check(TokenType::LeftParen) {
                    return self.finish_call(token);
                }
                Ok(Expr::Identifier(Identifier {
                    name: token.lexeme,
                    span: token.span,
                }))
            }
            TokenType::LeftParen => {
                self.advance();
                let expr = self.expression()?;
                self.consume(
                    TokenType::RightParen,
                    "Every opening parenthesis '(' must have a matching closing parenthesis ')'.",
                )?;
                Ok(expr)
            }
            _ => {
                let help_msg = match token.token_type {
                    TokenType::RightParen => {
                        "Found ')' without matching '('. Check for unbalanced parentheses."
                    }
                    TokenType::RightBrace => {
                        "Found '}' without matching '{'. Check for unbalanced braces."
                    }
                    TokenType::Eof => "Reached end of input while expecting an expression.",
                    _ => "Expected a literal value, variable, or parenthesized expression here.",
                };

                Err(self.error_at(Expected::Expression, &token).with_help(help_msg))
            }
        }
    }

    fn match_types(&mut self, types: &[TokenType]) -> bool {
        for token_type in types {
            if self.check(*token_type) {
                self.advance();
                return true;
            }
        }
        false
    }

    fn check(&self, token_type: TokenType) -> bool {
        self.peek().token_type == token_type
    }

    fn check_next(&self, token_type: TokenType) -> bool {
        self.tokens
            .get(self.current + 1)
            .is_some_and(|t| t.token_type == token_type)
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.peek().token_type == TokenType::Eof
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    fn consume(&mut self, token_type: TokenType, help: &str) -> Result<Token, FurError> {
        if self.check(token_type) {
            Ok(self.advance().clone())
        } else {
            let found = self.peek().clone();
            Err(self
                .error_at(Expected::Token(token_type), &found)
                .with_help(help))
        }
    }

    fn error_at(&self, expected: Expected, token: &Token) -> FurError {
        // At Eof, point just past the last real token rather than at nothing
        let span = if token.token_type == TokenType::Eof && self.current > 0 {
            let last = &self.tokens[self.current - 1];
            Span::single(last.span.end, token.line, token.column)
        } else {
            token.span.clone()
        };

        FurError::parse_error(expected, token.token_type, span)
    }
}

/// Convenience wrapper over [`Parser::parse`].
pub fn parse(tokens: Vec<Token>) -> Result<Program, FurError> {
    Parser::new(tokens).parse()
}
