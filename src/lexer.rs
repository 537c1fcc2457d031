use crate::ast::BinaryOp;
use crate::error::{FurError, Span};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    // Single-character tokens
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Equal,
    Plus,
    Minus,
    Star,
    Slash,

    // Literals
    Identifier,
    String,
    Integer,
    Float,

    // Keywords
    Purr,
    Meow,
    Woof,
    Trick,

    // Special
    Eof,
}

impl TokenType {
    /// The binary operator this token spells and its binding power.
    pub fn binary_op(&self) -> Option<(BinaryOp, u8)> {
        match self {
            TokenType::Plus => Some((BinaryOp::Add, 1)),
            TokenType::Minus => Some((BinaryOp::Subtract, 1)),
            TokenType::Star => Some((BinaryOp::Multiply, 2)),
            TokenType::Slash => Some((BinaryOp::Divide, 2)),
            _ => None,
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TokenType::LeftParen => "'('",
            TokenType::RightParen => "')'",
            TokenType::LeftBrace => "'{'",
            TokenType::RightBrace => "'}'",
            TokenType::Comma => "','",
            TokenType::Equal => "'='",
            TokenType::Plus => "'+'",
            TokenType::Minus => "'-'",
            TokenType::Star => "'*'",
            TokenType::Slash => "'/'",
            TokenType::Identifier => "identifier",
            TokenType::String => "string",
            TokenType::Integer => "integer",
            TokenType::Float => "float",
            TokenType::Purr => "'purr'",
            TokenType::Meow => "'meow'",
            TokenType::Woof => "'woof'",
            TokenType::Trick => "'trick'",
            TokenType::Eof => "end of input",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub token_type: TokenType,
    /// Decoded text: string literals hold their unescaped contents.
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
    pub span: Span,
}

impl Token {
    pub fn new(token_type: TokenType, lexeme: String, span: Span) -> Self {
        Self {
            token_type,
            lexeme,
            line: span.line,
            column: span.column,
            span,
        }
    }
}

pub struct Lexer {
    chars: Vec<char>,
    tokens: Vec<Token>,
    current: usize,
    line: usize,
    column: usize,
    keywords: HashMap<&'static str, TokenType>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        let mut keywords = HashMap::new();
        keywords.insert("purr", TokenType::Purr);
        keywords.insert("meow", TokenType::Meow);
        keywords.insert("woof", TokenType::Woof);
        keywords.insert("trick", TokenType::Trick);

        Self {
            chars: source.chars().collect(),
            tokens: Vec::new(),
            current: 0,
            line: 1,
            column: 1,
            keywords,
        }
    }

    pub fn scan_tokens(mut self) -> Result<Vec<Token>, FurError> {
        loop {
            self.skip_whitespace();
            if self.is_at_end() {
                break;
            }
            self.scan_token()?;
        }

        self.tokens.push(Token::new(
            TokenType::Eof,
            String::new(),
            Span::single(self.current, self.line, self.column),
        ));

        log::debug!("lexed {} tokens", self.tokens.len());
        Ok(self.tokens)
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }

    fn scan_token(&mut self) -> Result<(), FurError> {
        let start = self.current;
        let line = self.line;
        let column = self.column;
        let c = self.advance();

        let token_type = match c {
            '(' => Some(TokenType::LeftParen),
            ')' => Some(TokenType::RightParen),
            '{' => Some(TokenType::LeftBrace),
            '}' => Some(TokenType::RightBrace),
            ',' => Some(TokenType::Comma),
            '=' => Some(TokenType::Equal),
            '+' => Some(TokenType::Plus),
            '-' => Some(TokenType::Minus),
            '*' => Some(TokenType::Star),
            '/' => Some(TokenType::Slash),
            _ => None,
        };

        if let Some(token_type) = token_type {
            self.tokens.push(Token::new(
                token_type,
                c.to_string(),
                Span::new(start, self.current, line, column),
            ));
            return Ok(());
        }

        let (token_type, lexeme) = match c {
            '"' => (TokenType::String, self.string()),
            c if c.is_ascii_digit() => self.number(c),
            c if c.is_ascii_alphabetic() || c == '_' => self.identifier(c),
            _ => {
                return Err(FurError::lex_error(
                    c,
                    Span::new(start, self.current, line, column),
                ));
            }
        };

        self.tokens.push(Token::new(
            token_type,
            lexeme,
            Span::new(start, self.current, line, column),
        ));
        Ok(())
    }

    fn advance(&mut self) -> char {
        let Some(&c) = self.chars.get(self.current) else {
            return '\0';
        };
        self.current += 1;

        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        c
    }

    fn peek(&self) -> char {
        self.chars.get(self.current).copied().unwrap_or('\0')
    }

    fn peek_next(&self) -> char {
        self.chars.get(self.current + 1).copied().unwrap_or('\0')
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.peek().is_whitespace() {
            self.advance();
        }
    }

    /// Reads the body of a string literal; the opening quote is already consumed.
    /// A missing closing quote is tolerated and the text runs to end of input.
    fn string(&mut self) -> String {
        let mut value = String::new();

        while !self.is_at_end() && self.peek() != '"' {
            let c = self.advance();
            if c != '\\' {
                value.push(c);
                continue;
            }

            if self.is_at_end() {
                break;
            }
            match self.advance() {
                'n' => value.push('\n'),
                't' => value.push('\t'),
                'r' => value.push('\r'),
                other => value.push(other),
            }
        }

        if self.peek() == '"' {
            self.advance();
        }

        value
    }

    fn number(&mut self, first: char) -> (TokenType, String) {
        let mut text = first.to_string();
        while self.peek().is_ascii_digit() {
            text.push(self.advance());
        }

        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            text.push(self.advance());
            while self.peek().is_ascii_digit() {
                text.push(self.advance());
            }
            return (TokenType::Float, text);
        }

        (TokenType::Integer, text)
    }

    fn identifier(&mut self, first: char) -> (TokenType, String) {
        let mut text = first.to_string();
        while self.peek().is_ascii_alphabetic() || self.peek() == '_' {
            text.push(self.advance());
        }

        let token_type = self
            .keywords
            .get(text.as_str())
            .copied()
            .unwrap_or(TokenType::Identifier);

        (token_type, text)
    }
}

/// Convenience wrapper over [`Lexer::scan_tokens`].
pub fn tokenize(source: &str) -> Result<Vec<Token>, FurError> {
    Lexer::new(source).scan_tokens()
}
