use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use std::fmt;

use crate::lexer::TokenType;

/// Character range into the source text, plus the 1-based line and column of its
/// first character.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    pub fn single(pos: usize, line: usize, column: usize) -> Self {
        Self::new(pos, pos + 1, line, column)
    }

    /// Covers from the start of `self` to the end of `other`.
    pub fn to(&self, other: &Span) -> Span {
        Span::new(self.start, other.end, self.line, self.column)
    }
}

/// What a parser was looking for when it gave up.
#[derive(Debug, Clone, PartialEq)]
pub enum Expected {
    Token(TokenType),
    Expression,
    IntegerInRange,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expected::Token(token_type) => write!(f, "{}", token_type),
            Expected::Expression => write!(f, "expression"),
            Expected::IntegerInRange => write!(f, "integer within 64-bit range"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeErrorKind {
    UndefinedVariable(String),
    UnsupportedOperator(String),
    UndefinedFunction(String),
    UnsupportedCall(String),
    DivisionByZero,
    Output(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    Lex { character: char },
    Parse { expected: Expected, found: TokenType },
    Runtime(RuntimeErrorKind),
}

#[derive(Debug, Clone)]
pub struct FurError {
    pub kind: ErrorKind,
    pub span: Span,
    pub message: String,
    pub help: Option<String>,
}

impl FurError {
    pub fn new(kind: ErrorKind, span: Span, message: String) -> Self {
        Self {
            kind,
            span,
            message,
            help: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn lex_error(character: char, span: Span) -> Self {
        let message = format!(
            "Unexpected character '{}' at line {}, column {}",
            character.escape_default(),
            span.line,
            span.column
        );
        Self::new(ErrorKind::Lex { character }, span, message)
    }

    pub fn parse_error(expected: Expected, found: TokenType, span: Span) -> Self {
        let message = format!("Expected {}, got {} at line {}", expected, found, span.line);
        Self::new(ErrorKind::Parse { expected, found }, span, message)
    }

    pub fn runtime_error(kind: RuntimeErrorKind, span: Span) -> Self {
        let message = match &kind {
            RuntimeErrorKind::UndefinedVariable(name) => format!("Undefined variable: {}", name),
            RuntimeErrorKind::UnsupportedOperator(detail) => {
                format!("Unsupported operator: {}", detail)
            }
            RuntimeErrorKind::UndefinedFunction(name) => format!("Undefined function: {}", name),
            RuntimeErrorKind::UnsupportedCall(name) => {
                format!("Function '{}' is declared but calls are not supported", name)
            }
            RuntimeErrorKind::DivisionByZero => "Division by zero".to_string(),
            RuntimeErrorKind::Output(reason) => format!("Failed to write output: {}", reason),
        };
        Self::new(ErrorKind::Runtime(kind), span, message)
    }

    pub fn line(&self) -> usize {
        self.span.line
    }

    pub fn column(&self) -> usize {
        self.span.column
    }

    pub fn is_lex_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Lex { .. })
    }

    pub fn is_parse_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Parse { .. })
    }

    pub fn runtime_kind(&self) -> Option<&RuntimeErrorKind> {
        match &self.kind {
            ErrorKind::Runtime(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn report(&self, source: &str, filename: Option<&str>) {
        let filename = filename.unwrap_or("<repl>");

        let color = match self.kind {
            ErrorKind::Lex { .. } => Color::Red,
            ErrorKind::Parse { .. } => Color::Yellow,
            ErrorKind::Runtime(_) => Color::Magenta,
        };

        let kind_str = match self.kind {
            ErrorKind::Lex { .. } => "Lexical Error",
            ErrorKind::Parse { .. } => "Parse Error",
            ErrorKind::Runtime(_) => "Runtime Error",
        };

        // Eof spans sit one past the end of the source
        let end = self.span.end.min(source.chars().count());
        let start = self.span.start.min(end);

        let mut report_builder = Report::build(ReportKind::Error, filename, start)
            .with_message(format!("{}: {}", kind_str.fg(color), self.message))
            .with_label(
                Label::new((filename, start..end))
                    .with_message(&self.message)
                    .with_color(color),
            );

        if let Some(ref help_text) = self.help {
            report_builder =
                report_builder.with_note(format!("{}: {}", "help".fg(Color::Cyan), help_text));
        }

        if let Err(e) = report_builder
            .finish()
            .eprint((filename, Source::from(source)))
        {
            log::error!("failed to render diagnostic: {}", e);
            eprintln!("FurryScript Error: {}", self.message);
        }
    }
}

impl fmt::Display for FurError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for FurError {}
