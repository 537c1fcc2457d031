// FurryScript Language Interpreter Library
//
// Core of the FurryScript interpreter: a lexer, a precedence-climbing
// parser and a tree-walking evaluator for a tiny cat-themed language.

// Public modules
pub mod ast;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod logger;
pub mod parser;
pub mod repl;
pub mod runner;
pub mod value;

// Re-export commonly used items
pub use ast::{Expr, Program, Stmt};
pub use error::{ErrorKind, FurError, RuntimeErrorKind, Span};
pub use evaluator::{Environment, Evaluator};
pub use lexer::{tokenize, Lexer, Token, TokenType};
pub use parser::{parse, Parser};
pub use value::Value;

// Re-export main functions
pub use repl::start as start_repl;
pub use runner::{execute, run};
