use crate::ast::{Expr, Identifier, Stmt};
use crate::evaluator::Evaluator;
use crate::lexer::Lexer;
use crate::parser::Parser;
use std::io::{self, BufRead, Write};

/// Interactive loop on stdin/stdout. Bindings persist for the whole session.
pub fn start() {
    println!("FurryScript Interpreter v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'exit' or press Ctrl+D to quit");
    println!();

    let mut evaluator = Evaluator::new();
    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        print!("> ");
        if let Err(error) = io::stdout().flush() {
            log::error!("failed to flush prompt: {}", error);
            break;
        }

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => {
                // EOF reached (Ctrl+D or piped input ended)
                println!();
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == "exit" || line == "quit" {
                    println!("Goodbye!");
                    break;
                }

                run_repl_command(line, &mut evaluator);
            }
            Err(error) => {
                eprintln!("Error reading input: {}", error);
                break;
            }
        }
    }
}

/// Executes one line against the session evaluator. A lone expression or
/// variable name has its value echoed, and the echo is returned.
pub fn run_repl_command<W: Write>(source: &str, evaluator: &mut Evaluator<W>) -> Option<String> {
    let tokens = match Lexer::new(source).scan_tokens() {
        Ok(tokens) => tokens,
        Err(error) => {
            error.report(source, None);
            return None;
        }
    };

    let program = match Parser::new(tokens).parse() {
        Ok(program) => program,
        Err(error) => {
            error.report(source, None);
            return None;
        }
    };

    let echoed = match program.statements.as_slice() {
        [Stmt::Expression { expr, .. }] => Some(expr.clone()),
        [Stmt::VariableAccess { name, span }] => Some(Expr::Identifier(Identifier {
            name: name.clone(),
            span: span.clone(),
        })),
        _ => None,
    };

    if let Some(expr) = echoed {
        let echo = evaluator
            .evaluate_expression(&expr)
            .map(|value| value.to_string())
            .and_then(|echo| {
                evaluator.write_line(&echo, expr.span())?;
                Ok(echo)
            });
        return match echo {
            Ok(echo) => Some(echo),
            Err(error) => {
                error.report(source, None);
                None
            }
        };
    }

    if let Err(error) = evaluator.evaluate_program(&program) {
        error.report(source, None);
    }
    None
}
