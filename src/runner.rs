use crate::error::FurError;
use crate::evaluator::Evaluator;
use crate::lexer::Lexer;
use crate::parser::Parser;
use std::io::Write;

/// Greeting script run by `furry --demo`.
pub const SAMPLE_PROGRAM: &str = r#"
meow greeting = "Hello, FurryScript!"
purr(greeting)
purr("This is pawsome!")
"#;

/// Lexes, parses and executes `source` against a fresh evaluator that
/// prints to `output`, handing the sink back on success.
pub fn execute<W: Write>(source: &str, output: W) -> Result<W, FurError> {
    let tokens = Lexer::new(source).scan_tokens()?;
    let program = Parser::new(tokens).parse()?;

    let mut evaluator = Evaluator::with_output(output);
    evaluator.evaluate_program(&program)?;
    Ok(evaluator.into_output())
}

/// Runs `source` against stdout and reports any failure as a diagnostic.
/// The error is still returned so the caller can pick an exit code.
pub fn run(source: &str, filename: Option<&str>) -> Result<(), FurError> {
    log::info!("running {}", filename.unwrap_or("<inline>"));

    match execute(source, std::io::stdout()) {
        Ok(_) => Ok(()),
        Err(error) => {
            error.report(source, filename);
            Err(error)
        }
    }
}
