use crate::ast::{BinaryOp, Expr, Program, Stmt, UnaryOp};
use crate::error::{FurError, RuntimeErrorKind, Span};
use crate::value::Value;
use std::collections::HashMap;
use std::io::{self, Write};

/// Flat name-to-value store; there are no nested scopes.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Binds `name`, replacing and returning any earlier value.
    pub fn define(&mut self, name: &str, value: Value) -> Option<Value> {
        self.values.insert(name.to_string(), value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

pub struct Evaluator<W: Write = io::Stdout> {
    environment: Environment,
    // declared functions and their parameter counts; bodies never run
    functions: HashMap<String, usize>,
    output: W,
}

impl Evaluator<io::Stdout> {
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }
}

impl Default for Evaluator<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Evaluator<W> {
    pub fn with_output(output: W) -> Self {
        Self {
            environment: Environment::new(),
            functions: HashMap::new(),
            output,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn evaluate_program(&mut self, program: &Program) -> Result<(), FurError> {
        for statement in &program.statements {
            self.execute_statement(statement)?;
        }

        if let Err(error) = self.output.flush() {
            let span = match program.statements.last() {
                Some(statement) => statement.span().clone(),
                None => Span::single(0, 1, 1),
            };
            return Err(Self::output_error(error, &span));
        }
        Ok(())
    }

    /// Writes one line of program output to the sink and flushes it.
    pub fn write_line(&mut self, text: &str, span: &Span) -> Result<(), FurError> {
        writeln!(self.output, "{}", text)
            .and_then(|_| self.output.flush())
            .map_err(|e| Self::output_error(e, span))
    }

    fn execute_statement(&mut self, stmt: &Stmt) -> Result<(), FurError> {
        match stmt {
            Stmt::Print { argument, span } => {
                let value = self.evaluate_expression(argument)?;
                log::trace!("purr {}", value);
                writeln!(self.output, "{}", value).map_err(|e| Self::output_error(e, span))
            }
            Stmt::VariableDeclaration { name, value, .. } => {
                let value = self.evaluate_expression(value)?;
                log::trace!("meow {} = {}", name, value);
                self.environment.define(name, value);
                Ok(())
            }
            Stmt::VariableAccess { name, span } => {
                self.lookup(name, span)?;
                Ok(())
            }
            Stmt::FunctionDeclaration {
                name, parameters, ..
            } => {
                log::debug!("declared trick {} with {} parameter(s)", name, parameters.len());
                self.functions.insert(name.clone(), parameters.len());
                Ok(())
            }
            Stmt::Expression { expr, .. } => {
                self.evaluate_expression(expr)?;
                Ok(())
            }
        }
    }

    pub fn evaluate_expression(&self, expr: &Expr) -> Result<Value, FurError> {
        match expr {
            Expr::StringLiteral { value, .. } => Ok(Value::String(value.clone())),
            Expr::IntegerLiteral { value, .. } => Ok(Value::Integer(*value)),
            Expr::FloatLiteral { value, .. } => Ok(Value::Float(*value)),
            Expr::Identifier(identifier) => self.lookup(&identifier.name, &identifier.span),
            Expr::FunctionCall { name, span, .. } => {
                let kind = if self.functions.contains_key(name) {
                    RuntimeErrorKind::UnsupportedCall(name.clone())
                } else {
                    RuntimeErrorKind::UndefinedFunction(name.clone())
                };
                Err(FurError::runtime_error(kind, span.clone())
                    .with_help("Functions can be declared with 'trick' but not yet called."))
            }
            Expr::Unary {
                operator,
                operand,
                span,
            } => {
                let operand_val = self.evaluate_expression(operand)?;
                evaluate_unary_op(*operator, operand_val, span)
            }
            Expr::Binary {
                left,
                operator,
                right,
                span,
            } => {
                let left_val = self.evaluate_expression(left)?;
                let right_val = self.evaluate_expression(right)?;
                evaluate_binary_op(*operator, left_val, right_val, span)
            }
        }
    }

    fn lookup(&self, name: &str, span: &Span) -> Result<Value, FurError> {
        self.environment.get(name).cloned().ok_or_else(|| {
            FurError::runtime_error(
                RuntimeErrorKind::UndefinedVariable(name.to_string()),
                span.clone(),
            )
            .with_help(format!("Declare it first with: meow {} = ...", name))
        })
    }

    fn output_error(error: io::Error, span: &Span) -> FurError {
        FurError::runtime_error(RuntimeErrorKind::Output(error.to_string()), span.clone())
    }
}

fn evaluate_unary_op(operator: UnaryOp, operand: Value, span: &Span) -> Result<Value, FurError> {
    match operator {
        UnaryOp::Negate => match operand {
            Value::Integer(n) => Ok(n
                .checked_neg()
                .map(Value::Integer)
                .unwrap_or(Value::Float(-(n as f64)))),
            Value::Float(n) => Ok(Value::Float(-n)),
            Value::String(_) => Err(unsupported(format!("-{}", operand.type_name()), span)),
        },
    }
}

fn evaluate_binary_op(
    operator: BinaryOp,
    left: Value,
    right: Value,
    span: &Span,
) -> Result<Value, FurError> {
    match (operator, left, right) {
        (BinaryOp::Add, Value::String(l), Value::String(r)) => Ok(Value::String(l + &r)),
        (operator, Value::Integer(l), Value::Integer(r)) => integer_op(operator, l, r, span),
        (operator, Value::Integer(l), Value::Float(r)) => float_op(operator, l as f64, r, span),
        (operator, Value::Float(l), Value::Integer(r)) => float_op(operator, l, r as f64, span),
        (operator, Value::Float(l), Value::Float(r)) => float_op(operator, l, r, span),
        (operator, l, r) => Err(unsupported(
            format!("{} {} {}", l.type_name(), operator.symbol(), r.type_name()),
            span,
        )),
    }
}

/// Exact integer arithmetic; overflow and inexact division fall back to floats.
fn integer_op(operator: BinaryOp, l: i64, r: i64, span: &Span) -> Result<Value, FurError> {
    let exact = match operator {
        BinaryOp::Add => l.checked_add(r),
        BinaryOp::Subtract => l.checked_sub(r),
        BinaryOp::Multiply => l.checked_mul(r),
        BinaryOp::Divide => {
            if r == 0 {
                return Err(division_by_zero(span));
            }
            if l.checked_rem(r) == Some(0) {
                l.checked_div(r)
            } else {
                None
            }
        }
    };

    match exact {
        Some(n) => Ok(Value::Integer(n)),
        None => float_op(operator, l as f64, r as f64, span),
    }
}

fn float_op(operator: BinaryOp, l: f64, r: f64, span: &Span) -> Result<Value, FurError> {
    let result = match operator {
        BinaryOp::Add => l + r,
        BinaryOp::Subtract => l - r,
        BinaryOp::Multiply => l * r,
        BinaryOp::Divide => {
            if r == 0.0 {
                return Err(division_by_zero(span));
            }
            l / r
        }
    };
    Ok(Value::Float(result))
}

fn unsupported(detail: String, span: &Span) -> FurError {
    FurError::runtime_error(RuntimeErrorKind::UnsupportedOperator(detail), span.clone())
        .with_help("Arithmetic works on integers and floats; '+' also joins two strings.")
}

fn division_by_zero(span: &Span) -> FurError {
    FurError::runtime_error(RuntimeErrorKind::DivisionByZero, span.clone())
}
