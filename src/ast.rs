use crate::error::Span;

/// Root of a parsed script: statements in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `purr(expr)`
    Print {
        argument: Expr,
        span: Span,
    },
    /// `meow name = expr`
    VariableDeclaration {
        name: String,
        value: Expr,
        span: Span,
    },
    /// A bare `name` or `woof name`; only checks that the binding exists.
    VariableAccess {
        name: String,
        span: Span,
    },
    /// `trick name(params) { body }`
    FunctionDeclaration {
        name: String,
        parameters: Vec<Identifier>,
        body: Vec<Stmt>,
        span: Span,
    },
    Expression {
        expr: Expr,
        span: Span,
    },
}

impl Stmt {
    pub fn span(&self) -> &Span {
        match self {
            Stmt::Print { span, .. } => span,
            Stmt::VariableDeclaration { span, .. } => span,
            Stmt::VariableAccess { span, .. } => span,
            Stmt::FunctionDeclaration { span, .. } => span,
            Stmt::Expression { span, .. } => span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    StringLiteral {
        value: String,
        span: Span,
    },
    IntegerLiteral {
        value: i64,
        span: Span,
    },
    FloatLiteral {
        value: f64,
        span: Span,
    },
    Identifier(Identifier),
    FunctionCall {
        name: String,
        args: Vec<Expr>,
        span: Span,
    },
    Unary {
        operator: UnaryOp,
        operand: Box<Expr>,
        span: Span,
    },
    Binary {
        left: Box<Expr>,
        operator: BinaryOp,
        right: Box<Expr>,
        span: Span,
    },
}

impl Expr {
    pub fn span(&self) -> &Span {
        match self {
            Expr::StringLiteral { span, .. } => span,
            Expr::IntegerLiteral { span, .. } => span,
            Expr::FloatLiteral { span, .. } => span,
            Expr::Identifier(identifier) => &identifier.span,
            Expr::FunctionCall { span, .. } => span,
            Expr::Unary { span, .. } => span,
            Expr::Binary { span, .. } => span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnaryOp {
    Negate,
}
