//! The expression tree: a tagged union of node kinds (§3 "Expression
//! tree"). Children are owned by their parent; there is no sharing.

/// A binary arithmetic/comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    Equal,
    EqualEqual,
    BangEqual,
    And,
    Or,
}

/// A unary prefix operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

/// The `*`/`/` operator inside a unit expression, kept distinct from
/// [`BinaryOp`] because unit composition never needs the full arithmetic
/// operator set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitOp {
    Mul,
    Div,
}

/// A parsed unit sub-expression: `unitTerm (("*"|"/"|"^") unitTerm)*`.
#[derive(Debug, Clone, PartialEq)]
pub enum UnitExpr {
    /// `Ident ("^" Number)?`; the exponent is truncated to `i32`.
    Term { name: String, exp: i32 },
    Compound { op: UnitOp, lhs: Box<UnitExpr>, rhs: Box<UnitExpr> },
}

/// The expression tree proper.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Grouping(Box<Expr>),
    Unary { op: UnaryOp, child: Box<Expr> },
    Binary { op: BinaryOp, lhs: Box<Expr>, rhs: Box<Expr> },
    /// `number unitExpr`, e.g. `5 m/s`.
    UnitApplied { number: Box<Expr>, unit: UnitExpr },
    /// `expr as unitExpr [":" mode]`.
    Display { child: Box<Expr>, unit: UnitExpr, mode: Option<String> },
    /// `name = ( expr )`.
    Assignment { name: String, value: Box<Expr> },
}
