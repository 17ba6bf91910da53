//! Walks the expression tree, consulting a [`UnitResolver`] for symbol
//! lookups, and produces a runtime [`Value`] (§4.7).

use crate::ast::{BinaryOp, Expr, UnaryOp, UnitExpr, UnitOp};
use crate::dimension::Dimension;
use crate::error::DimError;
use crate::format::FormatMode;
use crate::normalize::normalize;
use crate::registry::Registry;
use crate::unit::Unit;
use crate::value::{Quantity, Value};

/// Cross-registry symbol lookup, implemented by the driver (§4.3, §4.4):
/// constants table, then every built-in/user registry.
pub trait UnitResolver {
    fn resolve(&self, symbol: &str) -> Option<Unit>;
    /// The registries consulted, in order, for the normalizer (§4.9).
    fn registries_for_normalize(&self) -> Vec<&Registry>;
    fn record_constant(&mut self, name: &str, dim: Dimension, canonical_value: f64);
}

type EResult<T> = Result<T, DimError>;

/// The outcome of evaluating a `UnitExpr`: its combined multiplicative
/// factor, its dimension, the literal (un-normalized) symbol built by
/// concatenating operand symbols, and — only when the expression is a
/// bare `UnitTerm` at exponent 1 — the real registry `Unit` so the caller
/// can use its affine-aware conversion.
struct UnitExprValue {
    factor: f64,
    dim: Dimension,
    symbol: String,
    simple_affine_unit: Option<Unit>,
}

fn eval_unit_expr(expr: &UnitExpr, resolver: &dyn UnitResolver) -> EResult<UnitExprValue> {
    match expr {
        UnitExpr::Term { name, exp } => {
            let unit = resolver.resolve(name).ok_or_else(|| DimError::UndefinedVariable(name.clone()))?;
            let symbol = if *exp == 1 { unit.symbol.clone() } else { format!("{}^{exp}", unit.symbol) };
            Ok(UnitExprValue {
                factor: unit.canonical_factor_pow(*exp),
                dim: unit.dim.powi(*exp),
                symbol,
                simple_affine_unit: if *exp == 1 { Some(unit) } else { None },
            })
        }
        UnitExpr::Compound { op, lhs, rhs } => {
            let l = eval_unit_expr(lhs, resolver)?;
            let r = eval_unit_expr(rhs, resolver)?;
            let (factor, dim, joiner) = match op {
                UnitOp::Mul => (l.factor * r.factor, l.dim.add(&r.dim), '*'),
                UnitOp::Div => {
                    if r.factor == 0.0 {
                        return Err(DimError::DivisionByZero);
                    }
                    (l.factor / r.factor, l.dim.sub(&r.dim), '/')
                }
            };
            Ok(UnitExprValue {
                factor,
                dim,
                symbol: format!("{}{joiner}{}", l.symbol, r.symbol),
                simple_affine_unit: None,
            })
        }
    }
}

/// Evaluates one expression against the given resolver, which also
/// receives the side effect of `Assignment` nodes.
pub fn evaluate(expr: &Expr, resolver: &mut dyn UnitResolver) -> EResult<Value> {
    match expr {
        Expr::Number(n) => Ok(Value::Number(*n)),

        Expr::Grouping(inner) => evaluate(inner, resolver),

        Expr::UnitApplied { number, unit } => {
            let num = match evaluate(number, resolver)? {
                Value::Number(n) => n,
                other => return Err(DimError::InvalidOperand(format!("expected a number before a unit, got {}", other.type_name()))),
            };
            let v = eval_unit_expr(unit, resolver)?;
            let value = match &v.simple_affine_unit {
                Some(u) if u.is_affine() => u.to_canonical(num),
                _ => num * v.factor,
            };
            let registries = resolver.registries_for_normalize();
            let display_unit = normalize(&v.dim, &registries, &v.symbol);
            Ok(Value::Quantity(Quantity::new(value, v.dim, display_unit)))
        }

        Expr::Unary { op, child } => {
            let val = evaluate(child, resolver)?;
            match op {
                UnaryOp::Neg => match val {
                    Value::Number(n) => Ok(Value::Number(-n)),
                    Value::Quantity(mut q) => {
                        q.value = -q.value;
                        Ok(Value::Quantity(q))
                    }
                    other => Err(DimError::InvalidOperand(format!("cannot negate {}", other.type_name()))),
                },
                UnaryOp::Not => Ok(Value::Boolean(!val.is_truthy())),
            }
        }

        Expr::Binary { op, lhs, rhs } => eval_binary(*op, lhs, rhs, resolver),

        Expr::Display { child, unit, mode } => {
            let val = evaluate(child, resolver)?;
            let q = match val {
                Value::Quantity(q) => q,
                other => return Err(DimError::InvalidOperands(format!("'as' requires a quantity, got {}", other.type_name()))),
            };
            let v = eval_unit_expr(unit, resolver)?;
            if !q.dim.eql(&v.dim) {
                return Err(DimError::DimensionMismatch(q.dim, v.dim));
            }
            let value = match &v.simple_affine_unit {
                Some(u) if u.is_affine() => u.from_canonical(q.value),
                _ => q.value / v.factor,
            };
            let format_mode = mode.as_deref().map(FormatMode::parse).unwrap_or(FormatMode::None);
            Ok(Value::Quantity(Quantity::new(value, v.dim, v.symbol).with_mode(format_mode).with_delta(q.is_delta)))
        }

        Expr::Assignment { name, value } => {
            let val = evaluate(value, resolver)?;
            let q = match val {
                Value::Quantity(ref q) => q.clone(),
                other => return Err(DimError::InvalidOperand(format!("assignment requires a quantity, got {}", other.type_name()))),
            };
            resolver.record_constant(name, q.dim, q.value);
            Ok(Value::Quantity(q))
        }
    }
}

fn eval_binary(op: BinaryOp, lhs: &Expr, rhs: &Expr, resolver: &mut dyn UnitResolver) -> EResult<Value> {
    let l = evaluate(lhs, resolver)?;
    let r = evaluate(rhs, resolver)?;

    match op {
        BinaryOp::Add | BinaryOp::Sub => eval_add_sub(op, l, r),
        BinaryOp::Mul => eval_mul_div(UnitOp::Mul, l, r, resolver),
        BinaryOp::Div => eval_mul_div(UnitOp::Div, l, r, resolver),
        BinaryOp::Pow => eval_pow(l, r, resolver),
        BinaryOp::Greater | BinaryOp::GreaterEqual | BinaryOp::Less | BinaryOp::LessEqual => eval_order_comparison(op, l, r),
        BinaryOp::Equal | BinaryOp::EqualEqual => Ok(Value::Boolean(values_equal(&l, &r))),
        BinaryOp::BangEqual => Ok(Value::Boolean(!values_equal(&l, &r))),
        BinaryOp::And => Ok(Value::Boolean(l.is_truthy() && r.is_truthy())),
        BinaryOp::Or => Ok(Value::Boolean(l.is_truthy() || r.is_truthy())),
    }
}

/// Temperature alone, at exponent 1: the one axis the spec calls out as
/// having delta/absolute semantics (§Glossary "Delta").
fn is_bare_temperature(dim: &Dimension) -> bool {
    dim.exponents == [0, 0, 0, 0, 1, 0, 0]
}

fn eval_add_sub(op: BinaryOp, l: Value, r: Value) -> EResult<Value> {
    match (l, r) {
        (Value::Number(a), Value::Number(b)) => {
            Ok(Value::Number(if op == BinaryOp::Add { a + b } else { a - b }))
        }
        (Value::Quantity(a), Value::Quantity(b)) => {
            if !a.dim.eql(&b.dim) {
                return Err(DimError::DimensionMismatch(a.dim, b.dim));
            }
            let value = if op == BinaryOp::Add { a.value + b.value } else { a.value - b.value };
            // Subtracting two absolute temperatures yields a delta; every
            // other case inherits the left operand's delta-ness.
            let is_delta = if op == BinaryOp::Sub && is_bare_temperature(&a.dim) { true } else { a.is_delta };
            Ok(Value::Quantity(Quantity::new(value, a.dim, a.unit).with_delta(is_delta)))
        }
        (a, b) => Err(DimError::InvalidOperands(format!("cannot {} {} and {}", if op == BinaryOp::Add { "add" } else { "subtract" }, a.type_name(), b.type_name()))),
    }
}

fn eval_mul_div(op: UnitOp, l: Value, r: Value, resolver: &dyn UnitResolver) -> EResult<Value> {
    match (l, r) {
        (Value::Number(a), Value::Number(b)) => match op {
            UnitOp::Mul => Ok(Value::Number(a * b)),
            UnitOp::Div => {
                if b == 0.0 {
                    return Err(DimError::DivisionByZero);
                }
                Ok(Value::Number(a / b))
            }
        },
        (Value::Quantity(q), Value::Number(n)) | (Value::Number(n), Value::Quantity(q)) => match op {
            UnitOp::Mul => Ok(Value::Quantity(Quantity::new(q.value * n, q.dim, q.unit))),
            UnitOp::Div => {
                if n == 0.0 {
                    return Err(DimError::DivisionByZero);
                }
                Ok(Value::Quantity(Quantity::new(q.value / n, q.dim, q.unit)))
            }
        },
        (Value::Quantity(a), Value::Quantity(b)) => {
            let (dim, value, fallback) = match op {
                UnitOp::Mul => (a.dim.add(&b.dim), a.value * b.value, format!("{}*{}", a.unit, b.unit)),
                UnitOp::Div => {
                    if b.value == 0.0 {
                        return Err(DimError::DivisionByZero);
                    }
                    (a.dim.sub(&b.dim), a.value / b.value, format!("{}/{}", a.unit, b.unit))
                }
            };
            let registries = resolver.registries_for_normalize();
            let display_unit = normalize(&dim, &registries, &fallback);
            Ok(Value::Quantity(Quantity::new(value, dim, display_unit)))
        }
        (a, b) => Err(DimError::InvalidOperands(format!("cannot multiply/divide {} and {}", a.type_name(), b.type_name()))),
    }
}

fn eval_pow(base: Value, exp: Value, resolver: &dyn UnitResolver) -> EResult<Value> {
    let exp_n = match exp {
        Value::Number(n) => n,
        other => return Err(DimError::InvalidOperand(format!("exponent must be a number, got {}", other.type_name()))),
    };
    match base {
        Value::Number(n) => Ok(Value::Number(n.powf(exp_n))),
        Value::Quantity(q) => {
            let rounded = exp_n.round();
            let dim = if (exp_n - rounded).abs() < 1e-9 {
                q.dim.powi(rounded as i32)
            } else {
                q.dim.powf(exp_n)?
            };
            let value = q.value.powf(exp_n);
            let registries = resolver.registries_for_normalize();
            let fallback = format!("{}^{exp_n}", q.unit);
            let display_unit = normalize(&dim, &registries, &fallback);
            Ok(Value::Quantity(Quantity::new(value, dim, display_unit)))
        }
        other => Err(DimError::InvalidOperand(format!("cannot raise {} to a power", other.type_name()))),
    }
}

fn eval_order_comparison(op: BinaryOp, l: Value, r: Value) -> EResult<Value> {
    let (a, b) = match (l, r) {
        (Value::Number(a), Value::Number(b)) => (a, b),
        (Value::Quantity(a), Value::Quantity(b)) => {
            if !a.dim.eql(&b.dim) {
                return Err(DimError::DimensionMismatch(a.dim, b.dim));
            }
            (a.value, b.value)
        }
        (a, b) => return Err(DimError::InvalidOperands(format!("cannot compare {} and {}", a.type_name(), b.type_name()))),
    };
    let result = match op {
        BinaryOp::Greater => a > b,
        BinaryOp::GreaterEqual => a >= b,
        BinaryOp::Less => a < b,
        BinaryOp::LessEqual => a <= b,
        _ => unreachable!("not an ordering operator"),
    };
    Ok(Value::Boolean(result))
}

fn values_equal(l: &Value, r: &Value) -> bool {
    match (l, r) {
        (Value::Nil, Value::Nil) => true,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Boolean(a), Value::Boolean(b)) => a == b,
        (Value::Quantity(a), Value::Quantity(b)) => a.dim.eql(&b.dim) && a.value == b.value,
        _ => false,
    }
}
