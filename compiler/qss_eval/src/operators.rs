//! Operator implementations.
//!
//! Direct enum dispatch over the fixed value set. Units follow simple
//! rules: a plain number adopts the other operand's unit, two dimensions
//! must agree, and dividing two same-unit dimensions yields a plain ratio.

use qss_ir::{BinaryOp, Span, UnaryOp};

use crate::{EvalError, Value};

pub(crate) fn evaluate_binary(
    op: BinaryOp,
    left: &Value,
    right: &Value,
    span: Span,
) -> Result<Value, EvalError> {
    match op {
        BinaryOp::Eq => Ok(Value::Bool(values_equal(left, right))),
        BinaryOp::NotEq => Ok(Value::Bool(!values_equal(left, right))),
        BinaryOp::Lt | BinaryOp::Gt => compare(op, left, right, span),
        BinaryOp::Add if left.is_textual() || right.is_textual() => {
            Ok(Value::Text(format!("{left}{right}")))
        }
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => {
            arithmetic(op, left, right, span)
        }
    }
}

pub(crate) fn evaluate_unary(op: UnaryOp, operand: Value, span: Span) -> Result<Value, EvalError> {
    match (op, operand) {
        (UnaryOp::Neg, Value::Number(n)) => Ok(Value::Number(-n)),
        (UnaryOp::Neg, Value::Dimension { value, unit }) => Ok(Value::Dimension {
            value: -value,
            unit,
        }),
        (UnaryOp::Neg, other) => Err(EvalError::TypeMismatch {
            op: op.as_symbol(),
            operands: other.type_name().to_owned(),
            span,
        }),
    }
}

/// Numbers compare by magnitude and unit, everything else by literal value.
fn values_equal(left: &Value, right: &Value) -> bool {
    match (left.as_numeric(), right.as_numeric()) {
        (Some((a, unit_a)), Some((b, unit_b))) => a == b && unit_a == unit_b,
        _ => left == right,
    }
}

fn compare(op: BinaryOp, left: &Value, right: &Value, span: Span) -> Result<Value, EvalError> {
    let (a, b, _) = numeric_operands(op, left, right, span)?;
    Ok(Value::Bool(if op == BinaryOp::Lt { a < b } else { a > b }))
}

fn arithmetic(op: BinaryOp, left: &Value, right: &Value, span: Span) -> Result<Value, EvalError> {
    let (a, b, unit) = numeric_operands(op, left, right, span)?;
    let both_dimensions = matches!(
        (left, right),
        (Value::Dimension { .. }, Value::Dimension { .. })
    );

    let (result, unit) = match op {
        BinaryOp::Add => (a + b, unit),
        BinaryOp::Sub => (a - b, unit),
        BinaryOp::Mul if both_dimensions => return Err(mismatch(op, left, right, span)),
        BinaryOp::Mul => (a * b, unit),
        BinaryOp::Div => {
            if b == 0.0 {
                return Err(EvalError::DivisionByZero { span });
            }
            match (left, right) {
                (Value::Dimension { .. }, Value::Dimension { .. }) => (a / b, None),
                (Value::Number(_), Value::Dimension { .. }) => {
                    return Err(mismatch(op, left, right, span))
                }
                _ => (a / b, unit),
            }
        }
        BinaryOp::Eq | BinaryOp::NotEq | BinaryOp::Lt | BinaryOp::Gt => {
            return Err(mismatch(op, left, right, span))
        }
    };

    Ok(match unit {
        Some(unit) => Value::Dimension {
            value: result,
            unit: unit.to_owned(),
        },
        None => Value::Number(result),
    })
}

/// Magnitudes of two numeric operands plus their common unit.
fn numeric_operands<'v>(
    op: BinaryOp,
    left: &'v Value,
    right: &'v Value,
    span: Span,
) -> Result<(f64, f64, Option<&'v str>), EvalError> {
    let (Some((a, unit_a)), Some((b, unit_b))) = (left.as_numeric(), right.as_numeric()) else {
        return Err(mismatch(op, left, right, span));
    };
    let unit = match (unit_a, unit_b) {
        (Some(x), Some(y)) if x != y => return Err(mismatch(op, left, right, span)),
        (Some(x), _) | (None, Some(x)) => Some(x),
        (None, None) => None,
    };
    Ok((a, b, unit))
}

fn mismatch(op: BinaryOp, left: &Value, right: &Value, span: Span) -> EvalError {
    let describe = |value: &Value| match value {
        Value::Dimension { unit, .. } => format!("dimension ({unit})"),
        other => other.type_name().to_owned(),
    };
    EvalError::TypeMismatch {
        op: op.as_symbol(),
        operands: format!("{} and {}", describe(left), describe(right)),
        span,
    }
}
