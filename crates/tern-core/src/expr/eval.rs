use super::{BinaryOp, Expr, Method, UnaryOp, Value};
use crate::{Error, Result};

impl Expr {
    /// Evaluates an expression that depends on no parameter or row.
    ///
    /// Supports constants, conversions, unary and binary operators,
    /// conditionals, element reads of constant tuples and the `Length` of a
    /// constant string.
    pub fn eval_const(&self) -> Result<Value> {
        match self {
            Expr::Constant(e) => Ok(e.value.clone()),
            Expr::Convert(e) => e.ty.cast(e.expr.eval_const()?),
            Expr::Unary(e) => {
                let operand = e.operand.eval_const()?;

                match e.op {
                    UnaryOp::Not => match operand {
                        Value::Null => Ok(Value::Null),
                        operand => Ok(Value::Bool(!operand.to_bool()?)),
                    },
                    UnaryOp::Negate => match operand {
                        Value::Null => Ok(Value::Null),
                        Value::F64(v) => Ok(Value::F64(-v)),
                        operand => {
                            let integer = integer_operand(&operand)?;
                            Value::from_integer(-integer, &e.ty)
                        }
                    },
                }
            }
            Expr::Binary(e) => {
                if e.op.is_logical() {
                    let lhs = e.lhs.eval_const()?.to_bool()?;

                    // Short circuit
                    return match (e.op, lhs) {
                        (BinaryOp::AndAlso, false) => Ok(Value::Bool(false)),
                        (BinaryOp::OrElse, true) => Ok(Value::Bool(true)),
                        _ => Ok(Value::Bool(e.rhs.eval_const()?.to_bool()?)),
                    };
                }

                let lhs = e.lhs.eval_const()?;
                let rhs = e.rhs.eval_const()?;

                if e.op.is_comparison() {
                    return compare(e.op, &lhs, &rhs).map(Value::Bool);
                }

                if lhs.is_null() || rhs.is_null() {
                    return Ok(Value::Null);
                }

                let lhs = integer_operand(&lhs)?;
                let rhs = integer_operand(&rhs)?;

                let result = match e.op {
                    BinaryOp::Add => lhs.checked_add(rhs),
                    BinaryOp::Subtract => lhs.checked_sub(rhs),
                    BinaryOp::Multiply => lhs.checked_mul(rhs),
                    BinaryOp::Divide => lhs.checked_div(rhs),
                    BinaryOp::Modulo => lhs.checked_rem(rhs),
                    op => {
                        return Err(Error::expression_evaluation_failed(format!(
                            "unexpected operator {op:?}"
                        )))
                    }
                }
                .ok_or_else(|| {
                    Error::expression_evaluation_failed(format!(
                        "{:?} of {lhs} and {rhs} overflowed or divided by zero",
                        e.op
                    ))
                })?;

                Value::from_integer(result, &e.ty)
            }
            Expr::Conditional(e) => {
                if e.test.eval_const()?.to_bool()? {
                    e.if_true.eval_const()
                } else {
                    e.if_false.eval_const()
                }
            }
            Expr::Call(e) if e.method == Method::TupleGetValue => {
                let (Some(tuple), Some(index)) = (&e.object, e.args.first()) else {
                    return Err(Error::expression_evaluation_failed(
                        "malformed tuple access",
                    ));
                };

                let index = integer_operand(&index.eval_const()?)?;
                let index = usize::try_from(index).map_err(|_| {
                    Error::expression_evaluation_failed(format!("negative tuple index {index}"))
                })?;

                Ok(tuple.eval_const()?.tuple_element(index)?.clone())
            }
            Expr::Member(e) if &*e.member == "Length" => match e.expr.eval_const()? {
                Value::String(s) => i32::try_from(s.chars().count())
                    .map(Value::I32)
                    .map_err(|_| Error::expression_evaluation_failed("`Length` overflows i32")),
                Value::Null => Ok(Value::Null),
                other => Err(Error::expression_evaluation_failed(format!(
                    "`Length` of {other:?}"
                ))),
            },
            _ => Err(Error::expression_evaluation_failed(format!(
                "{} is not a constant expression",
                self.describe()
            ))),
        }
    }
}

fn integer_operand(value: &Value) -> Result<i128> {
    value.to_integer().ok_or_else(|| {
        Error::expression_evaluation_failed(format!("expected integer; actual={value:?}"))
    })
}

fn compare(op: BinaryOp, lhs: &Value, rhs: &Value) -> Result<bool> {
    use std::cmp::Ordering;

    let ordering = match (lhs, rhs) {
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::Null, _) | (_, Value::Null) => None,
        (Value::F64(a), Value::F64(b)) => a.partial_cmp(b),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Uuid(a), Value::Uuid(b)) => Some(a.cmp(b)),
        (Value::Enum(a), Value::Enum(b)) if a.ty != b.ty => {
            return Err(Error::expression_evaluation_failed(format!(
                "cannot compare enum `{}` with enum `{}`",
                a.ty.name, b.ty.name
            )))
        }
        (a, b) => match (a.to_integer(), b.to_integer()) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => {
                return Err(Error::expression_evaluation_failed(format!(
                    "cannot compare {a:?} with {b:?}"
                )))
            }
        },
    };

    Ok(match op {
        BinaryOp::Equal => ordering == Some(Ordering::Equal),
        BinaryOp::NotEqual => ordering != Some(Ordering::Equal),
        BinaryOp::LessThan => ordering == Some(Ordering::Less),
        BinaryOp::LessThanOrEqual => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        BinaryOp::GreaterThan => ordering == Some(Ordering::Greater),
        BinaryOp::GreaterThanOrEqual => {
            matches!(ordering, Some(Ordering::Greater | Ordering::Equal))
        }
        op => {
            return Err(Error::expression_evaluation_failed(format!(
                "{op:?} is not a comparison"
            )))
        }
    })
}
