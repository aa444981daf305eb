use super::{ApplyParameter, Expr, ExprMember, Type, Value};
use crate::{Error, Result};
use std::sync::Arc;

/// A method call. Reads of a tuple element are calls of
/// [`Method::TupleGetValue`] on the tuple with the element index as the only
/// argument.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprCall {
    /// Receiver; `None` for static calls.
    pub object: Option<Expr>,
    pub method: Method,
    pub args: Vec<Expr>,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    /// `tuple.GetValueOrDefault<T>(index)`
    TupleGetValue,

    /// Any other host method, by name.
    Named(Arc<str>),
}

impl core::fmt::Display for Method {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Method::TupleGetValue => f.write_str("GetValueOrDefault"),
            Method::Named(name) => f.write_str(name),
        }
    }
}

/// Name of the member exposing the current outer row of an apply parameter.
pub(crate) const APPLY_PARAMETER_VALUE: &str = "Value";

impl Expr {
    pub fn call(object: Option<Expr>, method: Method, args: Vec<Expr>, ty: Type) -> Expr {
        ExprCall {
            object,
            method,
            args,
            ty,
        }
        .into()
    }

    /// `tuple[index]` typed as `ty`.
    pub fn tuple_access(tuple: impl Into<Expr>, index: usize, ty: Type) -> Expr {
        Expr::call(
            Some(tuple.into()),
            Method::TupleGetValue,
            vec![Expr::constant(Value::from(index))],
            ty,
        )
    }

    /// The current outer row of `param`: `Constant(param).Value`.
    pub fn apply_parameter_value(param: &ApplyParameter) -> Expr {
        ExprMember {
            expr: Expr::constant(param.clone()),
            member: APPLY_PARAMETER_VALUE.into(),
            ty: Type::Tuple,
        }
        .into()
    }

    /// `param.Value[index]` typed as `ty`.
    pub fn apply_parameter_access(param: &ApplyParameter, index: usize, ty: Type) -> Expr {
        Expr::tuple_access(Expr::apply_parameter_value(param), index, ty)
    }

    pub fn is_tuple_access(&self) -> bool {
        matches!(self, Expr::Call(call) if call.method == Method::TupleGetValue && call.object.is_some())
    }

    /// If this is a tuple element read, returns the tuple expression and the
    /// literal element index.
    pub fn as_tuple_access(&self) -> Result<Option<(&Expr, usize)>> {
        let Expr::Call(call) = self else {
            return Ok(None);
        };

        match call.as_tuple_access() {
            Some(target) => Ok(Some((target, call.tuple_access_index()?))),
            None => Ok(None),
        }
    }

    /// Returns the tuple access call if this is a read of an element of the
    /// outer row identified by `param`.
    pub fn as_apply_parameter_access(&self, param: &ApplyParameter) -> Option<&Arc<ExprCall>> {
        let Expr::Call(call) = self else {
            return None;
        };

        let Expr::Member(member) = call.as_tuple_access()? else {
            return None;
        };

        match member.expr.as_constant() {
            Some(Value::ApplyParameter(p)) if p == param => Some(call),
            _ => None,
        }
    }

    /// Returns the apply parameter this expression reads the outer row of,
    /// if it is `Constant(param).Value`.
    pub fn as_apply_parameter_value(&self) -> Option<&ApplyParameter> {
        let Expr::Member(member) = self else {
            return None;
        };

        if &*member.member != APPLY_PARAMETER_VALUE {
            return None;
        }

        match member.expr.as_constant() {
            Some(Value::ApplyParameter(param)) => Some(param),
            _ => None,
        }
    }
}

impl ExprCall {
    /// Returns the tuple expression if this call reads a tuple element.
    pub fn as_tuple_access(&self) -> Option<&Expr> {
        match (&self.method, &self.object) {
            (Method::TupleGetValue, Some(object)) if self.args.len() == 1 => Some(object),
            _ => None,
        }
    }

    /// Evaluates the element index of a tuple access. The index must be a
    /// constant expression.
    pub fn tuple_access_index(&self) -> Result<usize> {
        let Some(arg) = self.args.first() else {
            return Err(Error::invalid_expression(format!(
                "`{}` call has no index argument",
                self.method
            )));
        };

        let index = arg
            .eval_const()
            .ok()
            .and_then(|value| value.to_integer())
            .ok_or_else(|| {
                Error::invalid_expression(format!(
                    "tuple access index must be a literal integer; actual={}",
                    arg.describe()
                ))
            })?;

        usize::try_from(index).map_err(|_| {
            Error::invalid_expression(format!("tuple access index {index} is negative"))
        })
    }
}
