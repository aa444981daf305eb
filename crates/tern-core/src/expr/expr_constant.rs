use super::{Expr, Type, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct ExprConstant {
    pub value: Value,
    pub ty: Type,
}

impl Expr {
    /// A constant typed by its value. Use [`Expr::constant_typed`] for null
    /// or when the static type differs from the value's natural type.
    pub fn constant(value: impl Into<Value>) -> Expr {
        let value = value.into();
        let ty = value.infer_ty();
        ExprConstant { value, ty }.into()
    }

    pub fn constant_typed(value: impl Into<Value>, ty: Type) -> Expr {
        ExprConstant {
            value: value.into(),
            ty,
        }
        .into()
    }

    pub fn null(ty: Type) -> Expr {
        Expr::constant_typed(Value::Null, ty)
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Expr::Constant(_))
    }

    pub fn as_constant(&self) -> Option<&Value> {
        match self {
            Expr::Constant(constant) => Some(&constant.value),
            _ => None,
        }
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::constant(value)
    }
}
