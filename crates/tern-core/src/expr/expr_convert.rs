use super::{Expr, Type};

/// Explicit conversion of `expr` to `ty`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprConvert {
    pub expr: Expr,
    pub ty: Type,
}

impl Expr {
    pub fn convert(expr: impl Into<Expr>, ty: Type) -> Expr {
        ExprConvert {
            expr: expr.into(),
            ty,
        }
        .into()
    }

    pub fn is_convert(&self) -> bool {
        matches!(self, Expr::Convert(_))
    }
}
