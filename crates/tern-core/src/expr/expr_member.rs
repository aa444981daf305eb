use super::{Expr, Type};
use std::sync::Arc;

/// `expr.member`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprMember {
    pub expr: Expr,
    pub member: Arc<str>,
    pub ty: Type,
}

impl Expr {
    pub fn member(expr: impl Into<Expr>, member: impl Into<Arc<str>>, ty: Type) -> Expr {
        ExprMember {
            expr: expr.into(),
            member: member.into(),
            ty,
        }
        .into()
    }
}
