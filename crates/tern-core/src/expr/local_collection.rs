use super::{Expr, ExprParameter, Type};
use indexmap::IndexMap;
use std::sync::Arc;

/// A client-side value used inside a query, described by the expressions
/// producing each of its members.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalCollectionExpression {
    pub ty: Type,
    pub fields: IndexMap<Arc<str>, Expr>,
    pub outer_parameter: Option<ExprParameter>,
}

impl LocalCollectionExpression {
    pub fn new(ty: Type, fields: IndexMap<Arc<str>, Expr>) -> LocalCollectionExpression {
        LocalCollectionExpression {
            ty,
            fields,
            outer_parameter: None,
        }
    }
}
