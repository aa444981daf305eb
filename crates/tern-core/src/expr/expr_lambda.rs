use super::{Expr, ExprParameter};
use std::sync::Arc;

/// A function body over formal parameters, e.g. `row => row[2] + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprLambda {
    pub params: Vec<ExprParameter>,
    pub body: Expr,
}

impl ExprLambda {
    pub fn new(params: Vec<ExprParameter>, body: impl Into<Expr>) -> ExprLambda {
        ExprLambda {
            params,
            body: body.into(),
        }
    }
}

impl Expr {
    pub fn lambda(params: Vec<ExprParameter>, body: impl Into<Expr>) -> Expr {
        ExprLambda::new(params, body).into()
    }

    pub fn as_lambda(&self) -> Option<&Arc<ExprLambda>> {
        match self {
            Expr::Lambda(lambda) => Some(lambda),
            _ => None,
        }
    }
}
