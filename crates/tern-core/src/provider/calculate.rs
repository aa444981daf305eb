use super::Provider;
use crate::{expr::Type, Expr};
use std::sync::Arc;

/// `source` rows followed by one calculated value per column.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculateProvider {
    pub source: Provider,
    pub columns: Vec<CalculatedColumn>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalculatedColumn {
    pub name: Arc<str>,
    pub ty: Type,

    /// Lambda over the source row tuple.
    pub expression: Expr,
}

impl CalculateProvider {
    pub fn new(source: impl Into<Provider>, columns: Vec<CalculatedColumn>) -> CalculateProvider {
        CalculateProvider {
            source: source.into(),
            columns,
        }
    }
}

impl CalculatedColumn {
    pub fn new(name: impl Into<Arc<str>>, ty: Type, expression: impl Into<Expr>) -> CalculatedColumn {
        CalculatedColumn {
            name: name.into(),
            ty,
            expression: expression.into(),
        }
    }
}
