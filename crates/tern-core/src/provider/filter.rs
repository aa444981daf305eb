use super::Provider;
use crate::Expr;

/// Rows of `source` for which `predicate`, a lambda over the row tuple,
/// holds.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterProvider {
    pub source: Provider,
    pub predicate: Expr,
}

impl FilterProvider {
    pub fn new(source: impl Into<Provider>, predicate: impl Into<Expr>) -> FilterProvider {
        FilterProvider {
            source: source.into(),
            predicate: predicate.into(),
        }
    }
}
