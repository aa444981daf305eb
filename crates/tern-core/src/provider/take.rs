use super::Provider;
use crate::Expr;

/// The first `count` rows of `source`. `count` is a constant or a parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct TakeProvider {
    pub source: Provider,
    pub count: Expr,
}

impl TakeProvider {
    pub fn new(source: impl Into<Provider>, count: impl Into<Expr>) -> TakeProvider {
        TakeProvider {
            source: source.into(),
            count: count.into(),
        }
    }
}
