use super::{Expr, SubQueryExpression};

/// A correlated nested query producing the rows of one group, along with
/// the group key.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupingExpression {
    pub sub_query: SubQueryExpression,
    pub key: Expr,
}

impl GroupingExpression {
    pub fn new(sub_query: SubQueryExpression, key: impl Into<Expr>) -> GroupingExpression {
        GroupingExpression {
            sub_query,
            key: key.into(),
        }
    }
}
