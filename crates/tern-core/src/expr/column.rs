use super::{ExprParameter, Mapping, Type};

/// A single already-resolved column, such as an aggregate result or a
/// full-text rank.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnExpression {
    pub ty: Type,
    pub mapping: Mapping,
    pub outer_parameter: Option<ExprParameter>,
}

impl ColumnExpression {
    pub fn new(ty: Type, offset: usize) -> ColumnExpression {
        ColumnExpression {
            ty,
            mapping: Mapping::single(offset),
            outer_parameter: None,
        }
    }
}
