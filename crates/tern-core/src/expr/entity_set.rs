use super::{EntityExpression, ExprParameter};
use crate::schema::FieldInfo;
use std::sync::Arc;

/// A collection of entities referencing `owner`. Resolved through a join or
/// sub-query rather than inline columns, so it has no mapping of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySetExpression {
    pub field: Arc<FieldInfo>,
    pub owner: Arc<EntityExpression>,
    pub outer_parameter: Option<ExprParameter>,
}

impl EntitySetExpression {
    pub fn new(field: impl Into<Arc<FieldInfo>>, owner: Arc<EntityExpression>) -> EntitySetExpression {
        EntitySetExpression {
            field: field.into(),
            owner,
            outer_parameter: None,
        }
    }
}
