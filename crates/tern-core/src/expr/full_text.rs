use super::{ColumnExpression, EntityExpression, ExprParameter};
use std::sync::Arc;

/// The result of a full-text match: the matched entity and its rank.
#[derive(Debug, Clone, PartialEq)]
pub struct FullTextExpression {
    /// Name of the full-text index searched.
    pub full_text_index: Arc<str>,

    pub entity: Arc<EntityExpression>,
    pub rank: Arc<ColumnExpression>,
    pub outer_parameter: Option<ExprParameter>,
}

impl FullTextExpression {
    pub fn new(
        full_text_index: impl Into<Arc<str>>,
        entity: Arc<EntityExpression>,
        rank: impl Into<Arc<ColumnExpression>>,
    ) -> FullTextExpression {
        FullTextExpression {
            full_text_index: full_text_index.into(),
            entity,
            rank: rank.into(),
            outer_parameter: None,
        }
    }
}
