use super::{ExprParameter, Mapping};
use std::sync::Arc;

/// The ordered columns identifying an instance of `entity`.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyExpression {
    /// Name of the entity type the key identifies.
    pub entity: Arc<str>,

    pub mapping: Mapping,
    pub outer_parameter: Option<ExprParameter>,
}

impl KeyExpression {
    pub fn new(entity: impl Into<Arc<str>>, mapping: impl Into<Mapping>) -> KeyExpression {
        KeyExpression {
            entity: entity.into(),
            mapping: mapping.into(),
            outer_parameter: None,
        }
    }
}
