use super::{EntityExpression, ExprParameter, KeyExpression, Mapping, Owner};
use crate::schema::FieldInfo;
use std::sync::Arc;

/// A reference to another entity, read as the referenced entity's key.
///
/// `entity` is set once the referenced row has been joined into the data
/// source; until then only the key columns are available.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityFieldExpression {
    pub field: Arc<FieldInfo>,
    pub key: Arc<KeyExpression>,
    pub entity: Option<Arc<EntityExpression>>,
    pub owner: Option<Owner>,
    pub outer_parameter: Option<ExprParameter>,
}

impl EntityFieldExpression {
    pub fn new(field: impl Into<Arc<FieldInfo>>, key: impl Into<Arc<KeyExpression>>) -> EntityFieldExpression {
        EntityFieldExpression {
            field: field.into(),
            key: key.into(),
            entity: None,
            owner: None,
            outer_parameter: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.field.name
    }

    /// Entity references occupy only their key's columns.
    pub fn mapping(&self) -> Mapping {
        self.key.mapping
    }

    pub fn with_owner(&self, owner: Option<Owner>) -> EntityFieldExpression {
        EntityFieldExpression {
            owner,
            ..self.clone()
        }
    }

    pub fn with_entity(&self, entity: Arc<EntityExpression>) -> EntityFieldExpression {
        EntityFieldExpression {
            entity: Some(entity),
            ..self.clone()
        }
    }
}
