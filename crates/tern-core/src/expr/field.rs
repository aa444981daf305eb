use super::{EntityExpression, Expr, ExprParameter, Mapping, StructureFieldExpression};
use crate::{schema::FieldInfo, Error, Result};
use std::sync::Arc;

/// A scalar persistent field read from a single column.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldExpression {
    pub field: Arc<FieldInfo>,
    pub mapping: Mapping,

    /// The entity or structure the field was read through. Members stored
    /// inside their parent carry no owner.
    pub owner: Option<Owner>,

    pub outer_parameter: Option<ExprParameter>,
}

/// Back-reference from a field to the node it was read through.
#[derive(Debug, Clone, PartialEq)]
pub enum Owner {
    Entity(Arc<EntityExpression>),
    Structure(Arc<StructureFieldExpression>),
}

impl FieldExpression {
    pub fn new(field: impl Into<Arc<FieldInfo>>, offset: usize) -> FieldExpression {
        FieldExpression {
            field: field.into(),
            mapping: Mapping::single(offset),
            owner: None,
            outer_parameter: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.field.name
    }

    pub fn with_owner(&self, owner: Option<Owner>) -> FieldExpression {
        FieldExpression {
            owner,
            ..self.clone()
        }
    }

    pub fn with_outer_parameter(&self, outer_parameter: Option<ExprParameter>) -> FieldExpression {
        FieldExpression {
            outer_parameter,
            ..self.clone()
        }
    }

    /// The entity at the end of this field's owner chain.
    pub fn owning_entity(&self) -> Result<Arc<EntityExpression>> {
        match &self.owner {
            Some(owner) => owner.entity(self.name()),
            None => Err(Error::owner_resolution(format!(
                "field `{}` has no owner",
                self.name()
            ))),
        }
    }
}

impl Owner {
    /// Walks the chain of structure owners up to the entity. `name` names the
    /// field the walk started from and is only used for error messages.
    pub fn entity(&self, name: &str) -> Result<Arc<EntityExpression>> {
        let mut owner = self;

        loop {
            match owner {
                Owner::Entity(entity) => return Ok(entity.clone()),
                Owner::Structure(structure) => match &structure.owner {
                    Some(next) => owner = next,
                    None => {
                        return Err(Error::owner_resolution(format!(
                            "field `{name}` is owned by structure `{}` which has no entity owner",
                            structure.name()
                        )))
                    }
                },
            }
        }
    }
}

impl From<Arc<EntityExpression>> for Owner {
    fn from(value: Arc<EntityExpression>) -> Self {
        Owner::Entity(value)
    }
}

impl From<Arc<StructureFieldExpression>> for Owner {
    fn from(value: Arc<StructureFieldExpression>) -> Self {
        Owner::Structure(value)
    }
}

impl From<Owner> for Expr {
    fn from(value: Owner) -> Self {
        match value {
            Owner::Entity(entity) => Expr::Entity(entity),
            Owner::Structure(structure) => Expr::StructureField(structure),
        }
    }
}

impl Expr {
    /// The owner of a field node, if any.
    pub fn owner(&self) -> Option<&Owner> {
        match self {
            Expr::Field(e) => e.owner.as_ref(),
            Expr::StructureField(e) => e.owner.as_ref(),
            Expr::EntityField(e) => e.owner.as_ref(),
            _ => None,
        }
    }

    /// Returns a copy of a field node with its owner replaced. Any other node
    /// is returned as is.
    pub fn with_owner(&self, owner: Option<Owner>) -> Expr {
        match self {
            Expr::Field(e) => e.with_owner(owner).into(),
            Expr::StructureField(e) => e.with_owner(owner).into(),
            Expr::EntityField(e) => e.with_owner(owner).into(),
            _ => self.clone(),
        }
    }
}
