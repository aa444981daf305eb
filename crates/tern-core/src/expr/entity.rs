use super::{
    structure_field::member_name, Expr, ExprParameter, FieldExpression, KeyExpression, Mapping,
    Owner,
};
use crate::{schema::PersistentType, Error, Result};
use std::sync::Arc;

/// A persistent object: its key plus the fields read from the same row.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityExpression {
    pub persistent_type: Arc<PersistentType>,

    /// Exactly one key plus fields, structure fields and entity references,
    /// in declaration order and stored without owners.
    pub fields: Vec<Expr>,

    /// The key among `fields`.
    pub key: Arc<KeyExpression>,

    /// Concatenation of the members' mappings.
    pub mapping: Mapping,

    pub outer_parameter: Option<ExprParameter>,
}

impl EntityExpression {
    /// Builds an entity from its members.
    ///
    /// Fails unless there is exactly one key, the type's discriminator (if it
    /// declares one) names exactly one field, and the members' mappings are
    /// adjacent.
    pub fn new(
        persistent_type: impl Into<Arc<PersistentType>>,
        fields: Vec<Expr>,
    ) -> Result<EntityExpression> {
        let persistent_type = persistent_type.into();
        let name = &persistent_type.name;

        let mut key = None;
        let mut discriminators = 0;
        let mut mappings = Vec::with_capacity(fields.len());
        let mut members = Vec::with_capacity(fields.len());

        for member in fields {
            match &member {
                Expr::Key(k) => {
                    if key.replace(k.clone()).is_some() {
                        return Err(Error::invalid_expression(format!(
                            "entity `{name}` has more than one key"
                        )));
                    }
                }
                Expr::Field(_) | Expr::StructureField(_) | Expr::EntityField(_) => {}
                _ => {
                    return Err(Error::invalid_expression(format!(
                        "entity `{name}` cannot hold {}",
                        member.describe()
                    )))
                }
            }

            if let Some(field) = member_name(&member) {
                if persistent_type.is_discriminator(field) {
                    discriminators += 1;
                }
            }

            if let Some(mapping) = member.mapping() {
                mappings.push(mapping);
            }

            members.push(member.with_owner(None));
        }

        let Some(key) = key else {
            return Err(Error::invalid_expression(format!(
                "entity `{name}` has no key"
            )));
        };

        if let Some(discriminator) = &persistent_type.discriminator {
            if discriminators != 1 {
                return Err(Error::invalid_expression(format!(
                    "entity `{name}` must have exactly one `{discriminator}` field; found {discriminators}"
                )));
            }
        }

        let mapping = Mapping::concat(&mappings)
            .map_err(|err| err.context(err!("building entity `{name}`")))?;

        Ok(EntityExpression {
            persistent_type,
            fields: members,
            key,
            mapping,
            outer_parameter: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.persistent_type.name
    }

    pub fn with_outer_parameter(&self, outer_parameter: Option<ExprParameter>) -> EntityExpression {
        EntityExpression {
            outer_parameter,
            ..self.clone()
        }
    }

    /// Reads the named member through this entity; the returned member's
    /// owner is this entity.
    pub fn member(self: &Arc<Self>, name: &str) -> Option<Expr> {
        self.fields
            .iter()
            .find(|member| member_name(member) == Some(name))
            .map(|member| member.with_owner(Some(Owner::Entity(self.clone()))))
    }

    /// The field holding the run-time type id.
    pub fn type_id_field(&self) -> Option<&Arc<FieldExpression>> {
        let discriminator = self.persistent_type.discriminator.as_deref()?;

        self.fields.iter().find_map(|member| match member {
            Expr::Field(field) if field.name() == discriminator => Some(field),
            _ => None,
        })
    }
}

impl Expr {
    pub fn as_entity(&self) -> Option<&Arc<EntityExpression>> {
        match self {
            Expr::Entity(entity) => Some(entity),
            _ => None,
        }
    }
}
