use super::{Expr, ExprParameter, Mapping, Owner};
use crate::{schema::FieldInfo, Error, Result};
use std::sync::Arc;

/// An embedded value aggregate read as a field of an entity or of another
/// structure. Has no key of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureFieldExpression {
    pub field: Arc<FieldInfo>,

    /// Member fields in declaration order, stored without owners.
    pub fields: Vec<Expr>,

    /// Concatenation of the members' mappings.
    pub mapping: Mapping,

    pub owner: Option<Owner>,
    pub outer_parameter: Option<ExprParameter>,
}

impl StructureFieldExpression {
    /// Creates a structure field from its members. Members must be fields,
    /// structure fields or entity references whose mappings are adjacent.
    pub fn new(field: impl Into<Arc<FieldInfo>>, fields: Vec<Expr>) -> Result<StructureFieldExpression> {
        let field = field.into();

        let mut mappings = Vec::with_capacity(fields.len());
        let mut members = Vec::with_capacity(fields.len());

        for member in fields {
            let mapping = match &member {
                Expr::Field(_) | Expr::StructureField(_) | Expr::EntityField(_) => member.mapping(),
                _ => None,
            };

            let Some(mapping) = mapping else {
                return Err(Error::invalid_expression(format!(
                    "structure `{}` cannot hold {}",
                    field.name,
                    member.describe()
                )));
            };

            mappings.push(mapping);
            members.push(member.with_owner(None));
        }

        let mapping = Mapping::concat(&mappings)
            .map_err(|err| err.context(err!("building structure `{}`", field.name)))?;

        Ok(StructureFieldExpression {
            field,
            fields: members,
            mapping,
            owner: None,
            outer_parameter: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.field.name
    }

    pub fn with_owner(&self, owner: Option<Owner>) -> StructureFieldExpression {
        StructureFieldExpression {
            owner,
            ..self.clone()
        }
    }

    /// Reads the named member through this structure; the returned member's
    /// owner is this structure.
    pub fn member(self: &Arc<Self>, name: &str) -> Option<Expr> {
        self.fields
            .iter()
            .find(|member| member_name(member) == Some(name))
            .map(|member| member.with_owner(Some(Owner::Structure(self.clone()))))
    }
}

pub(crate) fn member_name(expr: &Expr) -> Option<&str> {
    match expr {
        Expr::Field(e) => Some(e.name()),
        Expr::StructureField(e) => Some(e.name()),
        Expr::EntityField(e) => Some(e.name()),
        Expr::EntitySet(e) => Some(&e.field.name),
        _ => None,
    }
}
