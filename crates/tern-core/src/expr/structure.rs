use super::{Expr, ExprParameter, Mapping};
use crate::{schema::PersistentType, Error, Result};
use std::sync::Arc;

/// A standalone embedded value aggregate, e.g. a structure selected on its
/// own rather than read through an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureExpression {
    pub persistent_type: Arc<PersistentType>,

    /// Member fields in declaration order.
    pub fields: Vec<Expr>,

    pub mapping: Mapping,
    pub outer_parameter: Option<ExprParameter>,
}

impl StructureExpression {
    pub fn new(
        persistent_type: impl Into<Arc<PersistentType>>,
        fields: Vec<Expr>,
    ) -> Result<StructureExpression> {
        let persistent_type = persistent_type.into();

        let mappings = fields
            .iter()
            .map(|member| match member {
                Expr::Field(_) | Expr::StructureField(_) | Expr::EntityField(_) => member
                    .mapping()
                    .ok_or_else(|| Error::invalid_expression("member has no mapping")),
                _ => Err(Error::invalid_expression(format!(
                    "structure `{}` cannot hold {}",
                    persistent_type.name,
                    member.describe()
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        let mapping = Mapping::concat(&mappings).map_err(|err| {
            err.context(err!("building structure `{}`", persistent_type.name))
        })?;

        Ok(StructureExpression {
            persistent_type,
            fields: fields.iter().map(|member| member.with_owner(None)).collect(),
            mapping,
            outer_parameter: None,
        })
    }
}
