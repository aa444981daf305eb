use std::sync::Arc;
use tern_core::{
    expr::{
        visit, EntityFieldExpression, ExtendedExpressionVisitor, FieldExpression,
        LocalCollectionExpression, PersistentExpressionVisitor, StructureFieldExpression,
    },
    Expr, Result,
};

/// Detaches fields from the entity or structure they were read through, so
/// they can be reused in another projection. Mappings are left untouched.
///
/// Entity sets keep their owner, which identifies the collection. Sub-queries
/// and groupings are returned as is.
pub struct OwnerRemover;

impl OwnerRemover {
    pub fn remove_owner(expr: &Expr) -> Result<Expr> {
        OwnerRemover.visit(expr)
    }
}

impl PersistentExpressionVisitor for OwnerRemover {
    fn visit_field(&mut self, node: &Arc<FieldExpression>) -> Result<Expr> {
        if node.owner.is_none() {
            return Ok(node.clone().into());
        }

        Ok(node.with_owner(None).into())
    }

    fn visit_structure_field(&mut self, node: &Arc<StructureFieldExpression>) -> Result<Expr> {
        if node.owner.is_none() {
            return Ok(node.clone().into());
        }

        Ok(node.with_owner(None).into())
    }

    fn visit_entity_field(&mut self, node: &Arc<EntityFieldExpression>) -> Result<Expr> {
        if node.owner.is_none() {
            return Ok(node.clone().into());
        }

        Ok(node.with_owner(None).into())
    }

    fn visit_local_collection(&mut self, node: &Arc<LocalCollectionExpression>) -> Result<Expr> {
        visit::visit_local_collection(self, node)
    }
}
