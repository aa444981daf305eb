#![allow(unused_variables)]

use super::{
    visit, ColumnExpression, ConstructorExpression, EntityExpression, EntityFieldExpression,
    EntitySetExpression, Expr, ExtendedExpressionVisitor, FieldExpression, FullTextExpression,
    GroupingExpression, ItemProjectorExpression, KeyExpression, LocalCollectionExpression,
    MarkerExpression, ProjectionExpression, StructureExpression, StructureFieldExpression,
    SubQueryExpression,
};
use crate::{Error, Result};
use std::sync::Arc;

/// A visitor over the persistent shape of a result.
///
/// Implementors only see the nodes describing where data lives in a row.
/// Every implementor is also an [`ExtendedExpressionVisitor`]; reaching a
/// [`ProjectionExpression`] or [`ItemProjectorExpression`] through it is an
/// unsupported-operation error, as those need the surrounding query.
///
/// Standard nodes are handled by the [`ExtendedExpressionVisitor`] defaults.
pub trait PersistentExpressionVisitor: Sized {
    fn visit_field(&mut self, node: &Arc<FieldExpression>) -> Result<Expr> {
        Ok(node.clone().into())
    }

    fn visit_structure_field(&mut self, node: &Arc<StructureFieldExpression>) -> Result<Expr> {
        Ok(node.clone().into())
    }

    fn visit_key(&mut self, node: &Arc<KeyExpression>) -> Result<Expr> {
        Ok(node.clone().into())
    }

    fn visit_entity(&mut self, node: &Arc<EntityExpression>) -> Result<Expr> {
        Ok(node.clone().into())
    }

    fn visit_entity_field(&mut self, node: &Arc<EntityFieldExpression>) -> Result<Expr> {
        Ok(node.clone().into())
    }

    fn visit_entity_set(&mut self, node: &Arc<EntitySetExpression>) -> Result<Expr> {
        Ok(node.clone().into())
    }

    fn visit_column(&mut self, node: &Arc<ColumnExpression>) -> Result<Expr> {
        Ok(node.clone().into())
    }

    fn visit_marker(&mut self, node: &Arc<MarkerExpression>) -> Result<Expr> {
        visit::visit_marker(self, node)
    }

    fn visit_sub_query(&mut self, node: &Arc<SubQueryExpression>) -> Result<Expr> {
        Ok(node.clone().into())
    }

    fn visit_grouping(&mut self, node: &Arc<GroupingExpression>) -> Result<Expr> {
        Ok(node.clone().into())
    }

    fn visit_local_collection(&mut self, node: &Arc<LocalCollectionExpression>) -> Result<Expr> {
        Ok(node.clone().into())
    }

    fn visit_structure(&mut self, node: &Arc<StructureExpression>) -> Result<Expr> {
        Ok(node.clone().into())
    }

    fn visit_constructor(&mut self, node: &Arc<ConstructorExpression>) -> Result<Expr> {
        visit::visit_constructor(self, node)
    }

    fn visit_full_text(&mut self, node: &Arc<FullTextExpression>) -> Result<Expr> {
        Ok(node.clone().into())
    }
}

impl<V: PersistentExpressionVisitor> ExtendedExpressionVisitor for V {
    fn visit_projection(&mut self, node: &Arc<ProjectionExpression>) -> Result<Expr> {
        Err(Error::unsupported_operation(format!(
            "persistent visitor cannot visit {}",
            Expr::from(node.clone()).describe()
        )))
    }

    fn visit_item_projector(&mut self, node: &Arc<ItemProjectorExpression>) -> Result<Expr> {
        Err(Error::unsupported_operation(format!(
            "persistent visitor cannot visit {}",
            Expr::from(node.clone()).describe()
        )))
    }

    fn visit_field(&mut self, node: &Arc<FieldExpression>) -> Result<Expr> {
        PersistentExpressionVisitor::visit_field(self, node)
    }

    fn visit_structure_field(&mut self, node: &Arc<StructureFieldExpression>) -> Result<Expr> {
        PersistentExpressionVisitor::visit_structure_field(self, node)
    }

    fn visit_key(&mut self, node: &Arc<KeyExpression>) -> Result<Expr> {
        PersistentExpressionVisitor::visit_key(self, node)
    }

    fn visit_entity(&mut self, node: &Arc<EntityExpression>) -> Result<Expr> {
        PersistentExpressionVisitor::visit_entity(self, node)
    }

    fn visit_entity_field(&mut self, node: &Arc<EntityFieldExpression>) -> Result<Expr> {
        PersistentExpressionVisitor::visit_entity_field(self, node)
    }

    fn visit_entity_set(&mut self, node: &Arc<EntitySetExpression>) -> Result<Expr> {
        PersistentExpressionVisitor::visit_entity_set(self, node)
    }

    fn visit_column(&mut self, node: &Arc<ColumnExpression>) -> Result<Expr> {
        PersistentExpressionVisitor::visit_column(self, node)
    }

    fn visit_marker(&mut self, node: &Arc<MarkerExpression>) -> Result<Expr> {
        PersistentExpressionVisitor::visit_marker(self, node)
    }

    fn visit_sub_query(&mut self, node: &Arc<SubQueryExpression>) -> Result<Expr> {
        PersistentExpressionVisitor::visit_sub_query(self, node)
    }

    fn visit_grouping(&mut self, node: &Arc<GroupingExpression>) -> Result<Expr> {
        PersistentExpressionVisitor::visit_grouping(self, node)
    }

    fn visit_local_collection(&mut self, node: &Arc<LocalCollectionExpression>) -> Result<Expr> {
        PersistentExpressionVisitor::visit_local_collection(self, node)
    }

    fn visit_structure(&mut self, node: &Arc<StructureExpression>) -> Result<Expr> {
        PersistentExpressionVisitor::visit_structure(self, node)
    }

    fn visit_constructor(&mut self, node: &Arc<ConstructorExpression>) -> Result<Expr> {
        PersistentExpressionVisitor::visit_constructor(self, node)
    }

    fn visit_full_text(&mut self, node: &Arc<FullTextExpression>) -> Result<Expr> {
        PersistentExpressionVisitor::visit_full_text(self, node)
    }
}
