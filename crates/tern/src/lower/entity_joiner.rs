use by_address::ByAddress;
use std::{collections::HashMap, sync::Arc};
use tern_core::{
    expr::{
        visit, EntityExpression, EntityFieldExpression, ExtendedExpressionVisitor,
        FullTextExpression, ItemProjectorExpression, LocalCollectionExpression,
        StructureFieldExpression,
    },
    Expr, Provider, Result,
};
use tracing::{debug, trace};

/// Adds the join producing an entity's full row to a data source.
pub trait EntityFieldJoiner {
    /// Makes every field of `entity` readable from `data_source`, adding a
    /// join when needed, and returns the entity with its fields mapped onto
    /// the new row. Implementations must not add the same join twice.
    fn ensure_entity_fields_are_joined(
        &mut self,
        entity: &Arc<EntityExpression>,
        data_source: &mut Provider,
    ) -> Result<Arc<EntityExpression>>;
}

/// Makes sure every entity appearing in an item shape has its full row
/// available from the projector's data source.
pub struct EntityExpressionJoiner<'a> {
    joiner: &'a mut dyn EntityFieldJoiner,
    data_source: Provider,
    joined: HashMap<ByAddress<Arc<EntityExpression>>, Arc<EntityExpression>>,
}

impl EntityExpressionJoiner<'_> {
    /// Returns the projector with every entity of its item joined. The
    /// original projector is returned when nothing had to change.
    pub fn join_entities(
        joiner: &mut dyn EntityFieldJoiner,
        item_projector: &Arc<ItemProjectorExpression>,
    ) -> Result<Arc<ItemProjectorExpression>> {
        let mut visitor = EntityExpressionJoiner {
            joiner,
            data_source: item_projector.data_source.clone(),
            joined: HashMap::new(),
        };

        let item = visitor.visit(&item_projector.item)?;

        debug!(entities = visitor.joined.len(), "joined entities");

        Ok(item_projector.rebuild(item, visitor.data_source))
    }

    fn join(&mut self, entity: &Arc<EntityExpression>) -> Result<Arc<EntityExpression>> {
        if let Some(joined) = self.joined.get(&ByAddress(entity.clone())) {
            return Ok(joined.clone());
        }

        trace!(entity = entity.name(), "ensuring entity fields are joined");

        let joined = self
            .joiner
            .ensure_entity_fields_are_joined(entity, &mut self.data_source)?;

        self.joined.insert(ByAddress(entity.clone()), joined.clone());
        Ok(joined)
    }
}

impl ExtendedExpressionVisitor for EntityExpressionJoiner<'_> {
    fn visit_entity(&mut self, node: &Arc<EntityExpression>) -> Result<Expr> {
        Ok(self.join(node)?.into())
    }

    fn visit_entity_field(&mut self, node: &Arc<EntityFieldExpression>) -> Result<Expr> {
        let Some(entity) = &node.entity else {
            return Ok(node.clone().into());
        };

        let joined = self.join(entity)?;

        if Arc::ptr_eq(&joined, entity) {
            return Ok(node.clone().into());
        }

        Ok(node.with_entity(joined).into())
    }

    fn visit_structure_field(&mut self, node: &Arc<StructureFieldExpression>) -> Result<Expr> {
        let Some(fields) = visit::visit_all(self, &node.fields)? else {
            return Ok(node.clone().into());
        };

        Ok(StructureFieldExpression {
            fields,
            ..(**node).clone()
        }
        .into())
    }

    fn visit_local_collection(&mut self, node: &Arc<LocalCollectionExpression>) -> Result<Expr> {
        visit::visit_local_collection(self, node)
    }

    fn visit_full_text(&mut self, node: &Arc<FullTextExpression>) -> Result<Expr> {
        let entity = self.join(&node.entity)?;

        if Arc::ptr_eq(&entity, &node.entity) {
            return Ok(node.clone().into());
        }

        Ok(FullTextExpression {
            entity,
            ..(**node).clone()
        }
        .into())
    }
}
