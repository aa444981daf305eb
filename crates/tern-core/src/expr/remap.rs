//! Re-basing persistent shapes onto a different row layout.

use super::{
    visit, ColumnExpression, EntityExpression, EntityFieldExpression, EntitySetExpression, Expr,
    ExprParameter, ExtendedExpressionVisitor, FieldExpression, FullTextExpression, KeyExpression,
    LocalCollectionExpression, Mapping, Owner, StructureExpression, StructureFieldExpression,
};
use crate::{Error, Result};
use std::{collections::HashMap, sync::Arc};

/// How offsets move when a shape is placed onto a different row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remap<'a> {
    /// Every offset moves by `n`, e.g. when the row becomes the right side of
    /// a join.
    Shift(usize),

    /// Offset `o` moves to the position of `o` in the map, e.g. after a
    /// select of those columns.
    Columns(&'a [usize]),
}

/// Context shared by the nested rewrites of one top-level call.
///
/// Each node is rewritten once per operation; later requests for the same
/// node return the first result, so nodes shared by several parents (an
/// entity that owns several fields, a key stored both in `fields` and `key`)
/// stay shared in the output. Create one scope per top-level translation
/// call and lend it to nested calls. A scope must not be shared across
/// threads.
#[derive(Debug, Default)]
pub struct RemapScope {
    // The source node is retained so its address cannot be reused while the
    // scope is alive.
    cache: HashMap<(Operation, *const ()), (Expr, Expr)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Operation {
    Shift(usize),
    Columns(Vec<usize>),
    Bind(Option<usize>),
}

impl RemapScope {
    pub fn new() -> RemapScope {
        RemapScope::default()
    }

    /// Number of rewritten nodes remembered by the scope.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    fn get(&self, operation: &Operation, expr: &Expr) -> Option<&Expr> {
        self.cache
            .get(&(operation.clone(), expr.addr()))
            .map(|(_, result)| result)
    }

    fn insert(&mut self, operation: &Operation, expr: &Expr, result: &Expr) {
        self.cache
            .insert((operation.clone(), expr.addr()), (expr.clone(), result.clone()));
    }
}

impl Expr {
    /// Moves every mapping in this shape according to `remap`.
    ///
    /// Owners, members and keys are remapped through `scope`. Projections,
    /// item projectors and sub-queries are relative to their own data source
    /// and are returned unchanged.
    pub fn remap(&self, remap: Remap<'_>, scope: &mut RemapScope) -> Result<Expr> {
        let operation = match remap {
            Remap::Shift(0) => return Ok(self.clone()),
            Remap::Shift(n) => Operation::Shift(n),
            Remap::Columns(map) => Operation::Columns(map.to_vec()),
        };

        Remapper {
            remap: Some(remap),
            outer_parameter: None,
            operation,
            scope,
        }
        .visit(self)
    }

    /// Marks every persistent node of this shape as belonging to the
    /// correlated scope `param`, or to no scope when `param` is `None`.
    pub fn bind_outer_parameter(
        &self,
        param: Option<&ExprParameter>,
        scope: &mut RemapScope,
    ) -> Result<Expr> {
        Remapper {
            remap: None,
            outer_parameter: Some(param.cloned()),
            operation: Operation::Bind(param.map(ExprParameter::id)),
            scope,
        }
        .visit(self)
    }
}

struct Remapper<'a, 'b> {
    remap: Option<Remap<'b>>,

    /// `Some` when binding; the inner value is the new outer parameter.
    outer_parameter: Option<Option<ExprParameter>>,

    operation: Operation,
    scope: &'a mut RemapScope,
}

impl Remapper<'_, '_> {
    fn mapping(&self, mapping: Mapping) -> Result<Mapping> {
        match self.remap {
            None => Ok(mapping),
            Some(Remap::Shift(n)) => Ok(mapping.shift(n)),
            Some(Remap::Columns(map)) => mapping.remap_columns(map),
        }
    }

    fn outer(&self, current: &Option<ExprParameter>) -> Option<ExprParameter> {
        match &self.outer_parameter {
            Some(param) => param.clone(),
            None => current.clone(),
        }
    }

    fn entity(&mut self, entity: &Arc<EntityExpression>) -> Result<Arc<EntityExpression>> {
        match self.visit(&Expr::Entity(entity.clone()))? {
            Expr::Entity(entity) => Ok(entity),
            other => Err(Error::invalid_expression(format!(
                "entity remapped to {}",
                other.describe()
            ))),
        }
    }

    fn key(&mut self, key: &Arc<KeyExpression>) -> Result<Arc<KeyExpression>> {
        match self.visit(&Expr::Key(key.clone()))? {
            Expr::Key(key) => Ok(key),
            other => Err(Error::invalid_expression(format!(
                "key remapped to {}",
                other.describe()
            ))),
        }
    }

    fn owner(&mut self, owner: &Option<Owner>) -> Result<Option<Owner>> {
        let Some(owner) = owner else {
            return Ok(None);
        };

        Ok(Some(match owner {
            Owner::Entity(entity) => Owner::Entity(self.entity(entity)?),
            Owner::Structure(structure) => {
                match self.visit(&Expr::StructureField(structure.clone()))? {
                    Expr::StructureField(structure) => Owner::Structure(structure),
                    other => {
                        return Err(Error::invalid_expression(format!(
                            "structure owner remapped to {}",
                            other.describe()
                        )))
                    }
                }
            }
        }))
    }

    fn members(&mut self, members: &[Expr]) -> Result<Vec<Expr>> {
        members.iter().map(|member| self.visit(member)).collect()
    }
}

impl ExtendedExpressionVisitor for Remapper<'_, '_> {
    fn visit(&mut self, expr: &Expr) -> Result<Expr> {
        if let Some(result) = self.scope.get(&self.operation, expr) {
            return Ok(result.clone());
        }

        let result = visit::visit(self, expr)?;
        self.scope.insert(&self.operation, expr, &result);
        Ok(result)
    }

    fn visit_field(&mut self, node: &Arc<FieldExpression>) -> Result<Expr> {
        Ok(FieldExpression {
            field: node.field.clone(),
            mapping: self.mapping(node.mapping)?,
            owner: self.owner(&node.owner)?,
            outer_parameter: self.outer(&node.outer_parameter),
        }
        .into())
    }

    fn visit_structure_field(&mut self, node: &Arc<StructureFieldExpression>) -> Result<Expr> {
        Ok(StructureFieldExpression {
            field: node.field.clone(),
            fields: self.members(&node.fields)?,
            mapping: self.mapping(node.mapping)?,
            owner: self.owner(&node.owner)?,
            outer_parameter: self.outer(&node.outer_parameter),
        }
        .into())
    }

    fn visit_key(&mut self, node: &Arc<KeyExpression>) -> Result<Expr> {
        Ok(KeyExpression {
            entity: node.entity.clone(),
            mapping: self.mapping(node.mapping)?,
            outer_parameter: self.outer(&node.outer_parameter),
        }
        .into())
    }

    fn visit_entity(&mut self, node: &Arc<EntityExpression>) -> Result<Expr> {
        Ok(EntityExpression {
            persistent_type: node.persistent_type.clone(),
            fields: self.members(&node.fields)?,
            key: self.key(&node.key)?,
            mapping: self.mapping(node.mapping)?,
            outer_parameter: self.outer(&node.outer_parameter),
        }
        .into())
    }

    fn visit_entity_field(&mut self, node: &Arc<EntityFieldExpression>) -> Result<Expr> {
        let entity = match &node.entity {
            Some(entity) => Some(self.entity(entity)?),
            None => None,
        };

        Ok(EntityFieldExpression {
            field: node.field.clone(),
            key: self.key(&node.key)?,
            entity,
            owner: self.owner(&node.owner)?,
            outer_parameter: self.outer(&node.outer_parameter),
        }
        .into())
    }

    fn visit_entity_set(&mut self, node: &Arc<EntitySetExpression>) -> Result<Expr> {
        Ok(EntitySetExpression {
            field: node.field.clone(),
            owner: self.entity(&node.owner)?,
            outer_parameter: self.outer(&node.outer_parameter),
        }
        .into())
    }

    fn visit_column(&mut self, node: &Arc<ColumnExpression>) -> Result<Expr> {
        Ok(ColumnExpression {
            ty: node.ty.clone(),
            mapping: self.mapping(node.mapping)?,
            outer_parameter: self.outer(&node.outer_parameter),
        }
        .into())
    }

    fn visit_structure(&mut self, node: &Arc<StructureExpression>) -> Result<Expr> {
        Ok(StructureExpression {
            persistent_type: node.persistent_type.clone(),
            fields: self.members(&node.fields)?,
            mapping: self.mapping(node.mapping)?,
            outer_parameter: self.outer(&node.outer_parameter),
        }
        .into())
    }

    fn visit_local_collection(
        &mut self,
        node: &Arc<LocalCollectionExpression>,
    ) -> Result<Expr> {
        let rebuilt = visit::visit_local_collection(self, node)?;

        match (&self.outer_parameter, rebuilt) {
            (Some(param), Expr::LocalCollection(collection)) => {
                Ok(LocalCollectionExpression {
                    outer_parameter: param.clone(),
                    ..(*collection).clone()
                }
                .into())
            }
            (_, rebuilt) => Ok(rebuilt),
        }
    }

    fn visit_full_text(&mut self, node: &Arc<FullTextExpression>) -> Result<Expr> {
        let rank = match self.visit(&Expr::Column(node.rank.clone()))? {
            Expr::Column(rank) => rank,
            other => {
                return Err(Error::invalid_expression(format!(
                    "full-text rank remapped to {}",
                    other.describe()
                )))
            }
        };

        Ok(FullTextExpression {
            full_text_index: node.full_text_index.clone(),
            entity: self.entity(&node.entity)?,
            rank,
            outer_parameter: self.outer(&node.outer_parameter),
        }
        .into())
    }
}
