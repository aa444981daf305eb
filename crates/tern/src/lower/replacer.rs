use std::sync::Arc;
use tern_core::{
    expr::{
        visit, ExtendedExpressionVisitor, FullTextExpression, GroupingExpression,
        ItemProjectorExpression, ProjectionExpression,
    },
    provider::ProviderVisitor,
    Error, Expr, Provider, Result,
};

/// Substitutes nodes chosen by a callback.
///
/// Every node is first offered to the callback. When it returns a
/// replacement, the replacement is used as is; otherwise the node's children
/// are visited. Projections are rewritten through their item and every
/// expression of their data source. Sub-queries are never entered.
pub struct ExtendedExpressionReplacer<F> {
    replace: F,
}

impl<F> ExtendedExpressionReplacer<F>
where
    F: FnMut(&Expr) -> Result<Option<Expr>>,
{
    pub fn new(replace: F) -> Self {
        ExtendedExpressionReplacer { replace }
    }

    pub fn replace(&mut self, expr: &Expr) -> Result<Expr> {
        self.visit(expr)
    }

    pub fn replace_with(expr: &Expr, replace: F) -> Result<Expr> {
        Self::new(replace).replace(expr)
    }

    fn item_projector(
        &mut self,
        node: &Arc<ItemProjectorExpression>,
    ) -> Result<Arc<ItemProjectorExpression>> {
        let item = self.visit(&node.item)?;
        let data_source = ProviderVisitor::new(|_: &Provider, expr: &Expr| self.visit(expr))
            .visit(&node.data_source)?;

        Ok(node.rebuild(item, data_source))
    }
}

impl<F> ExtendedExpressionVisitor for ExtendedExpressionReplacer<F>
where
    F: FnMut(&Expr) -> Result<Option<Expr>>,
{
    fn visit(&mut self, expr: &Expr) -> Result<Expr> {
        match (self.replace)(expr)? {
            Some(replacement) => Ok(replacement),
            None => visit::visit(self, expr),
        }
    }

    fn visit_projection(&mut self, node: &Arc<ProjectionExpression>) -> Result<Expr> {
        let item_projector = self.item_projector(&node.item_projector)?;

        if Arc::ptr_eq(&item_projector, &node.item_projector) {
            return Ok(node.clone().into());
        }

        Ok(node.with_item_projector(item_projector).into())
    }

    fn visit_item_projector(&mut self, node: &Arc<ItemProjectorExpression>) -> Result<Expr> {
        Ok(self.item_projector(node)?.into())
    }

    fn visit_grouping(&mut self, node: &Arc<GroupingExpression>) -> Result<Expr> {
        let key = self.visit(&node.key)?;

        if key.ptr_eq(&node.key) {
            return Ok(node.clone().into());
        }

        Ok(GroupingExpression {
            sub_query: node.sub_query.clone(),
            key,
        }
        .into())
    }

    fn visit_full_text(&mut self, node: &Arc<FullTextExpression>) -> Result<Expr> {
        let entity = match self.visit(&Expr::Entity(node.entity.clone()))? {
            Expr::Entity(entity) => entity,
            other => {
                return Err(Error::unsupported_operation(format!(
                    "full-text entity replaced by {}",
                    other.describe()
                )))
            }
        };

        let rank = match self.visit(&Expr::Column(node.rank.clone()))? {
            Expr::Column(rank) => rank,
            other => {
                return Err(Error::unsupported_operation(format!(
                    "full-text rank replaced by {}",
                    other.describe()
                )))
            }
        };

        if Arc::ptr_eq(&entity, &node.entity) && Arc::ptr_eq(&rank, &node.rank) {
            return Ok(node.clone().into());
        }

        Ok(FullTextExpression {
            full_text_index: node.full_text_index.clone(),
            entity,
            rank,
            outer_parameter: node.outer_parameter.clone(),
        }
        .into())
    }
}
