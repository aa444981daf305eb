use super::ApplyParameterAccessVisitor;
use indexmap::IndexMap;
use std::sync::Arc;
use tern_core::{
    expr::{
        visit, ColumnExpression, EntityExpression, EntityFieldExpression, EntitySetExpression,
        ExprParameter, ExtendedExpressionVisitor, FieldExpression, FullTextExpression,
        GroupingExpression, KeyExpression, LocalCollectionExpression, MarkerExpression, Owner,
        PersistentExpressionVisitor, StructureExpression, StructureFieldExpression,
        SubQueryExpression,
    },
    provider::ProviderVisitor,
    Error, Expr, Provider, Result,
};
use tracing::{debug, trace};

/// Options controlling which columns [`ColumnGatherer`] collects and how the
/// result is shaped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnExtractionModes(u8);

impl ColumnExtractionModes {
    pub const DEFAULT: ColumnExtractionModes = ColumnExtractionModes(0);

    /// Entities contribute their key only.
    pub const TREAT_ENTITY_AS_KEY: ColumnExtractionModes = ColumnExtractionModes(1 << 0);

    /// With `TREAT_ENTITY_AS_KEY`, entities also contribute their
    /// discriminator.
    pub const KEEP_TYPE_ID: ColumnExtractionModes = ColumnExtractionModes(1 << 1);

    /// Each offset appears once, at its first position.
    pub const DISTINCT: ColumnExtractionModes = ColumnExtractionModes(1 << 2);

    /// The result is sorted by offset.
    pub const ORDERED: ColumnExtractionModes = ColumnExtractionModes(1 << 3);

    /// Lazy-load fields of entities are skipped.
    pub const OMIT_LAZY_LOAD: ColumnExtractionModes = ColumnExtractionModes(1 << 4);

    pub const fn contains(self, other: ColumnExtractionModes) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: ColumnExtractionModes) -> ColumnExtractionModes {
        ColumnExtractionModes(self.0 | other.0)
    }
}

impl std::ops::BitOr for ColumnExtractionModes {
    type Output = ColumnExtractionModes;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for ColumnExtractionModes {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

/// Collects the row offsets an expression reads.
///
/// Nodes relative to a correlated scope only contribute when the scope is
/// the outer parameter of the outermost sub-query being gathered; outside of
/// any sub-query, only nodes without an outer parameter contribute. Reads of
/// the outer row found in a sub-query's data source are gathered as well.
pub struct ColumnGatherer {
    modes: ColumnExtractionModes,
    columns: Vec<(usize, Expr)>,
    top_sub_query: Option<Arc<SubQueryExpression>>,
}

impl ColumnGatherer {
    /// Returns each gathered offset with the node it was gathered from.
    pub fn columns_and_expressions(
        expr: &Expr,
        modes: ColumnExtractionModes,
    ) -> Result<Vec<(usize, Expr)>> {
        let mut gatherer = ColumnGatherer {
            modes,
            columns: vec![],
            top_sub_query: None,
        };

        gatherer.visit(expr)?;

        let mut columns = gatherer.columns;

        if modes.contains(ColumnExtractionModes::DISTINCT) {
            let mut distinct = IndexMap::with_capacity(columns.len());
            for (offset, expr) in columns {
                distinct.entry(offset).or_insert(expr);
            }
            columns = distinct.into_iter().collect();
        }

        if modes.contains(ColumnExtractionModes::ORDERED) {
            columns.sort_by_key(|(offset, _)| *offset);
        }

        debug!(
            expr = %expr.describe(),
            ?modes,
            columns = ?columns.iter().map(|(offset, _)| *offset).collect::<Vec<_>>(),
            "gathered columns"
        );

        Ok(columns)
    }

    /// Returns the gathered offsets only.
    pub fn columns(expr: &Expr, modes: ColumnExtractionModes) -> Result<Vec<usize>> {
        Ok(Self::columns_and_expressions(expr, modes)?
            .into_iter()
            .map(|(offset, _)| offset)
            .collect())
    }

    fn in_scope(&self, outer_parameter: Option<&ExprParameter>) -> bool {
        match (&self.top_sub_query, outer_parameter) {
            (Some(top), Some(param)) => top.outer_parameter == *param,
            (None, None) => true,
            _ => false,
        }
    }

    fn add_columns(&mut self, expr: &Expr, offsets: impl IntoIterator<Item = usize>) {
        if !self.in_scope(expr.outer_parameter()) {
            trace!(expr = %expr.describe(), "skipping node from another scope");
            return;
        }

        self.columns
            .extend(offsets.into_iter().map(|offset| (offset, expr.clone())));
    }

    /// Adds the key and discriminator of the entity owning a field, so the
    /// owning row stays identifiable.
    fn process_field_owner(&mut self, expr: &Expr, owner: Option<&Owner>, name: &str) -> Result<()> {
        if self.modes.contains(ColumnExtractionModes::TREAT_ENTITY_AS_KEY) {
            return Ok(());
        }

        let Some(owner) = owner else {
            return Ok(());
        };

        let entity = owner.entity(name)?;
        let type_id = entity.type_id_field().map(|field| field.mapping.offset);

        self.add_columns(expr, entity.key.mapping.items().chain(type_id));
        Ok(())
    }

    /// Offsets of an entity member in full mode.
    fn member_offsets(&self, member: &Expr, offsets: &mut Vec<usize>) -> Result<()> {
        match member {
            Expr::Key(key) => offsets.extend(key.mapping.items()),
            Expr::Field(field) => {
                if !(field.field.is_lazy_load
                    && self.modes.contains(ColumnExtractionModes::OMIT_LAZY_LOAD))
                {
                    offsets.extend(field.mapping.items());
                }
            }
            Expr::StructureField(structure) => {
                for member in &structure.fields {
                    self.member_offsets(member, offsets)?;
                }
            }
            Expr::EntityField(reference) => offsets.extend(reference.mapping().items()),
            _ => {
                return Err(Error::unsupported_operation(format!(
                    "entity member {}",
                    member.describe()
                )))
            }
        }

        Ok(())
    }

    fn gather_sub_query(&mut self, node: &Arc<SubQueryExpression>) -> Result<()> {
        let is_top = self.top_sub_query.is_none();
        if is_top {
            self.top_sub_query = Some(node.clone());
        }

        let result = self.gather_sub_query_columns(node);

        if is_top {
            self.top_sub_query = None;
        }

        result
    }

    fn gather_sub_query_columns(&mut self, node: &Arc<SubQueryExpression>) -> Result<()> {
        let item_projector = &node.projection.item_projector;
        self.visit(&item_projector.item)?;

        let Some(top) = self.top_sub_query.clone() else {
            return Ok(());
        };

        let mut accesses = vec![];
        let mut access = ApplyParameterAccessVisitor::new(&top.apply_parameter, |call: &Expr, index: usize| {
            accesses.push((index, call.clone()));
            Ok(call.clone())
        });

        ProviderVisitor::new(|_: &Provider, expr: &Expr| access.process(expr))
            .visit(&item_projector.data_source)?;

        trace!(
            outer_columns = ?accesses.iter().map(|(index, _)| *index).collect::<Vec<_>>(),
            "sub-query reads outer row"
        );

        self.columns.extend(accesses);
        Ok(())
    }
}

impl PersistentExpressionVisitor for ColumnGatherer {
    fn visit_field(&mut self, node: &Arc<FieldExpression>) -> Result<Expr> {
        let expr = Expr::Field(node.clone());
        self.process_field_owner(&expr, node.owner.as_ref(), node.name())?;
        self.add_columns(&expr, node.mapping.items());
        Ok(expr)
    }

    fn visit_structure_field(&mut self, node: &Arc<StructureFieldExpression>) -> Result<Expr> {
        let expr = Expr::StructureField(node.clone());
        self.process_field_owner(&expr, node.owner.as_ref(), node.name())?;
        self.add_columns(&expr, node.mapping.items());
        Ok(expr)
    }

    fn visit_key(&mut self, node: &Arc<KeyExpression>) -> Result<Expr> {
        let expr = Expr::Key(node.clone());
        self.add_columns(&expr, node.mapping.items());
        Ok(expr)
    }

    fn visit_entity(&mut self, node: &Arc<EntityExpression>) -> Result<Expr> {
        let expr = Expr::Entity(node.clone());
        let mut offsets = vec![];

        if self.modes.contains(ColumnExtractionModes::TREAT_ENTITY_AS_KEY) {
            offsets.extend(node.key.mapping.items());

            if self.modes.contains(ColumnExtractionModes::KEEP_TYPE_ID) {
                let Some(type_id) = node.type_id_field() else {
                    return Err(Error::invalid_expression(format!(
                        "entity `{}` has no discriminator field",
                        node.name()
                    )));
                };
                offsets.extend(type_id.mapping.items());
            }
        } else {
            for member in &node.fields {
                self.member_offsets(member, &mut offsets)?;
            }
        }

        self.add_columns(&expr, offsets);
        Ok(expr)
    }

    fn visit_entity_field(&mut self, node: &Arc<EntityFieldExpression>) -> Result<Expr> {
        let expr = Expr::EntityField(node.clone());
        self.process_field_owner(&expr, node.owner.as_ref(), node.name())?;
        self.add_columns(&expr, node.mapping().items());
        Ok(expr)
    }

    fn visit_entity_set(&mut self, node: &Arc<EntitySetExpression>) -> Result<Expr> {
        PersistentExpressionVisitor::visit_entity(self, &node.owner)?;
        Ok(node.clone().into())
    }

    fn visit_column(&mut self, node: &Arc<ColumnExpression>) -> Result<Expr> {
        let expr = Expr::Column(node.clone());
        self.add_columns(&expr, node.mapping.items());
        Ok(expr)
    }

    fn visit_marker(&mut self, node: &Arc<MarkerExpression>) -> Result<Expr> {
        self.visit(&node.target)?;
        Ok(node.clone().into())
    }

    fn visit_sub_query(&mut self, node: &Arc<SubQueryExpression>) -> Result<Expr> {
        self.gather_sub_query(node)?;
        Ok(node.clone().into())
    }

    fn visit_grouping(&mut self, node: &Arc<GroupingExpression>) -> Result<Expr> {
        self.visit(&node.key)?;
        self.gather_sub_query(&Arc::new(node.sub_query.clone()))?;
        Ok(node.clone().into())
    }

    fn visit_local_collection(&mut self, node: &Arc<LocalCollectionExpression>) -> Result<Expr> {
        visit::visit_local_collection(self, node)?;
        Ok(node.clone().into())
    }

    fn visit_structure(&mut self, node: &Arc<StructureExpression>) -> Result<Expr> {
        let expr = Expr::Structure(node.clone());
        self.add_columns(&expr, node.mapping.items());
        Ok(expr)
    }

    fn visit_full_text(&mut self, node: &Arc<FullTextExpression>) -> Result<Expr> {
        PersistentExpressionVisitor::visit_entity(self, &node.entity)?;
        PersistentExpressionVisitor::visit_column(self, &node.rank)?;
        Ok(node.clone().into())
    }
}
