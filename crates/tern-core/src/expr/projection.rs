use super::{Expr, TupleParameter, Type, Value};
use crate::Provider;
use indexmap::IndexMap;
use std::sync::Arc;

/// An item shape paired with the provider producing its rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemProjectorExpression {
    pub item: Expr,
    pub data_source: Provider,
}

/// A query result.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionExpression {
    pub ty: Type,
    pub item_projector: Arc<ItemProjectorExpression>,

    /// Tuples captured from the enclosing scope, bound when the projection
    /// is executed.
    pub tuple_parameter_bindings: IndexMap<TupleParameter, Vec<Value>>,

    pub result_access: ResultAccessMethod,
}

/// How the rows of a projection are turned into its result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResultAccessMethod {
    #[default]
    All,
    First,
    FirstOrDefault,
    Single,
    SingleOrDefault,
}

impl ItemProjectorExpression {
    pub fn new(item: impl Into<Expr>, data_source: impl Into<Provider>) -> ItemProjectorExpression {
        ItemProjectorExpression {
            item: item.into(),
            data_source: data_source.into(),
        }
    }

    /// Returns the projector unchanged when both halves are the same nodes,
    /// otherwise a new projector.
    pub fn rebuild(self: &Arc<Self>, item: Expr, data_source: Provider) -> Arc<ItemProjectorExpression> {
        if item.ptr_eq(&self.item) && data_source.ptr_eq(&self.data_source) {
            self.clone()
        } else {
            Arc::new(ItemProjectorExpression { item, data_source })
        }
    }
}

impl ProjectionExpression {
    pub fn new(ty: Type, item_projector: impl Into<Arc<ItemProjectorExpression>>) -> ProjectionExpression {
        ProjectionExpression {
            ty,
            item_projector: item_projector.into(),
            tuple_parameter_bindings: IndexMap::new(),
            result_access: ResultAccessMethod::All,
        }
    }

    pub fn with_item_projector(&self, item_projector: Arc<ItemProjectorExpression>) -> ProjectionExpression {
        ProjectionExpression {
            item_projector,
            ..self.clone()
        }
    }
}
