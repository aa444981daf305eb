use super::{ApplyParameter, ExprParameter, ProjectionExpression, Type};
use std::sync::Arc;

/// A correlated nested query. Accesses to the outer row inside the nested
/// provider go through `apply_parameter`; persistent nodes inside the nested
/// shape that belong to the outer row carry `outer_parameter`.
#[derive(Debug, Clone, PartialEq)]
pub struct SubQueryExpression {
    pub ty: Type,
    pub outer_parameter: ExprParameter,
    pub projection: Arc<ProjectionExpression>,
    pub apply_parameter: ApplyParameter,
}

impl SubQueryExpression {
    pub fn new(
        ty: Type,
        outer_parameter: ExprParameter,
        projection: impl Into<Arc<ProjectionExpression>>,
        apply_parameter: ApplyParameter,
    ) -> SubQueryExpression {
        SubQueryExpression {
            ty,
            outer_parameter,
            projection: projection.into(),
            apply_parameter,
        }
    }
}
