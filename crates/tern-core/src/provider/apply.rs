use super::{JoinKind, Provider};
use crate::expr::ApplyParameter;

/// Evaluates `right` once per `left` row. Expressions inside `right` read the
/// current left row through `apply_parameter`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyProvider {
    pub left: Provider,
    pub right: Provider,
    pub apply_parameter: ApplyParameter,
    pub kind: JoinKind,
}

impl ApplyProvider {
    pub fn new(
        left: impl Into<Provider>,
        right: impl Into<Provider>,
        apply_parameter: ApplyParameter,
        kind: JoinKind,
    ) -> ApplyProvider {
        ApplyProvider {
            left: left.into(),
            right: right.into(),
            apply_parameter,
            kind,
        }
    }
}
