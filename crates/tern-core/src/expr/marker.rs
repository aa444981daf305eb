use super::Expr;

/// Wraps `target` with a tag without changing what it evaluates to.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerExpression {
    pub target: Expr,
    pub marker: MarkerType,
}

/// What a [`MarkerExpression`] records about its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarkerType {
    None,

    /// The target is a `DefaultIfEmpty` result
    Default,

    /// The target came from a `Single` result access
    Single,

    /// The target came from a `First` result access
    First,

    /// The target was produced by a cast
    Cast,
}

impl MarkerExpression {
    pub fn new(target: impl Into<Expr>, marker: MarkerType) -> MarkerExpression {
        MarkerExpression {
            target: target.into(),
            marker,
        }
    }
}

impl Expr {
    pub fn marker(target: impl Into<Expr>, marker: MarkerType) -> Expr {
        MarkerExpression::new(target, marker).into()
    }

    /// Removes any chain of markers wrapping this expression.
    pub fn strip_markers(&self) -> &Expr {
        let mut expr = self;
        while let Expr::Marker(marker) = expr {
            expr = &marker.target;
        }
        expr
    }
}
