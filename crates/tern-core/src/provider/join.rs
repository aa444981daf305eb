use super::Provider;

/// Joins `left` and `right` where each `(l, r)` pair of columns is equal.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinProvider {
    pub left: Provider,
    pub right: Provider,
    pub kind: JoinKind,
    pub equal_columns: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    Inner,
    LeftOuter,
}

impl JoinProvider {
    pub fn new(
        left: impl Into<Provider>,
        right: impl Into<Provider>,
        kind: JoinKind,
        equal_columns: Vec<(usize, usize)>,
    ) -> JoinProvider {
        JoinProvider {
            left: left.into(),
            right: right.into(),
            kind,
            equal_columns,
        }
    }
}
