use crate::expr::Type;
use std::sync::Arc;

/// A stored table or index, read in full.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexProvider {
    pub name: Arc<str>,
    pub columns: Vec<IndexColumn>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexColumn {
    pub name: Arc<str>,
    pub ty: Type,
}

impl IndexProvider {
    pub fn new<N: Into<Arc<str>>>(
        name: impl Into<Arc<str>>,
        columns: impl IntoIterator<Item = (N, Type)>,
    ) -> IndexProvider {
        IndexProvider {
            name: name.into(),
            columns: columns
                .into_iter()
                .map(|(name, ty)| IndexColumn {
                    name: name.into(),
                    ty,
                })
                .collect(),
        }
    }
}
