mod apply;
pub use apply::ApplyProvider;

mod calculate;
pub use calculate::{CalculateProvider, CalculatedColumn};

mod filter;
pub use filter::FilterProvider;

mod include;
pub use include::{IncludeProvider, MappingEntry};

mod index;
pub use index::{IndexColumn, IndexProvider};

mod join;
pub use join::{JoinKind, JoinProvider};

mod select;
pub use select::SelectProvider;

mod take;
pub use take::TakeProvider;

mod visit;
pub use visit::ProviderVisitor;

use std::sync::Arc;

/// A node of the relational plan producing flat rows.
///
/// Rows are fixed-width tuples of scalar values; every node knows its row
/// width ([`Provider::column_count`]). Expressions embedded in a provider
/// (predicates, calculated columns, counts) are lambdas or constants over the
/// row tuple.
#[derive(Debug, Clone, PartialEq)]
pub enum Provider {
    /// Rows of a stored table or index
    Index(Arc<IndexProvider>),

    /// Rows of `source` matching a predicate
    Filter(Arc<FilterProvider>),

    /// `source` rows with calculated columns appended
    Calculate(Arc<CalculateProvider>),

    /// A subset of `source` columns, in a new order
    Select(Arc<SelectProvider>),

    /// Join of two sources on column equality
    Join(Arc<JoinProvider>),

    /// Correlated apply: `right` evaluated once per `left` row
    Apply(Arc<ApplyProvider>),

    /// `source` rows with a boolean column testing membership in a filter
    /// data set
    Include(Arc<IncludeProvider>),

    /// The first `count` rows of `source`
    Take(Arc<TakeProvider>),
}

impl Provider {
    /// Width of the rows this provider produces.
    pub fn column_count(&self) -> usize {
        match self {
            Provider::Index(p) => p.columns.len(),
            Provider::Filter(p) => p.source.column_count(),
            Provider::Calculate(p) => p.source.column_count() + p.columns.len(),
            Provider::Select(p) => p.columns.len(),
            Provider::Join(p) => p.left.column_count() + p.right.column_count(),
            Provider::Apply(p) => p.left.column_count() + p.right.column_count(),
            Provider::Include(p) => p.source.column_count() + 1,
            Provider::Take(p) => p.source.column_count(),
        }
    }

    /// Returns `true` when both providers are the same node.
    pub fn ptr_eq(&self, other: &Provider) -> bool {
        match (self, other) {
            (Provider::Index(a), Provider::Index(b)) => Arc::ptr_eq(a, b),
            (Provider::Filter(a), Provider::Filter(b)) => Arc::ptr_eq(a, b),
            (Provider::Calculate(a), Provider::Calculate(b)) => Arc::ptr_eq(a, b),
            (Provider::Select(a), Provider::Select(b)) => Arc::ptr_eq(a, b),
            (Provider::Join(a), Provider::Join(b)) => Arc::ptr_eq(a, b),
            (Provider::Apply(a), Provider::Apply(b)) => Arc::ptr_eq(a, b),
            (Provider::Include(a), Provider::Include(b)) => Arc::ptr_eq(a, b),
            (Provider::Take(a), Provider::Take(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// The providers this node reads rows from.
    pub fn sources(&self) -> Vec<&Provider> {
        match self {
            Provider::Index(_) => vec![],
            Provider::Filter(p) => vec![&p.source],
            Provider::Calculate(p) => vec![&p.source],
            Provider::Select(p) => vec![&p.source],
            Provider::Join(p) => vec![&p.left, &p.right],
            Provider::Apply(p) => vec![&p.left, &p.right],
            Provider::Include(p) => vec![&p.source, &p.filter_data],
            Provider::Take(p) => vec![&p.source],
        }
    }
}

macro_rules! provider_variants {
    ( $( $variant:ident($ty:ty) ),* $(,)? ) => {
        $(
            impl From<$ty> for Provider {
                fn from(value: $ty) -> Self {
                    Provider::$variant(Arc::new(value))
                }
            }

            impl From<Arc<$ty>> for Provider {
                fn from(value: Arc<$ty>) -> Self {
                    Provider::$variant(value)
                }
            }
        )*
    };
}

provider_variants! {
    Index(IndexProvider),
    Filter(FilterProvider),
    Calculate(CalculateProvider),
    Select(SelectProvider),
    Join(JoinProvider),
    Apply(ApplyProvider),
    Include(IncludeProvider),
    Take(TakeProvider),
}
