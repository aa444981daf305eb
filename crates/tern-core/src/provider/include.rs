use super::Provider;
use crate::expr::ExprLambda;
use std::sync::Arc;

/// `source` rows with one extra boolean column, named `result_column`, that
/// is true when the row matches a row of `filter_data`.
///
/// `filtered_columns[i]` says how to compute, from a source row, the value
/// compared with column `i` of the filter data.
#[derive(Debug, Clone, PartialEq)]
pub struct IncludeProvider {
    pub source: Provider,
    pub filter_data: Provider,
    pub filtered_columns: Vec<MappingEntry>,
    pub result_column: Arc<str>,
}

/// How a value compared against one filter-data column is obtained from the
/// filtered row.
#[derive(Debug, Clone, PartialEq)]
pub enum MappingEntry {
    /// Read directly from this column of the filtered row
    Column(usize),

    /// Computed by a single-parameter lambda over the filtered row
    Calculated(Arc<ExprLambda>),
}

impl IncludeProvider {
    pub fn new(
        source: impl Into<Provider>,
        filter_data: impl Into<Provider>,
        filtered_columns: Vec<MappingEntry>,
        result_column: impl Into<Arc<str>>,
    ) -> IncludeProvider {
        IncludeProvider {
            source: source.into(),
            filter_data: filter_data.into(),
            filtered_columns,
            result_column: result_column.into(),
        }
    }
}

impl MappingEntry {
    pub fn as_column(&self) -> Option<usize> {
        match self {
            MappingEntry::Column(index) => Some(*index),
            MappingEntry::Calculated(_) => None,
        }
    }

    pub fn as_calculated(&self) -> Option<&Arc<ExprLambda>> {
        match self {
            MappingEntry::Calculated(lambda) => Some(lambda),
            MappingEntry::Column(_) => None,
        }
    }
}
