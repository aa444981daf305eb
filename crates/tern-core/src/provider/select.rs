use super::Provider;

/// Projects `source` rows to `columns`; column `i` of the output is column
/// `columns[i]` of the source.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectProvider {
    pub source: Provider,
    pub columns: Vec<usize>,
}

impl SelectProvider {
    pub fn new(source: impl Into<Provider>, columns: Vec<usize>) -> SelectProvider {
        SelectProvider {
            source: source.into(),
            columns,
        }
    }
}
