use std::sync::Arc;
use tern_core::{
    expr::{
        visit, ApplyParameter, ExprBinary, ExprLambda, ExprMember, ExprParameter,
        ExtendedExpressionVisitor, Type,
    },
    provider::MappingEntry,
    Error, Expr, Result,
};
use tracing::trace;

/// Name of the formal parameter of calculated mapping entries.
const FILTERED_ROW: &str = "filteredRow";

/// Works out, for each column of an include filter's data, how to compute the
/// value it is compared with from the filtered row.
///
/// The filter is expected in the canonical shape produced for "contained in"
/// predicates: a conjunction of comparisons, each between an element of the
/// filter data tuple and an expression over the filtered row.
pub struct IncludeFilterMappingGatherer<'a> {
    filter_data_tuple: &'a Expr,
    filtered_tuple: &'a ApplyParameter,
    filtered_row: ExprParameter,
    mapping: Vec<Option<MappingEntry>>,
}

impl<'a> IncludeFilterMappingGatherer<'a> {
    /// Returns one entry per filter data column.
    ///
    /// `filter_data_tuple` is the expression standing for the filter data
    /// row and `filtered_tuple` identifies the row being tested. Comparisons
    /// reading a filter data column at or beyond `column_count` are ignored.
    /// Every column must be matched by some comparison.
    pub fn gather(
        filter: &Expr,
        filter_data_tuple: &'a Expr,
        filtered_tuple: &'a ApplyParameter,
        column_count: usize,
    ) -> Result<Vec<MappingEntry>> {
        let mut gatherer = IncludeFilterMappingGatherer {
            filter_data_tuple,
            filtered_tuple,
            filtered_row: ExprParameter::new(FILTERED_ROW, Type::Tuple),
            mapping: vec![None; column_count],
        };

        gatherer.visit(filter)?;

        let unfilled = gatherer
            .mapping
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.is_none())
            .map(|(index, _)| index)
            .collect::<Vec<_>>();

        if !unfilled.is_empty() {
            return Err(Error::incomplete_mapping(format!(
                "filter data columns {unfilled:?} are not compared with the filtered row"
            )));
        }

        Ok(gatherer.mapping.into_iter().flatten().collect())
    }

    fn filter_data_index(&self, expr: &Expr) -> Result<Option<usize>> {
        match expr.as_tuple_access()? {
            Some((tuple, index)) if tuple == self.filter_data_tuple => Ok(Some(index)),
            _ => Ok(None),
        }
    }

    fn mapping_entry(&self, expr: &Expr) -> Result<MappingEntry> {
        if let Some((Expr::Parameter(row), index)) = expr.as_tuple_access()? {
            if **row == self.filtered_row {
                return Ok(MappingEntry::Column(index));
            }
        }

        Ok(MappingEntry::Calculated(Arc::new(ExprLambda::new(
            vec![self.filtered_row.clone()],
            expr.clone(),
        ))))
    }
}

impl ExtendedExpressionVisitor for IncludeFilterMappingGatherer<'_> {
    fn visit_member(&mut self, node: &Arc<ExprMember>) -> Result<Expr> {
        let expr = Expr::Member(node.clone());

        if expr.as_apply_parameter_value() == Some(self.filtered_tuple) {
            return Ok(Expr::parameter(&self.filtered_row));
        }

        visit::visit_member(self, node)
    }

    fn visit_binary(&mut self, node: &Arc<ExprBinary>) -> Result<Expr> {
        let result = visit::visit_binary(self, node)?;

        let Expr::Binary(binary) = &result else {
            return Ok(result);
        };

        let lhs = binary.lhs.strip_casts();
        let rhs = binary.rhs.strip_casts();

        let (index, filtered) = match (self.filter_data_index(lhs)?, self.filter_data_index(rhs)?) {
            (Some(index), _) => (index, rhs),
            (None, Some(index)) => (index, lhs),
            (None, None) => return Ok(result),
        };

        if index >= self.mapping.len() {
            trace!(index, "ignoring comparison with out of range filter column");
            return Ok(result);
        }

        let entry = self.mapping_entry(filtered)?;
        trace!(index, ?entry, "include filter column");
        self.mapping[index] = Some(entry);

        Ok(result)
    }
}
