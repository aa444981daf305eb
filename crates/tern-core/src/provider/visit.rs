use super::*;
use crate::{Error, Expr, Result};

/// Rewrites the expressions embedded in a provider tree.
///
/// Sources are visited before the node reading them. The callback receives
/// the provider owning each expression and returns its replacement. A node is
/// rebuilt only when one of its sources or expressions changed; otherwise the
/// original node is returned.
pub struct ProviderVisitor<F> {
    f: F,
}

impl<F> ProviderVisitor<F>
where
    F: FnMut(&Provider, &Expr) -> Result<Expr>,
{
    pub fn new(f: F) -> ProviderVisitor<F> {
        ProviderVisitor { f }
    }

    pub fn visit(&mut self, provider: &Provider) -> Result<Provider> {
        Ok(match provider {
            Provider::Index(_) => provider.clone(),
            Provider::Filter(p) => {
                let source = self.visit(&p.source)?;
                let predicate = (self.f)(provider, &p.predicate)?;

                if source.ptr_eq(&p.source) && predicate.ptr_eq(&p.predicate) {
                    provider.clone()
                } else {
                    FilterProvider { source, predicate }.into()
                }
            }
            Provider::Calculate(p) => {
                let source = self.visit(&p.source)?;
                let mut changed = !source.ptr_eq(&p.source);

                let mut columns = Vec::with_capacity(p.columns.len());
                for column in &p.columns {
                    let expression = (self.f)(provider, &column.expression)?;
                    changed |= !expression.ptr_eq(&column.expression);
                    columns.push(CalculatedColumn {
                        expression,
                        ..column.clone()
                    });
                }

                if changed {
                    CalculateProvider { source, columns }.into()
                } else {
                    provider.clone()
                }
            }
            Provider::Select(p) => {
                let source = self.visit(&p.source)?;

                if source.ptr_eq(&p.source) {
                    provider.clone()
                } else {
                    SelectProvider {
                        source,
                        columns: p.columns.clone(),
                    }
                    .into()
                }
            }
            Provider::Join(p) => {
                let left = self.visit(&p.left)?;
                let right = self.visit(&p.right)?;

                if left.ptr_eq(&p.left) && right.ptr_eq(&p.right) {
                    provider.clone()
                } else {
                    JoinProvider {
                        left,
                        right,
                        ..(**p).clone()
                    }
                    .into()
                }
            }
            Provider::Apply(p) => {
                let left = self.visit(&p.left)?;
                let right = self.visit(&p.right)?;

                if left.ptr_eq(&p.left) && right.ptr_eq(&p.right) {
                    provider.clone()
                } else {
                    ApplyProvider {
                        left,
                        right,
                        ..(**p).clone()
                    }
                    .into()
                }
            }
            Provider::Include(p) => {
                let source = self.visit(&p.source)?;
                let filter_data = self.visit(&p.filter_data)?;
                let mut changed = !source.ptr_eq(&p.source) || !filter_data.ptr_eq(&p.filter_data);

                let mut filtered_columns = Vec::with_capacity(p.filtered_columns.len());
                for entry in &p.filtered_columns {
                    let entry = match entry {
                        MappingEntry::Column(_) => entry.clone(),
                        MappingEntry::Calculated(lambda) => {
                            let before = Expr::Lambda(lambda.clone());
                            let after = (self.f)(provider, &before)?;

                            if after.ptr_eq(&before) {
                                entry.clone()
                            } else {
                                changed = true;
                                match after {
                                    Expr::Lambda(lambda) => MappingEntry::Calculated(lambda),
                                    other => {
                                        return Err(Error::invalid_expression(format!(
                                            "calculated filter column must stay a lambda; actual={}",
                                            other.describe()
                                        )))
                                    }
                                }
                            }
                        }
                    };
                    filtered_columns.push(entry);
                }

                if changed {
                    IncludeProvider {
                        source,
                        filter_data,
                        filtered_columns,
                        result_column: p.result_column.clone(),
                    }
                    .into()
                } else {
                    provider.clone()
                }
            }
            Provider::Take(p) => {
                let source = self.visit(&p.source)?;
                let count = (self.f)(provider, &p.count)?;

                if source.ptr_eq(&p.source) && count.ptr_eq(&p.count) {
                    provider.clone()
                } else {
                    TakeProvider { source, count }.into()
                }
            }
        })
    }
}
