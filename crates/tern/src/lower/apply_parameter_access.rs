use std::sync::Arc;
use tern_core::{
    expr::{visit, ApplyParameter, ExprCall, ExtendedExpressionVisitor},
    Expr, Result,
};
use tracing::trace;

/// Finds reads of the outer row of one correlated apply and hands each of
/// them to a processor.
///
/// A read is `Constant(param).Value[index]` where `param` is the visitor's
/// apply parameter and `index` is a constant. The processor receives the read
/// and the element index and returns its replacement; every other node is
/// left as is.
pub struct ApplyParameterAccessVisitor<'a, F> {
    apply_parameter: &'a ApplyParameter,
    processor: F,
}

impl<'a, F> ApplyParameterAccessVisitor<'a, F>
where
    F: FnMut(&Expr, usize) -> Result<Expr>,
{
    pub fn new(apply_parameter: &'a ApplyParameter, processor: F) -> Self {
        ApplyParameterAccessVisitor {
            apply_parameter,
            processor,
        }
    }

    pub fn process(&mut self, expr: &Expr) -> Result<Expr> {
        self.visit(expr)
    }
}

impl<F> ExtendedExpressionVisitor for ApplyParameterAccessVisitor<'_, F>
where
    F: FnMut(&Expr, usize) -> Result<Expr>,
{
    fn visit_call(&mut self, node: &Arc<ExprCall>) -> Result<Expr> {
        let expr = Expr::Call(node.clone());

        if expr.as_apply_parameter_access(self.apply_parameter).is_none() {
            return visit::visit_call(self, node);
        }

        let index = node.tuple_access_index()?;
        trace!(
            apply_parameter = self.apply_parameter.name(),
            index,
            "outer row access"
        );

        (self.processor)(&expr, index)
    }
}
