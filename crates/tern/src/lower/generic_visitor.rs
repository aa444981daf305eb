use std::{marker::PhantomData, sync::Arc};
use tern_core::{
    expr::{visit, ExprVariant, ExtendedExpressionVisitor, RemapScope},
    Expr, Result,
};

/// Calls a callback on every node of kind `T`, rebuilding the tree around
/// the nodes it returns.
///
/// Nodes of other kinds are traversed structurally; markers are looked
/// through. The callback also receives the [`RemapScope`] of the current
/// top-level call so that nested rewrites, including nested visitors for
/// other node kinds, share it.
pub struct GenericExpressionVisitor<T, F> {
    callback: F,
    _kind: PhantomData<fn(&T)>,
}

struct Walker<'a, T, F> {
    callback: &'a mut F,
    scope: &'a mut RemapScope,
    _kind: PhantomData<fn(&T)>,
}

impl<T, F> GenericExpressionVisitor<T, F>
where
    T: ExprVariant,
    F: FnMut(&Arc<T>, &mut RemapScope) -> Result<Expr>,
{
    pub fn new(callback: F) -> Self {
        GenericExpressionVisitor {
            callback,
            _kind: PhantomData,
        }
    }

    /// Visits `expr` in a new scope.
    pub fn process(&mut self, expr: &Expr) -> Result<Expr> {
        let mut scope = RemapScope::new();
        self.process_in(&mut scope, expr)
    }

    /// Visits `expr` in the caller's scope.
    pub fn process_in(&mut self, scope: &mut RemapScope, expr: &Expr) -> Result<Expr> {
        Walker::<T, F> {
            callback: &mut self.callback,
            scope,
            _kind: PhantomData,
        }
        .visit(expr)
    }
}

impl<T, F> ExtendedExpressionVisitor for Walker<'_, T, F>
where
    T: ExprVariant,
    F: FnMut(&Arc<T>, &mut RemapScope) -> Result<Expr>,
{
    fn visit(&mut self, expr: &Expr) -> Result<Expr> {
        match T::from_expr(expr) {
            Some(node) => (self.callback)(node, &mut *self.scope),
            None => visit::visit(self, expr),
        }
    }
}
