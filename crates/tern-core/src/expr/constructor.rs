use super::{Expr, Type};
use indexmap::IndexMap;
use std::sync::Arc;

/// Construction of a plain value: constructor arguments followed by member
/// assignments.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorExpression {
    pub ty: Type,

    /// Members assigned after construction.
    pub bindings: IndexMap<Arc<str>, Expr>,

    /// Members set directly on the underlying storage, bypassing setters.
    pub native_bindings: IndexMap<Arc<str>, Expr>,

    pub arguments: Vec<Expr>,
}

impl ConstructorExpression {
    pub fn new(ty: Type, arguments: Vec<Expr>) -> ConstructorExpression {
        ConstructorExpression {
            ty,
            bindings: IndexMap::new(),
            native_bindings: IndexMap::new(),
            arguments,
        }
    }

    pub fn bind(mut self, member: impl Into<Arc<str>>, expr: impl Into<Expr>) -> ConstructorExpression {
        self.bindings.insert(member.into(), expr.into());
        self
    }

    pub fn bind_native(mut self, member: impl Into<Arc<str>>, expr: impl Into<Expr>) -> ConstructorExpression {
        self.native_bindings.insert(member.into(), expr.into());
        self
    }

    /// Every child expression: arguments, then bindings, then native
    /// bindings.
    pub fn children(&self) -> impl Iterator<Item = &Expr> {
        self.arguments
            .iter()
            .chain(self.bindings.values())
            .chain(self.native_bindings.values())
    }
}
