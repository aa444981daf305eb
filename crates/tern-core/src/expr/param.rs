use super::{Expr, Type};
use std::{
    hash::{Hash, Hasher},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

static NEXT_ID: AtomicUsize = AtomicUsize::new(1);

fn next_id() -> usize {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// A formal parameter of a lambda, also used to identify the outer row a
/// correlated sub-query is relative to.
///
/// Identity is the process-unique id allocated by [`ExprParameter::new`];
/// two parameters with the same name and type are still distinct.
#[derive(Debug, Clone)]
pub struct ExprParameter {
    id: usize,
    name: Arc<str>,
    ty: Type,
}

impl ExprParameter {
    pub fn new(name: impl Into<Arc<str>>, ty: impl Into<Type>) -> ExprParameter {
        ExprParameter {
            id: next_id(),
            name: name.into(),
            ty: ty.into(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }
}

impl PartialEq for ExprParameter {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ExprParameter {}

impl Hash for ExprParameter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Expr {
    pub fn parameter(param: &ExprParameter) -> Expr {
        param.clone().into()
    }

    pub fn as_parameter(&self) -> Option<&ExprParameter> {
        match self {
            Expr::Parameter(param) => Some(&**param),
            _ => None,
        }
    }
}

macro_rules! token {
    ( $(#[$meta:meta])* $name:ident ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            id: usize,
            name: Arc<str>,
        }

        impl $name {
            pub fn new(name: impl Into<Arc<str>>) -> $name {
                $name {
                    id: next_id(),
                    name: name.into(),
                }
            }

            pub fn id(&self) -> usize {
                self.id
            }

            pub fn name(&self) -> &str {
                &self.name
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.id == other.id
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.id.hash(state);
            }
        }
    };
}

token! {
    /// Opaque token identifying one correlation edge: the outer row of a
    /// correlated apply. Only equality matters.
    ApplyParameter
}

token! {
    /// Opaque token naming a tuple captured from the enclosing scope and
    /// bound when a projection is executed.
    TupleParameter
}
