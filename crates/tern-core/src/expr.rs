mod column;
pub use column::ColumnExpression;

mod constructor;
pub use constructor::ConstructorExpression;

mod entity;
pub use entity::EntityExpression;

mod entity_field;
pub use entity_field::EntityFieldExpression;

mod entity_set;
pub use entity_set::EntitySetExpression;

mod eval;

mod expr_binary;
pub use expr_binary::{BinaryOp, ExprBinary};

mod expr_call;
pub use expr_call::{ExprCall, Method};

mod expr_conditional;
pub use expr_conditional::ExprConditional;

mod expr_constant;
pub use expr_constant::ExprConstant;

mod expr_convert;
pub use expr_convert::ExprConvert;

mod expr_lambda;
pub use expr_lambda::ExprLambda;

mod expr_member;
pub use expr_member::ExprMember;

mod expr_unary;
pub use expr_unary::{ExprUnary, UnaryOp};

mod extended_type;
pub use extended_type::ExtendedType;

mod field;
pub use field::{FieldExpression, Owner};

mod full_text;
pub use full_text::FullTextExpression;

mod grouping;
pub use grouping::GroupingExpression;

mod key;
pub use key::KeyExpression;

mod local_collection;
pub use local_collection::LocalCollectionExpression;

mod mapping;
pub use mapping::Mapping;

mod marker;
pub use marker::{MarkerExpression, MarkerType};

mod param;
pub use param::{ApplyParameter, ExprParameter, TupleParameter};

mod projection;
pub use projection::{ItemProjectorExpression, ProjectionExpression, ResultAccessMethod};

pub mod remap;
pub use remap::{Remap, RemapScope};

mod structure;
pub use structure::StructureExpression;

mod structure_field;
pub use structure_field::StructureFieldExpression;

mod sub_query;
pub use sub_query::SubQueryExpression;

mod ty;
pub use ty::{EnumType, EnumVariant, Type};

mod value;
pub use value::{Value, ValueEnum};

pub mod visit;
pub use visit::ExtendedExpressionVisitor;

pub mod visit_persistent;
pub use visit_persistent::PersistentExpressionVisitor;

use std::sync::Arc;

/// A node in a query expression tree.
///
/// The tree mixes two families of nodes. Standard nodes (constants,
/// parameters, member accesses, method calls, operators and lambdas) make up
/// the host expression language that predicates and projections are written
/// in. Extended nodes describe the persistent shape of query results and
/// carry the column offsets needed to read them from a flat row; each of
/// them has an [`ExtendedType`] tag.
///
/// Every variant holds its payload behind an `Arc`, so cloning an `Expr` is
/// cheap and rewrites share every sub-tree they leave untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Binary operator
    Binary(Arc<ExprBinary>),

    /// Method call, including tuple element reads
    Call(Arc<ExprCall>),

    /// `test ? if_true : if_false`
    Conditional(Arc<ExprConditional>),

    /// Constant value
    Constant(Arc<ExprConstant>),

    /// Explicit type conversion
    Convert(Arc<ExprConvert>),

    /// Function body with formal parameters
    Lambda(Arc<ExprLambda>),

    /// Member access
    Member(Arc<ExprMember>),

    /// Reference to a formal parameter
    Parameter(Arc<ExprParameter>),

    /// Unary operator
    Unary(Arc<ExprUnary>),

    /// A query result: item shape plus the provider producing its rows
    Projection(Arc<ProjectionExpression>),

    /// Scalar persistent field
    Field(Arc<FieldExpression>),

    /// Embedded value aggregate read as a field
    StructureField(Arc<StructureFieldExpression>),

    /// Columns identifying an entity
    Key(Arc<KeyExpression>),

    /// Persistent object
    Entity(Arc<EntityExpression>),

    /// Reference to another entity
    EntityField(Arc<EntityFieldExpression>),

    /// Collection of referenced entities
    EntitySet(Arc<EntitySetExpression>),

    /// Already-resolved relational column
    Column(Arc<ColumnExpression>),

    /// Item shape paired with its data source
    ItemProjector(Arc<ItemProjectorExpression>),

    /// Transparent tag on a sub-tree
    Marker(Arc<MarkerExpression>),

    /// Correlated nested query
    SubQuery(Arc<SubQueryExpression>),

    /// Correlated nested query grouped by a key
    Grouping(Arc<GroupingExpression>),

    /// Client-side collection used inside a query
    LocalCollection(Arc<LocalCollectionExpression>),

    /// Standalone embedded value aggregate
    Structure(Arc<StructureExpression>),

    /// Construction of a plain value from bindings
    Constructor(Arc<ConstructorExpression>),

    /// Full-text match: entity plus rank column
    FullText(Arc<FullTextExpression>),
}

/// Implemented by every node payload type so code can ask "is this node a
/// `T`?" without matching on [`Expr`] by hand.
pub trait ExprVariant: Sized {
    fn from_expr(expr: &Expr) -> Option<&Arc<Self>>;
}

macro_rules! expr_variants {
    ( $( $variant:ident($ty:ty) ),* $(,)? ) => {
        $(
            impl From<$ty> for Expr {
                fn from(value: $ty) -> Self {
                    Expr::$variant(Arc::new(value))
                }
            }

            impl From<Arc<$ty>> for Expr {
                fn from(value: Arc<$ty>) -> Self {
                    Expr::$variant(value)
                }
            }

            impl ExprVariant for $ty {
                fn from_expr(expr: &Expr) -> Option<&Arc<Self>> {
                    match expr {
                        Expr::$variant(node) => Some(node),
                        _ => None,
                    }
                }
            }
        )*

        impl Expr {
            /// Returns `true` when both expressions are the same node.
            pub fn ptr_eq(&self, other: &Expr) -> bool {
                match (self, other) {
                    $( (Expr::$variant(a), Expr::$variant(b)) => Arc::ptr_eq(a, b), )*
                    _ => false,
                }
            }

            /// Address of the node payload, stable for as long as the node is
            /// alive.
            pub(crate) fn addr(&self) -> *const () {
                match self {
                    $( Expr::$variant(node) => Arc::as_ptr(node) as *const (), )*
                }
            }
        }
    };
}

expr_variants! {
    Binary(ExprBinary),
    Call(ExprCall),
    Conditional(ExprConditional),
    Constant(ExprConstant),
    Convert(ExprConvert),
    Lambda(ExprLambda),
    Member(ExprMember),
    Parameter(ExprParameter),
    Unary(ExprUnary),
    Projection(ProjectionExpression),
    Field(FieldExpression),
    StructureField(StructureFieldExpression),
    Key(KeyExpression),
    Entity(EntityExpression),
    EntityField(EntityFieldExpression),
    EntitySet(EntitySetExpression),
    Column(ColumnExpression),
    ItemProjector(ItemProjectorExpression),
    Marker(MarkerExpression),
    SubQuery(SubQueryExpression),
    Grouping(GroupingExpression),
    LocalCollection(LocalCollectionExpression),
    Structure(StructureExpression),
    Constructor(ConstructorExpression),
    FullText(FullTextExpression),
}

impl Expr {
    /// Returns the extended tag of this node, or `None` for standard nodes.
    pub fn extended_type(&self) -> Option<ExtendedType> {
        use ExtendedType as T;

        Some(match self {
            Expr::Binary(_)
            | Expr::Call(_)
            | Expr::Conditional(_)
            | Expr::Constant(_)
            | Expr::Convert(_)
            | Expr::Lambda(_)
            | Expr::Member(_)
            | Expr::Parameter(_)
            | Expr::Unary(_) => return None,
            Expr::Projection(_) => T::Projection,
            Expr::Field(_) => T::Field,
            Expr::StructureField(_) => T::StructureField,
            Expr::Key(_) => T::Key,
            Expr::Entity(_) => T::Entity,
            Expr::EntityField(_) => T::EntityField,
            Expr::EntitySet(_) => T::EntitySet,
            Expr::Column(_) => T::Column,
            Expr::ItemProjector(_) => T::ItemProjector,
            Expr::Marker(_) => T::Marker,
            Expr::SubQuery(_) => T::SubQuery,
            Expr::Grouping(_) => T::Grouping,
            Expr::LocalCollection(_) => T::LocalCollection,
            Expr::Structure(_) => T::Structure,
            Expr::Constructor(_) => T::Constructor,
            Expr::FullText(_) => T::FullText,
        })
    }

    pub fn is_extended(&self) -> bool {
        self.extended_type().is_some()
    }

    /// The static type of the value this expression produces.
    pub fn ty(&self) -> Type {
        match self {
            Expr::Binary(e) => e.ty.clone(),
            Expr::Call(e) => e.ty.clone(),
            Expr::Conditional(e) => e.if_true.ty(),
            Expr::Constant(e) => e.ty.clone(),
            Expr::Convert(e) => e.ty.clone(),
            Expr::Lambda(_) => Type::Object("Lambda".into()),
            Expr::Member(e) => e.ty.clone(),
            Expr::Parameter(e) => e.ty().clone(),
            Expr::Unary(e) => e.ty.clone(),
            Expr::Projection(e) => e.ty.clone(),
            Expr::Field(e) => e.field.ty.clone(),
            Expr::StructureField(e) => e.field.ty.clone(),
            Expr::Key(e) => Type::Key(e.entity.clone()),
            Expr::Entity(e) => Type::Entity(e.persistent_type.name.clone()),
            Expr::EntityField(e) => e.field.ty.clone(),
            Expr::EntitySet(e) => e.field.ty.clone(),
            Expr::Column(e) => e.ty.clone(),
            Expr::ItemProjector(e) => Type::Sequence(Box::new(e.item.ty())),
            Expr::Marker(e) => e.target.ty(),
            Expr::SubQuery(e) => e.ty.clone(),
            Expr::Grouping(e) => e.sub_query.ty.clone(),
            Expr::LocalCollection(e) => e.ty.clone(),
            Expr::Structure(e) => Type::Structure(e.persistent_type.name.clone()),
            Expr::Constructor(e) => e.ty.clone(),
            Expr::FullText(_) => Type::Object("FullTextMatch".into()),
        }
    }

    /// Short human readable description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Expr::Field(e) => format!("Field({})", e.name()),
            Expr::StructureField(e) => format!("StructureField({})", e.name()),
            Expr::EntityField(e) => format!("EntityField({})", e.name()),
            Expr::EntitySet(e) => format!("EntitySet({})", e.field.name),
            Expr::Entity(e) => format!("Entity({})", e.persistent_type.name),
            Expr::Key(e) => format!("Key({})", e.entity),
            Expr::Column(e) => format!("Column({})", e.mapping),
            Expr::Constant(e) => format!("Constant({:?})", e.value),
            Expr::Parameter(e) => format!("Parameter({})", e.name()),
            Expr::Member(e) => format!("Member(.{})", e.member),
            Expr::Binary(e) => format!("Binary({:?})", e.op),
            Expr::Call(e) => format!("Call({})", e.method),
            Expr::Conditional(_) => "Conditional".to_string(),
            Expr::Convert(e) => format!("Convert({})", e.ty),
            Expr::Lambda(e) => format!("Lambda({} params)", e.params.len()),
            Expr::Unary(e) => format!("Unary({:?})", e.op),
            _ => self
                .extended_type()
                .map(|tag| tag.to_string())
                .unwrap_or_default(),
        }
    }

    /// Removes any chain of conversions wrapping this expression.
    pub fn strip_casts(&self) -> &Expr {
        let mut expr = self;
        while let Expr::Convert(convert) = expr {
            expr = &convert.expr;
        }
        expr
    }

    /// Persistent mapping carried by this node, if any.
    pub fn mapping(&self) -> Option<Mapping> {
        Some(match self {
            Expr::Field(e) => e.mapping,
            Expr::StructureField(e) => e.mapping,
            Expr::Key(e) => e.mapping,
            Expr::Entity(e) => e.mapping,
            Expr::EntityField(e) => e.mapping(),
            Expr::Column(e) => e.mapping,
            Expr::Structure(e) => e.mapping,
            _ => return None,
        })
    }

    /// Correlated scope this node is relative to, if any.
    pub fn outer_parameter(&self) -> Option<&ExprParameter> {
        match self {
            Expr::Field(e) => e.outer_parameter.as_ref(),
            Expr::StructureField(e) => e.outer_parameter.as_ref(),
            Expr::Key(e) => e.outer_parameter.as_ref(),
            Expr::Entity(e) => e.outer_parameter.as_ref(),
            Expr::EntityField(e) => e.outer_parameter.as_ref(),
            Expr::EntitySet(e) => e.outer_parameter.as_ref(),
            Expr::Column(e) => e.outer_parameter.as_ref(),
            Expr::Structure(e) => e.outer_parameter.as_ref(),
            Expr::LocalCollection(e) => e.outer_parameter.as_ref(),
            Expr::FullText(e) => e.outer_parameter.as_ref(),
            Expr::SubQuery(e) => Some(&e.outer_parameter),
            Expr::Grouping(e) => Some(&e.sub_query.outer_parameter),
            _ => None,
        }
    }
}
