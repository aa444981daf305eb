//! Lowering of persistent query shapes onto flat rows.
//!
//! The expression model lives in [`core`]; this crate holds the passes run
//! over it while a query is translated: gathering the columns a shape reads,
//! stripping owners, joining referenced entities, substituting nodes,
//! rewriting correlated outer-row accesses, building include-filter mappings
//! and normalizing enums.

pub mod lower;
pub use lower::{
    ApplyParameterAccessVisitor, ColumnExtractionModes, ColumnGatherer, EntityExpressionJoiner,
    EntityFieldJoiner, EnumRewriter, ExtendedExpressionReplacer, GenericExpressionVisitor,
    IncludeFilterMappingGatherer, OwnerRemover,
};

pub use tern_core as core;
pub use tern_core::{Error, Result};
