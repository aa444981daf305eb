mod apply_parameter_access;
pub use apply_parameter_access::ApplyParameterAccessVisitor;

mod column_gatherer;
pub use column_gatherer::{ColumnExtractionModes, ColumnGatherer};

mod entity_joiner;
pub use entity_joiner::{EntityExpressionJoiner, EntityFieldJoiner};

mod enum_rewriter;
pub use enum_rewriter::EnumRewriter;

mod generic_visitor;
pub use generic_visitor::GenericExpressionVisitor;

mod include_filter_mapping;
pub use include_filter_mapping::IncludeFilterMappingGatherer;

mod owner_remover;
pub use owner_remover::OwnerRemover;

mod replacer;
pub use replacer::ExtendedExpressionReplacer;

#[cfg(test)]
mod tests;
