use super::Error;

/// Error when an expression node is malformed.
///
/// This occurs when:
/// - Child mappings of a composite node are not adjacent
/// - An entity does not have exactly one key
/// - A tuple access index is not a literal
/// - A remapped offset is missing from the target column map
#[derive(Debug)]
pub(super) struct InvalidExpression {
    message: Box<str>,
}

impl std::error::Error for InvalidExpression {}

impl core::fmt::Display for InvalidExpression {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid expression: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid expression error.
    pub fn invalid_expression(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidExpression(InvalidExpression {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid expression error.
    pub fn is_invalid_expression(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidExpression(_))
    }
}
