use super::Error;

/// Error when a component is handed a node kind it deliberately does not
/// support in its context.
///
/// This occurs when:
/// - A structural visitor is asked to walk a projection or item projector
/// - A rewrite replaces a node with one of an incompatible kind
///
/// It signals a misuse of the component by its caller.
#[derive(Debug)]
pub(super) struct UnsupportedOperation {
    message: Box<str>,
}

impl std::error::Error for UnsupportedOperation {}

impl core::fmt::Display for UnsupportedOperation {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unsupported operation: {}", self.message)
    }
}

impl Error {
    /// Creates an unsupported operation error.
    pub fn unsupported_operation(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedOperation(UnsupportedOperation {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an unsupported operation error.
    pub fn is_unsupported_operation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsupportedOperation(_))
    }
}
