use super::Error;

/// Error when a traversal meets a node it has no rule for.
///
/// Silently skipping such a node would corrupt the column offsets computed
/// downstream, so traversals report it instead.
#[derive(Debug)]
pub(super) struct UnknownNode {
    message: Box<str>,
}

impl std::error::Error for UnknownNode {}

impl core::fmt::Display for UnknownNode {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unknown expression node: {}", self.message)
    }
}

impl Error {
    /// Creates an unknown node error naming the offending node.
    pub fn unknown_node(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownNode(UnknownNode {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an unknown node error.
    pub fn is_unknown_node(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnknownNode(_))
    }
}
