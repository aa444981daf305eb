use super::Error;

/// Error when a semi-join filter mapping finished with unfilled slots.
///
/// The filter predicate handed to the gatherer was not in the canonical
/// `filterData[i] == <expr over the filtered row>` shape.
#[derive(Debug)]
pub(super) struct IncompleteMapping {
    message: Box<str>,
}

impl std::error::Error for IncompleteMapping {}

impl core::fmt::Display for IncompleteMapping {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "incomplete mapping: {}", self.message)
    }
}

impl Error {
    /// Creates an incomplete mapping error.
    pub fn incomplete_mapping(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::IncompleteMapping(IncompleteMapping {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an incomplete mapping error.
    pub fn is_incomplete_mapping(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::IncompleteMapping(_))
    }
}
