use super::Error;

/// Error when a field's owner chain does not lead back to an entity.
#[derive(Debug)]
pub(super) struct OwnerResolution {
    message: Box<str>,
}

impl std::error::Error for OwnerResolution {}

impl core::fmt::Display for OwnerResolution {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unable to resolve owner: {}", self.message)
    }
}

impl Error {
    /// Creates an owner resolution error. The message should name the field
    /// whose chain could not be resolved.
    pub fn owner_resolution(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::OwnerResolution(OwnerResolution {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an owner resolution error.
    pub fn is_owner_resolution(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::OwnerResolution(_))
    }
}
