use super::Error;

/// Error when a backend cannot introspect the requested catalog information.
///
/// This occurs when:
/// - A backend has no way to list foreign keys or constraints for a table
/// - A backend does not support introspection at all
///
/// Per-table lookups treat this as "feature absent" and fall back to empty
/// metadata. When listing tables fails this way, the whole run is aborted.
#[derive(Debug)]
pub(super) struct NotSupported {
    what: Box<str>,
}

impl std::error::Error for NotSupported {}

impl core::fmt::Display for NotSupported {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "introspection not supported: {}", self.what)
    }
}

impl Error {
    /// Creates a not-supported error naming the missing capability.
    pub fn not_supported(what: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::NotSupported(NotSupported {
            what: what.into().into(),
        }))
    }

    /// Returns `true` if this error is a not-supported error.
    pub fn is_not_supported(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::NotSupported(_))
    }
}
