use super::Error;

/// Error when a backend has no field type for a native column type.
///
/// The model generator recovers from this by guessing a text field.
#[derive(Debug)]
pub(super) struct UnknownFieldType {
    data_type: Box<str>,
}

impl std::error::Error for UnknownFieldType {}

impl core::fmt::Display for UnknownFieldType {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unknown field type: {}", self.data_type)
    }
}

impl Error {
    /// Creates an unknown field type error for the given native type.
    pub fn unknown_field_type(data_type: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownFieldType(UnknownFieldType {
            data_type: data_type.into().into(),
        }))
    }

    /// Returns `true` if this error is an unknown field type error.
    pub fn is_unknown_field_type(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnknownFieldType(_))
    }
}
