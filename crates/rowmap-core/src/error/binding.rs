use super::Error;

/// A values sequence element could not be correlated with any scanned
/// parameter token.
///
/// Raised only when the binder runs in strict mode; the lenient default
/// drops the excess value and logs instead.
#[derive(Debug)]
pub(super) struct BindingError {
    message: String,
}

impl std::error::Error for BindingError {}

impl core::fmt::Display for BindingError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "binding error: {}", self.message)
    }
}

impl Error {
    pub fn binding(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Binding(BindingError {
            message: message.into(),
        }))
    }

    /// Returns `true` if this error is a binding error.
    pub fn is_binding(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Binding(_))
    }
}
