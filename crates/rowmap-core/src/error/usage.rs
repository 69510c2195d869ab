use super::Error;

/// A precondition of the API was violated by the caller.
///
/// Usage errors are fatal and never retried: a non-select statement handed
/// to a count derivation, a row window requested for a stored-procedure
/// call, or an entity type whose primary-key declaration is missing or
/// ambiguous.
#[derive(Debug)]
pub(super) struct UsageError {
    message: String,
}

impl std::error::Error for UsageError {}

impl core::fmt::Display for UsageError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "usage error: {}", self.message)
    }
}

impl Error {
    /// Creates an error describing a violated API precondition.
    pub fn usage(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Usage(UsageError {
            message: message.into(),
        }))
    }

    /// Returns `true` if this error is a usage error.
    pub fn is_usage(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Usage(_))
    }
}
