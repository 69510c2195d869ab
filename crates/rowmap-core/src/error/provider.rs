use super::Error;

/// Error from a database provider.
#[derive(Debug)]
pub(super) struct ProviderError {
    inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for ProviderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        // Display the error and walk its source chain
        core::fmt::Display::fmt(&self.inner, f)?;
        let mut source = self.inner.source();
        while let Some(err) = source {
            write!(f, ": {}", err)?;
            source = err.source();
        }
        Ok(())
    }
}

impl Error {
    /// Creates an error from a provider error.
    ///
    /// This is the preferred way to convert provider-specific errors
    /// (rusqlite errors and the like) into rowmap errors. The original
    /// error is retained unmodified and reachable through `source()`.
    pub fn provider(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::Provider(ProviderError {
            inner: Box::new(err),
        }))
    }

    /// Returns `true` if this error is a provider error.
    pub fn is_provider(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Provider(_))
    }
}
