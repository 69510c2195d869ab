mod binding;
mod provider;
mod type_conversion;
mod usage;

use binding::BindingError;
use provider::ProviderError;
use std::sync::Arc;
use type_conversion::TypeConversionError;
use usage::UsageError;

/// An error that can occur in rowmap.
#[derive(Clone)]
pub struct Error {
    inner: Arc<ErrorInner>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
}

#[derive(Debug)]
enum ErrorKind {
    /// A precondition of the API was violated by the caller.
    Usage(UsageError),

    /// A values sequence could not be correlated with the scanned tokens.
    Binding(BindingError),

    /// A failure raised by the underlying provider, propagated unmodified.
    Provider(ProviderError),

    /// A value could not be converted to the requested type.
    TypeConversion(TypeConversionError),

    /// Ad-hoc error raised by an adapter or caller.
    Adhoc(anyhow::Error),
}

impl Error {
    fn kind(&self) -> &ErrorKind {
        &self.inner.kind
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Provider(err) => Some(err),
            ErrorKind::Adhoc(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self.kind(), f)
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error")
                .field("kind", &self.inner.kind)
                .finish()
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Usage(err) => core::fmt::Display::fmt(err, f),
            Binding(err) => core::fmt::Display::fmt(err, f),
            Provider(err) => core::fmt::Display::fmt(err, f),
            TypeConversion(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Arc::new(ErrorInner { kind }),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Adhoc(err))
    }
}
