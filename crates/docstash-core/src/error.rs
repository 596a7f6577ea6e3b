//! Error type shared by document-analysis providers.

use strum::{AsRefStr, IntoStaticStr};
use thiserror::Error;

/// Boxed source error, thread-safe.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Result alias defaulting to [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors raised by document-analysis providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The request was rejected as malformed.
    InvalidInput,
    /// Credentials were missing, invalid or lacked permission.
    Authentication,
    /// The referenced document does not exist.
    NotFound,
    /// The operation did not finish in time.
    Timeout,
    /// The provider was throttled or briefly unavailable.
    RateLimited,
    /// The external service reported a failure.
    ExternalError,
    /// The provider could not be configured.
    Configuration,
}

impl ErrorKind {
    /// Returns the snake_case name of this kind.
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// A structured error type for document-analysis operations.
#[derive(Debug, Error)]
#[error("{}{}", .kind.as_str(), .message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Error {
    /// Category used for retry decisions and display.
    pub kind: ErrorKind,
    /// Human-readable detail, e.g. the failing document.
    pub message: Option<String>,
    /// Underlying failure, if any.
    #[source]
    pub source: Option<BoxedError>,
}

impl Error {
    /// Creates an error of `kind` without detail.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            source: None,
        }
    }

    /// Attaches a human-readable detail.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attaches the underlying failure.
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Shorthand for [`Error::new`] with the matching kind.
    pub fn invalid_input() -> Self {
        Self::new(ErrorKind::InvalidInput)
    }

    pub fn authentication() -> Self {
        Self::new(ErrorKind::Authentication)
    }

    pub fn not_found() -> Self {
        Self::new(ErrorKind::NotFound)
    }

    pub fn timeout() -> Self {
        Self::new(ErrorKind::Timeout)
    }

    pub fn rate_limited() -> Self {
        Self::new(ErrorKind::RateLimited)
    }

    pub fn external_error() -> Self {
        Self::new(ErrorKind::ExternalError)
    }

    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }

    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns true if repeating the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind, ErrorKind::Timeout | ErrorKind::RateLimited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_message() {
        let error = Error::not_found().with_message("s3://bucket/missing.pdf");
        assert_eq!(error.to_string(), "not_found: s3://bucket/missing.pdf");
        assert_eq!(Error::timeout().to_string(), "timeout");
    }

    #[test]
    fn retryable_kinds() {
        assert!(Error::timeout().is_retryable());
        assert!(Error::rate_limited().is_retryable());
        assert!(!Error::authentication().is_retryable());
        assert!(!Error::external_error().is_retryable());
    }

    #[test]
    fn source_is_preserved() {
        let io = std::io::Error::other("socket closed");
        let error = Error::external_error().with_source(io);
        let source = std::error::Error::source(&error).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("socket closed"));
    }
}
