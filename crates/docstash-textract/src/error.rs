//! Mapping from Textract SDK failures into [`docstash_core::Error`].

use std::fmt;

use aws_sdk_textract::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use docstash_core::{Error, ErrorKind};

/// Result type for Textract operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Converts an SDK error raised by `operation` into a core error.
///
/// Transport timeouts become [`ErrorKind::Timeout`]; service errors are
/// classified by their error code.
pub(crate) fn from_sdk<E, R>(operation: &'static str, err: SdkError<E, R>) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: fmt::Debug + Send + Sync + 'static,
{
    let kind = match &err {
        SdkError::TimeoutError(_) => ErrorKind::Timeout,
        SdkError::ServiceError(_) => classify_code(err.code()),
        _ => ErrorKind::ExternalError,
    };

    Error::new(kind)
        .with_message(format!("{operation}: {}", DisplayErrorContext(&err)))
        .with_source(err)
}

/// Maps a Textract error code onto an error kind.
pub(crate) fn classify_code(code: Option<&str>) -> ErrorKind {
    match code {
        Some(
            "AccessDeniedException"
            | "UnrecognizedClientException"
            | "InvalidSignatureException"
            | "ExpiredTokenException",
        ) => ErrorKind::Authentication,
        Some("InvalidS3ObjectException") => ErrorKind::NotFound,
        Some(
            "ThrottlingException"
            | "ProvisionedThroughputExceededException"
            | "LimitExceededException",
        ) => ErrorKind::RateLimited,
        Some(
            "InvalidParameterException"
            | "InvalidJobIdException"
            | "BadDocumentException"
            | "UnsupportedDocumentException"
            | "DocumentTooLargeException",
        ) => ErrorKind::InvalidInput,
        _ => ErrorKind::ExternalError,
    }
}
