//! Convenience re-exports.

pub use crate::client::{ClearReport, GetOutput, ListPage, ObjectStoreClient, PutOutput};
pub use crate::providers::{Client, S3Credentials, S3Provider};
pub use crate::types::{Error, ErrorKind};
