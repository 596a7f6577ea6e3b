//! Types shared across the crate.

pub mod error;

pub use error::{Error, ErrorKind};
