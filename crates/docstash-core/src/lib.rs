#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for document-analysis operations.
pub const TRACING_TARGET_ANALYSIS: &str = "docstash_core::analysis";

mod error;
mod stitch;

pub mod analysis;
pub mod block;

#[doc(hidden)]
pub mod prelude;

pub use error::{BoxedError, Error, ErrorKind, Result};
pub use stitch::{stitch, stitch_optional};
