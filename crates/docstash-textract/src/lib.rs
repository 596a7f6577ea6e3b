#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for Textract client operations.
///
/// Use this target for logging client initialization and individual API calls.
pub const TRACING_TARGET_CLIENT: &str = "docstash_textract::client";

/// Tracing target for the document-analysis provider.
pub const TRACING_TARGET_PROVIDER: &str = "docstash_textract::provider";

mod client;
mod convert;
pub mod error;
#[doc(hidden)]
pub mod prelude;
pub mod provider;

pub use crate::client::{DetectionMode, TextractClient, TextractConfig, TextractCredentials};
pub use crate::provider::TextractAnalyzer;
