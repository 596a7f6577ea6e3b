#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for object-store client operations.
pub const TRACING_TARGET_CLIENT: &str = "docstash_object::client";

/// Tracing target for provider connections.
pub const TRACING_TARGET_PROVIDER: &str = "docstash_object::provider";

pub mod client;
/// Provider trait and object storage provider factories.
pub mod providers;
/// Error type shared by the client and providers.
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub mod mock;
#[doc(hidden)]
pub mod prelude;
