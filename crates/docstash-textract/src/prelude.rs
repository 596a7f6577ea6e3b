//! Prelude for the docstash-textract crate
//!
//! Re-exports the types needed to build and use a Textract analyzer.

pub use crate::client::{DetectionMode, TextractClient, TextractConfig, TextractCredentials};
pub use crate::provider::TextractAnalyzer;
