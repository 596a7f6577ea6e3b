//! Convenience re-exports.

pub use crate::analysis::{DocumentAnalysis, DocumentAnalyzer, DocumentLocation};
pub use crate::block::{Block, BlockKind, Relationship, RelationshipKind};
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::stitch::{stitch, stitch_optional};
