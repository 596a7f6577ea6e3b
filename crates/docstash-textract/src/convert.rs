//! Conversions between Textract SDK shapes and core types.

use aws_sdk_textract::types;
use docstash_core::analysis::DocumentLocation;
use docstash_core::block::{Block, BlockKind, Relationship, RelationshipKind};

/// Converts one SDK block, keeping unknown tags verbatim.
pub(crate) fn block(source: &types::Block) -> Block {
    Block {
        kind: source
            .block_type()
            .map(|kind| BlockKind::from(kind.as_str()))
            .unwrap_or_default(),
        text: source.text().map(str::to_owned),
        id: source.id().map(str::to_owned),
        relationships: source.relationships().iter().map(relationship).collect(),
    }
}

/// Converts a slice of SDK blocks, preserving order.
pub(crate) fn blocks(source: &[types::Block]) -> Vec<Block> {
    source.iter().map(block).collect()
}

fn relationship(source: &types::Relationship) -> Relationship {
    let kind = source
        .r#type()
        .map(|kind| RelationshipKind::from(kind.as_str()))
        .unwrap_or_default();
    Relationship::new(kind, source.ids().iter().cloned())
}

/// Builds the SDK object reference for a stored document.
pub(crate) fn s3_object(location: &DocumentLocation) -> types::S3Object {
    types::S3Object::builder()
        .bucket(&location.bucket)
        .name(&location.key)
        .set_version(location.version.clone())
        .build()
}

/// Reads the page count from SDK document metadata.
pub(crate) fn pages(metadata: Option<&types::DocumentMetadata>) -> Option<u32> {
    metadata
        .and_then(types::DocumentMetadata::pages)
        .and_then(|pages| u32::try_from(pages).ok())
}
