//! `ocr`: upload a local document, detect its text and print it.

use std::io::Write;

use anyhow::Context;
use bytes::Bytes;
use docstash_core::analysis::{DocumentAnalysis, DocumentAnalyzer, DocumentLocation};
use docstash_object::prelude::ObjectStoreClient;

use super::Step;
use crate::TRACING_TARGET_COMMAND;
use crate::config::OcrArgs;

/// Uploads `args.file` to `bucket`, analyzes it and prints the stitched text.
pub(crate) async fn run_ocr(
    store: &ObjectStoreClient,
    analyzer: &dyn DocumentAnalyzer,
    bucket: &str,
    args: &OcrArgs,
    out: &mut impl Write,
) -> anyhow::Result<DocumentAnalysis> {
    let key = args.object_key()?;
    let content_type = args.content_type();

    let data = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    tracing::debug!(
        target: TRACING_TARGET_COMMAND,
        step = %Step::ReadFile,
        file = %args.file.display(),
        size = data.len(),
        "document read"
    );

    let uploaded = store
        .put(&key, Bytes::from(data), Some(&content_type))
        .await
        .with_context(|| format!("failed to upload document to {key}"))?;
    tracing::info!(
        target: TRACING_TARGET_COMMAND,
        step = %Step::UploadDocument,
        key = %key,
        content_type = %content_type,
        version = ?uploaded.version,
        "document uploaded"
    );

    let mut location = DocumentLocation::new(bucket, key);
    if let Some(version) = uploaded.version {
        location = location.with_version(version);
    }

    let analysis = analyzer
        .analyze(&location)
        .await
        .with_context(|| format!("text detection failed for {location}"))?;
    tracing::info!(
        target: TRACING_TARGET_COMMAND,
        step = %Step::AnalyzeDocument,
        provider = analyzer.id(),
        document = %location,
        blocks = analysis.blocks.len(),
        "document analyzed"
    );

    writeln!(out, "{}", analysis.text())?;
    Ok(analysis)
}
