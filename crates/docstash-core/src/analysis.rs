//! Document-analysis abstractions.
//!
//! Providers implement [`DocumentAnalyzer`] to run OCR over a document that
//! already lives in object storage, returning the raw block list as a
//! [`DocumentAnalysis`]. Text reconstruction is left to [`stitch`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::block::Block;
use crate::{Result, TRACING_TARGET_ANALYSIS, stitch};

/// Reference to a document stored in an object-store bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLocation {
    /// Bucket holding the document.
    pub bucket: String,
    /// Object key of the document.
    pub key: String,
    /// Specific object version, when the bucket is versioned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl DocumentLocation {
    /// Creates a location for the latest version of `key` in `bucket`.
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
            version: None,
        }
    }

    /// Pins the location to one object version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

impl fmt::Display for DocumentLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

/// Blocks detected in one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    /// Every block returned by the provider, in response order.
    #[serde(default)]
    pub blocks: Vec<Block>,
    /// Number of pages the provider processed, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
    /// Provider job id for asynchronous analyses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
}

impl DocumentAnalysis {
    /// Wraps a block list.
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            ..Self::default()
        }
    }

    /// Sets the page count.
    #[must_use]
    pub fn with_pages(mut self, pages: u32) -> Self {
        self.pages = Some(pages);
        self
    }

    /// Sets the provider job id.
    #[must_use]
    pub fn with_job_id(mut self, job_id: impl Into<String>) -> Self {
        self.job_id = Some(job_id.into());
        self
    }

    /// Number of `LINE` blocks.
    pub fn line_count(&self) -> usize {
        self.blocks.iter().filter(|block| block.is_line()).count()
    }

    /// Number of `WORD` blocks.
    pub fn word_count(&self) -> usize {
        self.blocks.iter().filter(|block| block.is_word()).count()
    }

    /// Stitches the blocks into readable text.
    pub fn text(&self) -> String {
        let text = stitch(&self.blocks);
        tracing::trace!(
            target: TRACING_TARGET_ANALYSIS,
            blocks = self.blocks.len(),
            lines = self.line_count(),
            words = self.word_count(),
            chars = text.chars().count(),
            "stitched document text"
        );
        text
    }
}

/// A service that detects text in stored documents.
#[async_trait::async_trait]
pub trait DocumentAnalyzer: Send + Sync {
    /// Short provider identifier used in logs (e.g. `"textract"`).
    fn id(&self) -> &'static str;

    /// Runs text detection over the document at `location`.
    async fn analyze(&self, location: &DocumentLocation) -> Result<DocumentAnalysis>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    struct FixedAnalyzer(Vec<Block>);

    #[async_trait::async_trait]
    impl DocumentAnalyzer for FixedAnalyzer {
        fn id(&self) -> &'static str {
            "fixed"
        }

        async fn analyze(&self, location: &DocumentLocation) -> Result<DocumentAnalysis> {
            if location.key.is_empty() {
                return Err(Error::invalid_input().with_message("empty key"));
            }
            Ok(DocumentAnalysis::new(self.0.clone()).with_pages(1))
        }
    }

    #[test]
    fn location_display() {
        let location = DocumentLocation::new("docs", "scans/invoice.pdf").with_version("v2");
        assert_eq!(location.to_string(), "s3://docs/scans/invoice.pdf");
        assert_eq!(location.version.as_deref(), Some("v2"));
    }

    #[test]
    fn counts_and_text() {
        let analysis = DocumentAnalysis::new(vec![
            Block::line("Invoice 42").with_children(["w1", "w2"]),
            Block::word("Invoice").with_id("w1"),
            Block::word("42").with_id("w2"),
            Block::word("PAID").with_id("w3"),
        ])
        .with_job_id("job-1");

        assert_eq!(analysis.line_count(), 1);
        assert_eq!(analysis.word_count(), 3);
        assert_eq!(analysis.text(), "Invoice 42\nPAID");
        assert_eq!(analysis.job_id.as_deref(), Some("job-1"));
    }

    #[tokio::test]
    async fn analyzer_is_object_safe() {
        let analyzer: Box<dyn DocumentAnalyzer> = Box::new(FixedAnalyzer(vec![Block::line("ok")]));

        let analysis = analyzer
            .analyze(&DocumentLocation::new("docs", "a.pdf"))
            .await
            .unwrap();
        assert_eq!(analysis.text(), "ok");
        assert_eq!(analysis.pages, Some(1));

        let error = analyzer
            .analyze(&DocumentLocation::new("docs", ""))
            .await
            .unwrap_err();
        assert_eq!(error.kind(), crate::ErrorKind::InvalidInput);
        assert_eq!(analyzer.id(), "fixed");
    }
}
