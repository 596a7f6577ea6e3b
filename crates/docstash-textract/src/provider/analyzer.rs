//! Textract implementation of [`DocumentAnalyzer`].

use std::time::Instant;

use docstash_core::Result;
use docstash_core::analysis::{DocumentAnalysis, DocumentAnalyzer, DocumentLocation};

use crate::client::{DetectionMode, TextractClient};
use crate::TRACING_TARGET_PROVIDER;

/// Textract document analyzer.
///
/// Runs `DetectDocumentText` or an asynchronous detection job, depending on
/// the client's [`DetectionMode`].
///
/// # Example
///
/// ```rust,ignore
/// use docstash_textract::{TextractAnalyzer, TextractClient, TextractConfig, TextractCredentials};
///
/// let credentials = TextractCredentials::new("us-east-1", "AKIA...", "secret");
/// let client = TextractClient::new(&credentials, TextractConfig::default()).await?;
/// let analyzer = TextractAnalyzer::new(client);
/// ```
#[derive(Clone, Debug)]
pub struct TextractAnalyzer {
    client: TextractClient,
}

impl TextractAnalyzer {
    /// Provider identifier used in logs.
    pub const ID: &'static str = "textract";

    /// Creates a new analyzer.
    pub fn new(client: TextractClient) -> Self {
        Self { client }
    }

    /// Returns a reference to the underlying client.
    pub fn client(&self) -> &TextractClient {
        &self.client
    }
}

#[async_trait::async_trait]
impl DocumentAnalyzer for TextractAnalyzer {
    fn id(&self) -> &'static str {
        Self::ID
    }

    async fn analyze(&self, location: &DocumentLocation) -> Result<DocumentAnalysis> {
        let mode = self.client.config().mode;
        let started = Instant::now();

        tracing::info!(
            target: TRACING_TARGET_PROVIDER,
            document = %location,
            mode = %mode,
            "analyzing document"
        );

        let analysis = match mode {
            DetectionMode::Sync => self.client.detect_text(location).await,
            DetectionMode::Async => {
                let job_id = self.client.start_text_detection(location).await?;
                self.client.wait_for_text_detection(&job_id).await
            }
        };

        match &analysis {
            Ok(analysis) => tracing::info!(
                target: TRACING_TARGET_PROVIDER,
                document = %location,
                pages = ?analysis.pages,
                lines = analysis.line_count(),
                words = analysis.word_count(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "document analyzed"
            ),
            Err(error) => tracing::warn!(
                target: TRACING_TARGET_PROVIDER,
                document = %location,
                error = %error,
                retryable = error.is_retryable(),
                "document analysis failed"
            ),
        }

        analysis
    }
}
