//! Textract client module
//!
//! Wraps the AWS SDK client and exposes the text-detection calls docstash
//! uses, returning core [`DocumentAnalysis`] values.

mod credentials;
mod textract_config;

use std::future::Future;
use std::time::Duration;

use aws_sdk_textract::config::{BehaviorVersion, Region};
use aws_sdk_textract::types::{self, JobStatus};
use docstash_core::analysis::{DocumentAnalysis, DocumentLocation};
use docstash_core::block::Block;
use docstash_core::Error;
use tokio::time::Instant;

pub use credentials::TextractCredentials;
pub use textract_config::{DetectionMode, TextractConfig};

use crate::error::{Result, from_sdk};
use crate::{TRACING_TARGET_CLIENT, convert};

/// Client for AWS Textract text detection.
#[derive(Debug, Clone)]
pub struct TextractClient {
    inner: aws_sdk_textract::Client,
    config: TextractConfig,
}

impl TextractClient {
    /// Creates a client signing requests with `credentials`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` is invalid.
    pub async fn new(credentials: &TextractCredentials, config: TextractConfig) -> Result<Self> {
        config.validate()?;

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            region = %credentials.region,
            access_key = %credentials.access_key_masked(),
            mode = %config.mode,
            "creating Textract client"
        );

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(credentials.region.clone()))
            .credentials_provider(credentials.to_sdk())
            .load()
            .await;

        Ok(Self::from_sdk(aws_sdk_textract::Client::new(&sdk_config), config))
    }

    /// Wraps an already configured SDK client.
    pub fn from_sdk(inner: aws_sdk_textract::Client, config: TextractConfig) -> Self {
        Self { inner, config }
    }

    /// Returns the client configuration.
    #[inline]
    pub fn config(&self) -> &TextractConfig {
        &self.config
    }

    /// Detects text with a single synchronous `DetectDocumentText` call.
    pub async fn detect_text(&self, location: &DocumentLocation) -> Result<DocumentAnalysis> {
        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            document = %location,
            "calling DetectDocumentText"
        );

        let document = types::Document::builder()
            .s3_object(convert::s3_object(location))
            .build();
        let output = self
            .inner
            .detect_document_text()
            .document(document)
            .send()
            .await
            .map_err(|e| from_sdk("DetectDocumentText", e))?;

        let mut analysis = DocumentAnalysis::new(convert::blocks(output.blocks()));
        analysis.pages = convert::pages(output.document_metadata());
        Ok(analysis)
    }

    /// Starts an asynchronous text detection job and returns its id.
    pub async fn start_text_detection(&self, location: &DocumentLocation) -> Result<String> {
        let document_location = types::DocumentLocation::builder()
            .s3_object(convert::s3_object(location))
            .build();
        let output = self
            .inner
            .start_document_text_detection()
            .document_location(document_location)
            .send()
            .await
            .map_err(|e| from_sdk("StartDocumentTextDetection", e))?;

        let job_id = output.job_id().map(str::to_owned).ok_or_else(|| {
            Error::external_error().with_message("StartDocumentTextDetection returned no job id")
        })?;

        tracing::info!(
            target: TRACING_TARGET_CLIENT,
            document = %location,
            job_id = %job_id,
            "started text detection job"
        );
        Ok(job_id)
    }

    /// Polls `job_id` until it finishes and gathers every result page.
    pub async fn wait_for_text_detection(&self, job_id: &str) -> Result<DocumentAnalysis> {
        collect_job(
            job_id,
            self.config.poll_interval(),
            self.config.timeout(),
            |next_token| self.job_page(job_id, next_token),
        )
        .await
    }

    async fn job_page(&self, job_id: &str, next_token: Option<String>) -> Result<JobPage> {
        let output = self
            .inner
            .get_document_text_detection()
            .job_id(job_id)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| from_sdk("GetDocumentTextDetection", e))?;

        let state = match output.job_status() {
            Some(JobStatus::Succeeded) => JobState::Succeeded,
            Some(JobStatus::PartialSuccess) => JobState::PartialSuccess,
            Some(JobStatus::Failed) => JobState::Failed,
            _ => JobState::InProgress,
        };

        Ok(JobPage {
            state,
            status_message: output.status_message().map(str::to_owned),
            blocks: convert::blocks(output.blocks()),
            pages: convert::pages(output.document_metadata()),
            next_token: output.next_token().map(str::to_owned),
        })
    }
}

/// Status of an asynchronous detection job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum JobState {
    InProgress,
    Succeeded,
    PartialSuccess,
    Failed,
}

/// One `GetDocumentTextDetection` response.
#[derive(Debug, Clone)]
pub(crate) struct JobPage {
    pub state: JobState,
    pub status_message: Option<String>,
    pub blocks: Vec<Block>,
    pub pages: Option<u32>,
    pub next_token: Option<String>,
}

/// Polls `fetch` until the job leaves [`JobState::InProgress`], then follows
/// `next_token` to gather the remaining result pages.
///
/// A poll that would start after `timeout` has elapsed fails with a timeout
/// error instead. A `timeout` too large to form a deadline is a
/// configuration error.
pub(crate) async fn collect_job<F, Fut>(
    job_id: &str,
    poll_interval: Duration,
    timeout: Duration,
    mut fetch: F,
) -> Result<DocumentAnalysis>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<JobPage>>,
{
    let deadline = Instant::now().checked_add(timeout).ok_or_else(|| {
        Error::configuration().with_message(format!(
            "timeout of {}s for text detection job {job_id} is out of range",
            timeout.as_secs()
        ))
    })?;
    let mut polls = 0usize;

    let first = loop {
        let page = fetch(None).await?;
        polls += 1;

        match page.state {
            JobState::InProgress => {
                if Instant::now() + poll_interval > deadline {
                    return Err(Error::timeout().with_message(format!(
                        "text detection job {job_id} still running after {}s",
                        timeout.as_secs()
                    )));
                }
                tracing::debug!(target: TRACING_TARGET_CLIENT, job_id, polls, "job in progress");
                tokio::time::sleep(poll_interval).await;
            }
            JobState::Failed => {
                let reason = page.status_message.as_deref().unwrap_or("no status message");
                return Err(Error::external_error()
                    .with_message(format!("text detection job {job_id} failed: {reason}")));
            }
            JobState::Succeeded | JobState::PartialSuccess => break page,
        }
    };

    if first.state == JobState::PartialSuccess {
        tracing::warn!(
            target: TRACING_TARGET_CLIENT,
            job_id,
            status_message = first.status_message.as_deref().unwrap_or_default(),
            "text detection job partially succeeded"
        );
    }

    let mut blocks = first.blocks;
    let pages = first.pages;
    let mut next_token = first.next_token;
    let mut result_pages = 1usize;

    while let Some(token) = next_token {
        let page = fetch(Some(token)).await?;
        blocks.extend(page.blocks);
        next_token = page.next_token;
        result_pages += 1;
    }

    tracing::info!(
        target: TRACING_TARGET_CLIENT,
        job_id,
        polls,
        result_pages,
        blocks = blocks.len(),
        "text detection job finished"
    );

    let mut analysis = DocumentAnalysis::new(blocks).with_job_id(job_id);
    analysis.pages = pages;
    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use docstash_core::{ErrorKind, stitch};

    use super::*;

    fn page(state: JobState, blocks: Vec<Block>, next_token: Option<&str>) -> JobPage {
        JobPage {
            state,
            status_message: None,
            blocks,
            pages: Some(2),
            next_token: next_token.map(str::to_owned),
        }
    }

    /// Replays scripted pages and records the token of every request.
    fn scripted(
        pages: Vec<JobPage>,
    ) -> (
        impl FnMut(Option<String>) -> std::future::Ready<Result<JobPage>>,
        Arc<Mutex<Vec<Option<String>>>>,
    ) {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        let mut queue = VecDeque::from(pages);
        let fetch = move |token: Option<String>| {
            recorded.lock().unwrap().push(token);
            let next = queue
                .pop_front()
                .unwrap_or_else(|| page(JobState::InProgress, Vec::new(), None));
            std::future::ready(Ok(next))
        };
        (fetch, requests)
    }

    #[tokio::test(start_paused = true)]
    async fn polls_until_done_and_follows_tokens() {
        let (fetch, requests) = scripted(vec![
            page(JobState::InProgress, Vec::new(), None),
            page(JobState::InProgress, Vec::new(), None),
            page(
                JobState::Succeeded,
                vec![
                    Block::line("Page one").with_children(["w1", "w2"]),
                    Block::word("Page").with_id("w1"),
                    Block::word("one").with_id("w2"),
                ],
                Some("t1"),
            ),
            page(JobState::Succeeded, vec![Block::line("Page two")], None),
        ]);

        let analysis = collect_job("job-7", Duration::from_secs(1), Duration::from_secs(30), fetch)
            .await
            .unwrap();

        assert_eq!(stitch(&analysis.blocks), "Page one\nPage two");
        assert_eq!(analysis.job_id.as_deref(), Some("job-7"));
        assert_eq!(analysis.pages, Some(2));
        assert_eq!(
            *requests.lock().unwrap(),
            [None, None, None, Some("t1".to_owned())]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn failed_job_reports_status_message() {
        let mut failed = page(JobState::Failed, Vec::new(), None);
        failed.status_message = Some("unsupported document".to_owned());
        let (fetch, _) = scripted(vec![failed]);

        let error = collect_job("job-8", Duration::from_secs(1), Duration::from_secs(30), fetch)
            .await
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::ExternalError);
        assert!(error.to_string().contains("unsupported document"));
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_timeout() {
        let (fetch, requests) = scripted(Vec::new());

        let error = collect_job("job-9", Duration::from_secs(1), Duration::from_secs(3), fetch)
            .await
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Timeout);
        assert_eq!(requests.lock().unwrap().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn oversized_timeout_is_rejected() {
        let config = TextractConfig::default().with_timeout(Duration::from_secs(u64::MAX));
        assert!(config.validate().is_ok());

        let (fetch, requests) = scripted(Vec::new());
        let error = collect_job("job-11", config.poll_interval(), config.timeout(), fetch)
            .await
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Configuration);
        assert!(requests.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn partial_success_keeps_blocks() {
        let (fetch, _) = scripted(vec![page(
            JobState::PartialSuccess,
            vec![Block::word("salvaged")],
            None,
        )]);

        let analysis = collect_job("job-10", Duration::from_secs(1), Duration::from_secs(5), fetch)
            .await
            .unwrap();
        assert_eq!(analysis.text(), "salvaged");
    }

    #[tokio::test]
    async fn rejects_invalid_config() {
        let credentials = TextractCredentials::new("us-east-1", "AKIA1234", "secret");
        let config = TextractConfig::default().with_poll_interval(Duration::ZERO);

        let error = TextractClient::new(&credentials, config).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Configuration);
    }
}
