//! Textract client configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::{Args, ValueEnum};
use docstash_core::Error;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use crate::error::Result;

/// Which Textract API family runs text detection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display)]
#[cfg_attr(feature = "config", derive(ValueEnum))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DetectionMode {
    /// One `DetectDocumentText` call (images, single-page PDFs).
    #[default]
    Sync,
    /// A `StartDocumentTextDetection` job polled to completion (multi-page PDFs).
    Async,
}

/// Configuration for the Textract client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct TextractConfig {
    /// Detection API to use.
    #[cfg_attr(
        feature = "config",
        arg(long = "mode", env = "TEXTRACT_MODE", value_enum, default_value_t = DetectionMode::Sync)
    )]
    #[serde(default)]
    pub mode: DetectionMode,

    /// Delay between job status polls in async mode, in milliseconds.
    #[cfg_attr(
        feature = "config",
        arg(long = "poll-interval-ms", env = "TEXTRACT_POLL_INTERVAL_MS", default_value_t = 2000)
    )]
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Upper bound on waiting for an async job, in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long = "timeout-secs", env = "TEXTRACT_TIMEOUT_SECS", default_value_t = 300)
    )]
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_poll_interval_ms() -> u64 {
    2000
}

const fn default_timeout_secs() -> u64 {
    300
}

impl Default for TextractConfig {
    fn default() -> Self {
        Self {
            mode: DetectionMode::default(),
            poll_interval_ms: default_poll_interval_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl TextractConfig {
    /// Sets the detection mode.
    #[must_use]
    pub fn with_mode(mut self, mode: DetectionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the polling interval.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Sets the async job timeout, rounded up to whole seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let partial = u64::from(timeout.subsec_nanos() > 0);
        self.timeout_secs = timeout.as_secs().saturating_add(partial);
        self
    }

    /// Delay between job status polls.
    #[inline]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Upper bound on waiting for an async job.
    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            return Err(Error::configuration().with_message("poll interval must be positive"));
        }

        if self.timeout() < self.poll_interval() {
            return Err(Error::configuration().with_message(format!(
                "timeout of {}s is shorter than the poll interval of {}ms",
                self.timeout_secs, self.poll_interval_ms
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = TextractConfig::default();
        assert_eq!(config.mode, DetectionMode::Sync);
        assert_eq!(config.poll_interval(), Duration::from_secs(2));
        assert_eq!(config.timeout(), Duration::from_secs(300));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_intervals() {
        let zero = TextractConfig::default().with_poll_interval(Duration::ZERO);
        assert!(zero.validate().is_err());

        let short = TextractConfig::default()
            .with_poll_interval(Duration::from_secs(10))
            .with_timeout(Duration::from_secs(5));
        assert!(short.validate().is_err());
    }

    #[test]
    fn timeout_rounds_up_to_whole_seconds() {
        let config = TextractConfig::default()
            .with_poll_interval(Duration::from_millis(100))
            .with_timeout(Duration::from_millis(500));
        assert_eq!(config.timeout_secs, 1);
        assert!(config.validate().is_ok());

        let exact = TextractConfig::default().with_timeout(Duration::from_secs(30));
        assert_eq!(exact.timeout_secs, 30);
    }

    #[test]
    fn mode_names() {
        assert_eq!(DetectionMode::Async.to_string(), "async");
        assert_eq!(DetectionMode::Sync.as_ref(), "sync");
    }
}
