//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── aws: AwsConfig        # Region, key pair, bucket, endpoint
//! └── command: Command      # demo (default), ocr, list, clear
//! ```
//!
//! Every AWS value can come from a flag, the environment, or a `.env` file.
//!
//! ```bash
//! docstash --region us-east-1 --bucket my-bucket ocr scan.pdf
//!
//! AWS_REGION=us-east-1 AWS_S3_BUCKET=my-bucket docstash list
//! ```

mod aws;
mod command;

use std::process;

use anyhow::Context;
use clap::Parser;
use serde::{Deserialize, Serialize};

pub use self::aws::AwsConfig;
pub use self::command::{ClearArgs, Command, DemoArgs, OcrArgs, PageArgs};
use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "docstash")]
#[command(about = "Object storage walkthrough and document OCR on AWS")]
#[command(version)]
pub struct Cli {
    /// AWS region, credentials and target bucket.
    #[clap(flatten)]
    pub aws: AwsConfig,

    /// Command to run. Defaults to `demo`.
    #[command(subcommand)]
    #[serde(default)]
    pub command: Option<Command>,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is read before clap parses arguments, so its values act
    /// as environment defaults.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Logs build information at debug level.
    fn log_build_info() {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.aws.validate().context("invalid AWS configuration")?;

        if let Some(Command::Ocr(args)) = &self.command {
            args.textract
                .validate()
                .context("invalid Textract configuration")?;
        }

        Ok(())
    }

    /// Logs configuration (no sensitive information).
    pub fn log(&self) {
        Self::log_build_info();
        self.aws.log();

        let command = self.command.as_ref().map_or("demo", Command::name);
        tracing::debug!(target: TRACING_TARGET_CONFIG, command, "Selected command");
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
