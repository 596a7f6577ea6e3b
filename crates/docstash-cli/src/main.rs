#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod command;
mod config;
mod prompt;
mod telemetry;

use std::process;

use anyhow::Context;
use docstash_object::prelude::{Client, ObjectStoreClient, S3Provider};

use crate::config::{AwsConfig, Cli};

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "docstash_cli::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "docstash_cli::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "docstash_cli::config";
pub const TRACING_TARGET_COMMAND: &str = "docstash_cli::command";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::debug!(
            target: TRACING_TARGET_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %format!("{error:#}"),
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    telemetry::init_tracing()?;
    cli.log();
    cli.validate()?;

    let store = connect_store(&cli.aws).await?;
    let command = cli.command.unwrap_or_default();

    command::run(command, &cli.aws, &store).await
}

/// Builds the bucket client and probes it once.
///
/// An unreachable bucket is only reported here; the commands surface the
/// actual failures.
async fn connect_store(aws: &AwsConfig) -> anyhow::Result<ObjectStoreClient> {
    let provider = S3Provider::connect(&aws.s3_credentials())
        .await
        .context("failed to create object store client")?;
    let store = provider.into_inner();

    if let Err(error) = store.verify_reachable().await {
        tracing::warn!(
            target: TRACING_TARGET_STARTUP,
            bucket = %aws.bucket,
            error = %error,
            "bucket did not answer the reachability probe"
        );
    }

    Ok(store)
}
