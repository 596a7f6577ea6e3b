//! Command execution.
//!
//! Each command writes its results to the given writer and logs progress
//! with [`TRACING_TARGET_COMMAND`].

mod demo;
mod listing;
mod ocr;

use std::io;

use anyhow::Context;
use docstash_object::prelude::{ClearReport, ObjectStoreClient};
use docstash_textract::{TextractAnalyzer, TextractClient};
use strum::{AsRefStr, Display};

use crate::config::{AwsConfig, Command};
use crate::{TRACING_TARGET_COMMAND, prompt};

/// Named step of a command, recorded on every log line it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Step {
    PutObject,
    GetObject,
    Confirm,
    ClearBucket,
    ListObjects,
    ReadFile,
    UploadDocument,
    AnalyzeDocument,
}

/// Runs `command` against `store`, printing results to stdout.
pub async fn run(command: Command, aws: &AwsConfig, store: &ObjectStoreClient) -> anyhow::Result<()> {
    let mut stdout = io::stdout();

    match command {
        Command::Demo(args) => {
            let mut confirm = prompt::for_flag(args.yes);
            demo::run_demo(store, &args, confirm.as_mut(), &mut stdout).await?;
        }
        Command::Ocr(args) => {
            let client = TextractClient::new(&aws.textract_credentials(), args.textract.clone())
                .await
                .context("failed to create Textract client")?;
            let analyzer = TextractAnalyzer::new(client);
            ocr::run_ocr(store, &analyzer, &aws.bucket, &args, &mut stdout).await?;
        }
        Command::List(args) => {
            listing::run_list(store, &args, &mut stdout).await?;
        }
        Command::Clear(args) => {
            let mut confirm = prompt::for_flag(args.yes);
            listing::run_clear(store, &args.page, confirm.as_mut()).await?;
        }
    }

    Ok(())
}

/// Logs a failed step. The caller decides whether to go on.
fn step_failed(step: Step, error: &dyn std::error::Error) {
    tracing::error!(
        target: TRACING_TARGET_COMMAND,
        step = %step,
        error = %error,
        "step failed"
    );
}

fn log_declined() {
    tracing::info!(
        target: TRACING_TARGET_COMMAND,
        step = %Step::Confirm,
        "No objects will be deleted."
    );
}

fn log_cleared(report: &ClearReport) {
    if report.is_complete() {
        tracing::info!(
            target: TRACING_TARGET_COMMAND,
            step = %Step::ClearBucket,
            pages = report.pages,
            deleted = report.deleted,
            "bucket cleared"
        );
    } else {
        tracing::warn!(
            target: TRACING_TARGET_COMMAND,
            step = %Step::ClearBucket,
            pages = report.pages,
            deleted = report.deleted,
            failed = report.failed,
            "bucket partially cleared"
        );
    }
}
