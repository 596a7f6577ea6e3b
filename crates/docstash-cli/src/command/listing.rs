//! `list` and `clear`: page-by-page walks over the bucket.

use std::io::Write;

use anyhow::{Context, bail};
use docstash_object::prelude::{ClearReport, ObjectStoreClient};
use futures::TryStreamExt;

use super::{Step, log_cleared, log_declined};
use crate::TRACING_TARGET_COMMAND;
use crate::config::PageArgs;
use crate::prompt::{Confirm, DELETE_QUESTION};

/// Prints every listing page and returns the number of objects seen.
pub(crate) async fn run_list(
    store: &ObjectStoreClient,
    args: &PageArgs,
    out: &mut impl Write,
) -> anyhow::Result<usize> {
    let mut pages = store.list_pages(&args.prefix, args.page_size);
    let mut total = 0;

    while let Some(page) = pages.try_next().await.context("failed to list objects")? {
        writeln!(
            out,
            "page {}: {} objects, {} bytes",
            page.index + 1,
            page.objects.len(),
            page.total_size()
        )?;
        for meta in &page.objects {
            writeln!(out, "  {}\t{}", meta.location, meta.size)?;
        }
        total += page.objects.len();
    }

    tracing::info!(
        target: TRACING_TARGET_COMMAND,
        step = %Step::ListObjects,
        prefix = %args.prefix,
        objects = total,
        "listing finished"
    );
    Ok(total)
}

/// Deletes everything under the prefix once confirmed.
///
/// Returns `None` when the user declines.
///
/// # Errors
///
/// Fails if the answer cannot be read, the listing breaks off, or any
/// object could not be deleted.
pub(crate) async fn run_clear(
    store: &ObjectStoreClient,
    args: &PageArgs,
    confirm: &mut dyn Confirm,
) -> anyhow::Result<Option<ClearReport>> {
    let confirmed = confirm
        .confirm(DELETE_QUESTION)
        .await
        .context("failed to read confirmation")?;
    if !confirmed {
        log_declined();
        return Ok(None);
    }

    let report = store
        .clear(&args.prefix, args.page_size)
        .await
        .context("failed to list objects")?;
    log_cleared(&report);

    if !report.is_complete() {
        bail!(
            "{} of {} objects could not be deleted",
            report.failed,
            report.deleted + report.failed
        );
    }

    Ok(Some(report))
}

#[cfg(test)]
mod tests {
    use docstash_object::mock::{FailingStore, Operation};

    use super::*;
    use crate::command::testing::{keys, memory_store, seed};
    use crate::prompt::{AssumeYes, ScriptedPrompt};

    fn pages(size: usize) -> PageArgs {
        PageArgs {
            prefix: String::new(),
            page_size: size,
        }
    }

    #[tokio::test]
    async fn list_prints_each_page() {
        let store = memory_store();
        seed(&store, &["a.txt", "b.txt", "c.txt"]).await;
        let mut out = Vec::new();

        let total = run_list(&store, &pages(2), &mut out).await.unwrap();
        let printed = String::from_utf8(out).unwrap();

        assert_eq!(total, 3);
        assert!(printed.contains("page 1: 2 objects"));
        assert!(printed.contains("page 2: 1 objects"));
        for key in ["a.txt", "b.txt", "c.txt"] {
            assert!(printed.contains(key), "{key} missing from {printed}");
        }
    }

    #[tokio::test]
    async fn list_empty_bucket_prints_nothing() {
        let store = memory_store();
        let mut out = Vec::new();

        assert_eq!(run_list(&store, &pages(10), &mut out).await.unwrap(), 0);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn clear_requires_confirmation() {
        let store = memory_store();
        seed(&store, &["a.txt"]).await;

        let mut prompt = ScriptedPrompt::new(["no"]);
        let report = run_clear(&store, &pages(10), &mut prompt).await.unwrap();
        assert!(report.is_none());
        assert_eq!(keys(&store).await, ["a.txt"]);
    }

    #[tokio::test]
    async fn clear_walks_every_page() {
        let store = memory_store();
        seed(&store, &["a.txt", "b.txt", "c.txt", "d.txt", "e.txt"]).await;

        let report = run_clear(&store, &pages(2), &mut AssumeYes)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(report.pages, 3);
        assert_eq!(report.deleted, 5);
        assert!(keys(&store).await.is_empty());
    }

    #[tokio::test]
    async fn clear_reports_failed_deletes() {
        let store = FailingStore::new()
            .fail(Operation::Delete, "b.txt")
            .into_client();
        seed(&store, &["a.txt", "b.txt", "c.txt"]).await;

        let error = run_clear(&store, &pages(2), &mut AssumeYes)
            .await
            .unwrap_err();

        assert_eq!(error.to_string(), "1 of 3 objects could not be deleted");
        assert_eq!(keys(&store).await, ["b.txt"]);
    }

    #[tokio::test]
    async fn clear_fails_when_answer_is_unreadable() {
        let store = memory_store();
        let mut prompt = ScriptedPrompt::new([]);
        assert!(run_clear(&store, &pages(10), &mut prompt).await.is_err());
    }
}
