//! The default walkthrough: put, get, confirm, clear.

use std::io::Write;

use bytes::Bytes;
use docstash_object::prelude::{ClearReport, ObjectStoreClient};

use super::{Step, log_cleared, log_declined, step_failed};
use crate::TRACING_TARGET_COMMAND;
use crate::config::DemoArgs;
use crate::prompt::{Confirm, DELETE_QUESTION};

/// What a demo run achieved.
#[derive(Debug, Default)]
pub(crate) struct DemoReport {
    pub stored: bool,
    pub body: Option<String>,
    pub confirmed: bool,
    pub cleared: Option<ClearReport>,
}

/// Runs every demo step in order.
///
/// A failing step is logged and the next one still runs. Only a failure to
/// write to `out` ends the run early.
pub(crate) async fn run_demo(
    store: &ObjectStoreClient,
    args: &DemoArgs,
    confirm: &mut dyn Confirm,
    out: &mut impl Write,
) -> anyhow::Result<DemoReport> {
    let mut report = DemoReport::default();

    let body = Bytes::from(args.body.clone());
    match store.put(&args.key, body, Some(&args.content_type)).await {
        Ok(output) => {
            report.stored = true;
            tracing::info!(
                target: TRACING_TARGET_COMMAND,
                step = %Step::PutObject,
                key = %args.key,
                e_tag = ?output.e_tag,
                "object sent"
            );
        }
        Err(error) => step_failed(Step::PutObject, &error),
    }

    match store.get(&args.key).await {
        Ok(output) => {
            let body = output.text().into_owned();
            tracing::info!(
                target: TRACING_TARGET_COMMAND,
                step = %Step::GetObject,
                key = %args.key,
                content_type = ?output.content_type,
                size = output.meta.size,
                "object read"
            );
            writeln!(out, "{body}")?;
            report.body = Some(body);
        }
        Err(error) => step_failed(Step::GetObject, &error),
    }

    report.confirmed = match confirm.confirm(DELETE_QUESTION).await {
        Ok(confirmed) => confirmed,
        Err(error) => {
            step_failed(Step::Confirm, &error);
            false
        }
    };

    if !report.confirmed {
        log_declined();
        return Ok(report);
    }

    match store.clear(&args.page.prefix, args.page.page_size).await {
        Ok(cleared) => {
            log_cleared(&cleared);
            report.cleared = Some(cleared);
        }
        Err(error) => step_failed(Step::ClearBucket, &error),
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use docstash_object::mock::{FailingStore, Operation};

    use super::*;
    use crate::command::testing::{keys, memory_store, seed};
    use crate::prompt::{AssumeYes, ScriptedPrompt};

    #[tokio::test]
    async fn confirmed_run_empties_bucket() {
        let store = memory_store();
        seed(&store, &["old/a.txt", "old/b.txt"]).await;
        let mut prompt = ScriptedPrompt::new(["y"]);
        let mut out = Vec::new();

        let report = run_demo(&store, &DemoArgs::default(), &mut prompt, &mut out)
            .await
            .unwrap();

        assert!(report.stored);
        assert!(report.confirmed);
        assert_eq!(report.body.as_deref(), Some("Hello, this is a test object."));
        assert_eq!(String::from_utf8(out).unwrap(), "Hello, this is a test object.\n");
        assert_eq!(prompt.asked, [DELETE_QUESTION]);

        let cleared = report.cleared.unwrap();
        assert_eq!(cleared.deleted, 3);
        assert!(cleared.is_complete());
        assert!(keys(&store).await.is_empty());
    }

    #[tokio::test]
    async fn declined_run_keeps_objects() {
        let store = memory_store();
        let mut prompt = ScriptedPrompt::new(["n"]);
        let mut out = Vec::new();

        let report = run_demo(&store, &DemoArgs::default(), &mut prompt, &mut out)
            .await
            .unwrap();

        assert!(!report.confirmed);
        assert!(report.cleared.is_none());
        assert_eq!(keys(&store).await, ["test_key.txt"]);
        let stored = store.get("test_key.txt").await.unwrap();
        assert_eq!(stored.content_type.as_deref(), Some("text/plain"));
    }

    #[tokio::test]
    async fn uppercase_answer_with_whitespace_confirms() {
        let store = memory_store();
        let mut prompt = ScriptedPrompt::new([" Y \n"]);

        let report = run_demo(&store, &DemoArgs::default(), &mut prompt, &mut std::io::sink())
            .await
            .unwrap();
        assert!(report.confirmed);
        assert!(keys(&store).await.is_empty());
    }

    #[tokio::test]
    async fn unreadable_answer_deletes_nothing() {
        let store = memory_store();
        let mut prompt = ScriptedPrompt::new([]);

        let report = run_demo(&store, &DemoArgs::default(), &mut prompt, &mut std::io::sink())
            .await
            .unwrap();

        assert!(report.stored);
        assert!(!report.confirmed);
        assert_eq!(keys(&store).await, ["test_key.txt"]);
    }

    #[tokio::test]
    async fn failed_upload_still_runs_later_steps() {
        let store = FailingStore::new()
            .fail(Operation::Put, "test_key.txt")
            .into_client();
        seed(&store, &["old/a.txt", "old/b.txt"]).await;
        let mut prompt = ScriptedPrompt::new(["y"]);
        let mut out = Vec::new();

        let report = run_demo(&store, &DemoArgs::default(), &mut prompt, &mut out)
            .await
            .unwrap();

        assert!(!report.stored);
        assert!(report.body.is_none());
        assert!(out.is_empty());
        assert_eq!(prompt.asked, [DELETE_QUESTION]);
        assert_eq!(report.cleared.map(|c| c.deleted), Some(2));
        assert!(keys(&store).await.is_empty());
    }

    #[tokio::test]
    async fn failed_delete_is_counted_not_fatal() {
        let store = FailingStore::new()
            .fail(Operation::Delete, "test_key.txt")
            .into_client();
        seed(&store, &["old/a.txt"]).await;

        let report = run_demo(&store, &DemoArgs::default(), &mut AssumeYes, &mut std::io::sink())
            .await
            .unwrap();

        let cleared = report.cleared.unwrap();
        assert_eq!((cleared.deleted, cleared.failed), (1, 1));
        assert_eq!(keys(&store).await, ["test_key.txt"]);
    }

    #[tokio::test]
    async fn custom_object_and_prefix() {
        let store = memory_store();
        seed(&store, &["keep/me.txt"]).await;
        let mut args = DemoArgs::default();
        args.key = "scratch/note.txt".to_owned();
        args.body = "scratch body".to_owned();
        args.page.prefix = "scratch/".to_owned();
        let mut out = Vec::new();

        let report = run_demo(&store, &args, &mut AssumeYes, &mut out).await.unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "scratch body\n");
        assert_eq!(report.cleared.map(|c| c.deleted), Some(1));
        assert_eq!(keys(&store).await, ["keep/me.txt"]);
    }
}
