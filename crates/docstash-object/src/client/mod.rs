//! Object-store client backed by [`object_store::ObjectStore`].
//!
//! [`ObjectStoreClient`] is a thin, cloneable wrapper around
//! `Arc<dyn ObjectStore>` exposing the operations docstash needs. Every
//! public method is instrumented with [`tracing`].

use std::sync::Arc;

use bytes::Bytes;
use futures::stream::{BoxStream, TryChunksError};
use futures::{StreamExt, TryStreamExt};
use object_store::path::Path;
use object_store::{Attribute, ObjectMeta, ObjectStore, PutOptions, PutPayload};

use crate::TRACING_TARGET_CLIENT;
use crate::types::Error;

mod get_output;
mod list_page;
mod put_output;

pub use get_output::GetOutput;
pub use list_page::{ClearReport, ListPage};
pub use put_output::PutOutput;

/// Cloneable handle to any [`ObjectStore`] backend.
///
/// All methods accept human-readable string keys and convert them to
/// [`object_store::path::Path`] internally.
#[derive(Clone, Debug)]
pub struct ObjectStoreClient(pub Arc<dyn ObjectStore>);

impl ObjectStoreClient {
    /// Wrap a concrete [`ObjectStore`] implementation.
    pub fn new(store: impl ObjectStore) -> Self {
        Self(Arc::new(store))
    }

    /// Verify that the backing store is reachable.
    ///
    /// Issues a HEAD for a probe key. A not-found response means the bucket
    /// answered, so it counts as success.
    #[tracing::instrument(name = "object.verify", skip(self))]
    pub async fn verify_reachable(&self) -> Result<(), Error> {
        let path = Path::from("_docstash_verify_probe");
        match self.0.head(&path).await {
            Ok(_) | Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// List every object under `prefix` into a single `Vec`.
    #[tracing::instrument(name = "object.list", skip(self))]
    pub async fn list(&self, prefix: &str) -> Result<Vec<ObjectMeta>, Error> {
        self.list_stream(prefix).try_collect().await
    }

    /// Lazily stream object metadata under `prefix`.
    pub fn list_stream(&self, prefix: &str) -> BoxStream<'static, Result<ObjectMeta, Error>> {
        let prefix = (!prefix.is_empty()).then(|| Path::from(prefix));
        self.0.list(prefix.as_ref()).map_err(Error::from).boxed()
    }

    /// Stream the listing under `prefix` as pages of up to `page_size`
    /// objects.
    ///
    /// `page_size` is clamped into `1..=`[`ListPage::MAX_SIZE`]. A listing
    /// error ends the stream after yielding it.
    pub fn list_pages(
        &self,
        prefix: &str,
        page_size: usize,
    ) -> BoxStream<'static, Result<ListPage, Error>> {
        let page_size = ListPage::clamp_size(page_size);
        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            prefix,
            page_size,
            "listing objects page by page"
        );

        self.list_stream(prefix)
            .try_chunks(page_size)
            .map_err(|TryChunksError(_, err)| err)
            .enumerate()
            .map(|(index, page)| page.map(|objects| ListPage { index, objects }))
            .boxed()
    }

    /// Retrieve the raw bytes, content-type, and metadata stored at `key`.
    #[tracing::instrument(name = "object.get", skip(self))]
    pub async fn get(&self, key: &str) -> Result<GetOutput, Error> {
        let path = Path::from(key);
        let result = self.0.get(&path).await?;
        let meta = result.meta.clone();
        let content_type = result
            .attributes
            .get(&Attribute::ContentType)
            .map(|v| v.to_string());
        let data = result.bytes().await?;
        Ok(GetOutput {
            data,
            content_type,
            meta,
        })
    }

    /// Upload `data` to `key`, overwriting any existing object.
    #[tracing::instrument(name = "object.put", skip(self, data), fields(size = data.len()))]
    pub async fn put(
        &self,
        key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<PutOutput, Error> {
        let path = Path::from(key);
        let payload = PutPayload::from(data);
        let mut opts = PutOptions::default();
        if let Some(ct) = content_type {
            opts.attributes
                .insert(Attribute::ContentType, ct.to_string().into());
        }
        let result = self.0.put_opts(&path, payload, opts).await?;
        Ok(result.into())
    }

    /// Delete the object at `key`.
    #[tracing::instrument(name = "object.delete", skip(self))]
    pub async fn delete(&self, key: &str) -> Result<(), Error> {
        let path = Path::from(key);
        self.0.delete(&path).await.map_err(Error::from)
    }

    /// Walk the listing under `prefix` page by page, deleting every object.
    ///
    /// A failed delete is logged and counted in [`ClearReport::failed`];
    /// the walk continues with the next object. A failed page fetch stops
    /// the walk and is returned.
    #[tracing::instrument(name = "object.clear", skip(self))]
    pub async fn clear(&self, prefix: &str, page_size: usize) -> Result<ClearReport, Error> {
        let mut report = ClearReport::default();
        let mut pages = self.list_pages(prefix, page_size);

        while let Some(page) = pages.try_next().await? {
            report.pages += 1;
            tracing::info!(
                target: TRACING_TARGET_CLIENT,
                page = page.index,
                objects = page.objects.len(),
                bytes = page.total_size(),
                "listed page"
            );

            for key in page.keys() {
                match self.delete(key).await {
                    Ok(()) => {
                        report.deleted += 1;
                        tracing::debug!(target: TRACING_TARGET_CLIENT, key, "deleted object");
                    }
                    Err(error) => {
                        report.failed += 1;
                        tracing::error!(
                            target: TRACING_TARGET_CLIENT,
                            key,
                            error = %error,
                            "failed to delete object"
                        );
                    }
                }
            }
        }

        Ok(report)
    }
}
