//! Object-store test doubles.
//!
//! Only available when the `test-utils` feature is enabled:
//!
//! ```toml
//! [dev-dependencies]
//! docstash-object = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! ```rust,ignore
//! use docstash_object::mock::{FailingStore, Operation};
//!
//! let client = FailingStore::new()
//!     .fail(Operation::Delete, "locked.txt")
//!     .into_client();
//! ```

use std::collections::HashSet;
use std::fmt;

use futures::stream::BoxStream;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{
    GetOptions, GetResult, ListResult, MultipartUpload, ObjectMeta, ObjectStore, PutMultipartOpts,
    PutOptions, PutPayload, PutResult, Result,
};

use crate::client::ObjectStoreClient;

/// Operation a [`FailingStore`] can reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Put,
    Get,
    Delete,
}

/// [`InMemory`] store that rejects chosen operations on chosen keys with
/// [`object_store::Error::PermissionDenied`].
///
/// Listing and copying always go through to the inner store.
#[derive(Debug)]
pub struct FailingStore {
    inner: InMemory,
    failures: HashSet<(Operation, String)>,
}

impl FailingStore {
    /// Creates an empty store that rejects nothing.
    pub fn new() -> Self {
        Self {
            inner: InMemory::new(),
            failures: HashSet::new(),
        }
    }

    /// Rejects `operation` on `key`.
    #[must_use]
    pub fn fail(mut self, operation: Operation, key: impl Into<String>) -> Self {
        self.failures.insert((operation, key.into()));
        self
    }

    /// Wraps the store in an [`ObjectStoreClient`].
    pub fn into_client(self) -> ObjectStoreClient {
        ObjectStoreClient::new(self)
    }

    fn check(&self, operation: Operation, location: &Path) -> Result<()> {
        let key = location.to_string();
        if self.failures.contains(&(operation, key.clone())) {
            return Err(object_store::Error::PermissionDenied {
                path: key,
                source: format!("{operation:?} rejected by FailingStore").into(),
            });
        }
        Ok(())
    }
}

impl Default for FailingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FailingStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FailingStore({})", self.inner)
    }
}

#[async_trait::async_trait]
impl ObjectStore for FailingStore {
    async fn put_opts(
        &self,
        location: &Path,
        payload: PutPayload,
        opts: PutOptions,
    ) -> Result<PutResult> {
        self.check(Operation::Put, location)?;
        self.inner.put_opts(location, payload, opts).await
    }

    async fn put_multipart_opts(
        &self,
        location: &Path,
        opts: PutMultipartOpts,
    ) -> Result<Box<dyn MultipartUpload>> {
        self.check(Operation::Put, location)?;
        self.inner.put_multipart_opts(location, opts).await
    }

    async fn get_opts(&self, location: &Path, options: GetOptions) -> Result<GetResult> {
        self.check(Operation::Get, location)?;
        self.inner.get_opts(location, options).await
    }

    async fn delete(&self, location: &Path) -> Result<()> {
        self.check(Operation::Delete, location)?;
        self.inner.delete(location).await
    }

    fn list(&self, prefix: Option<&Path>) -> BoxStream<'static, Result<ObjectMeta>> {
        self.inner.list(prefix)
    }

    async fn list_with_delimiter(&self, prefix: Option<&Path>) -> Result<ListResult> {
        self.inner.list_with_delimiter(prefix).await
    }

    async fn copy(&self, from: &Path, to: &Path) -> Result<()> {
        self.inner.copy(from, to).await
    }

    async fn copy_if_not_exists(&self, from: &Path, to: &Path) -> Result<()> {
        self.inner.copy_if_not_exists(from, to).await
    }
}
