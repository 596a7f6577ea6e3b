//! Page types for [`ObjectStoreClient::list_pages`](super::ObjectStoreClient::list_pages)
//! and [`ObjectStoreClient::clear`](super::ObjectStoreClient::clear).

use object_store::ObjectMeta;

/// One page of a bucket listing.
#[derive(Debug, Clone)]
pub struct ListPage {
    /// Zero-based position of this page in the listing.
    pub index: usize,
    /// Objects on this page, in listing order.
    pub objects: Vec<ObjectMeta>,
}

impl ListPage {
    /// Largest page S3 returns from a single `ListObjectsV2` call.
    pub const MAX_SIZE: usize = 1000;

    /// Clamps a requested page size into `1..=MAX_SIZE`.
    pub fn clamp_size(requested: usize) -> usize {
        requested.clamp(1, Self::MAX_SIZE)
    }

    /// Keys of the objects on this page.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.objects.iter().map(|meta| meta.location.as_ref())
    }

    /// Total size in bytes of the objects on this page.
    pub fn total_size(&self) -> u64 {
        self.objects.iter().map(|meta| meta.size).sum()
    }
}

/// Outcome of a [`clear`](super::ObjectStoreClient::clear) walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearReport {
    /// Pages visited.
    pub pages: usize,
    /// Objects deleted.
    pub deleted: usize,
    /// Objects whose deletion failed.
    pub failed: usize,
}

impl ClearReport {
    /// Whether every listed object was deleted.
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}
