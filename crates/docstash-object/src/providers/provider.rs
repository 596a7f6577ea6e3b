//! Provider trait for creating authenticated client connections.

use std::future::Future;

use serde::de::DeserializeOwned;

use crate::types::Error;

/// Factory for an authenticated connection to an object-storage backend.
pub trait Client: Sized + Send + Sync + 'static {
    /// Strongly-typed credentials for this provider.
    type Credentials: DeserializeOwned + Send + Sync;

    /// Unique identifier (e.g. `"s3"`).
    const ID: &'static str;

    /// Build a client from `creds`.
    ///
    /// Construction does not touch the network; use
    /// [`ObjectStoreClient::verify_reachable`](crate::client::ObjectStoreClient::verify_reachable)
    /// to probe the backend.
    fn connect(creds: &Self::Credentials) -> impl Future<Output = Result<Self, Error>> + Send;
}
