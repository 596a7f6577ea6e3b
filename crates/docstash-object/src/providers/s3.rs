//! S3 provider. Also reaches MinIO and other S3-compatible endpoints.

use derive_more::Deref;
use object_store::aws::AmazonS3Builder;
use serde::{Deserialize, Serialize};

use super::Client;
use crate::TRACING_TARGET_PROVIDER;
use crate::client::ObjectStoreClient;
use crate::types::Error;

/// Bucket, region and keys for an S3 connection.
#[derive(Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Credentials {
    /// S3 bucket name.
    pub bucket: String,
    /// Region of the bucket. Deserializes to `us-east-1` when absent.
    #[serde(default = "default_region")]
    pub region: String,
    /// Custom endpoint such as `http://localhost:9000`. Plain `http` is allowed.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Static access key id.
    #[serde(default)]
    pub access_key_id: Option<String>,
    /// Static secret key. Never serialized.
    #[serde(default, skip_serializing)]
    pub secret_access_key: Option<String>,
    /// Token for temporary credentials. Never serialized.
    #[serde(default, skip_serializing)]
    pub session_token: Option<String>,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

impl S3Credentials {
    /// Creates credentials for `bucket` in `region` using the ambient AWS
    /// credential chain.
    pub fn new(bucket: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            region: region.into(),
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
            session_token: None,
        }
    }

    /// Sets a static access key pair.
    #[must_use]
    pub fn with_static_keys(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self.secret_access_key = Some(secret_access_key.into());
        self
    }

    /// Sets a custom endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }
}

impl std::fmt::Debug for S3Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Credentials")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &self.secret_access_key.as_ref().map(|_| "***"))
            .field("session_token", &self.session_token.as_ref().map(|_| "***"))
            .finish()
    }
}

/// S3-backed object storage client.
#[derive(Debug, Clone, Deref)]
pub struct S3Provider(ObjectStoreClient);

impl S3Provider {
    /// Returns the underlying client.
    pub fn into_inner(self) -> ObjectStoreClient {
        self.0
    }
}

impl S3Credentials {
    /// Translates the credentials into an [`AmazonS3Builder`].
    ///
    /// Static keys are only applied as a pair; otherwise the builder falls
    /// back to its own environment and instance-profile lookup.
    fn builder(&self) -> AmazonS3Builder {
        let mut builder = AmazonS3Builder::new()
            .with_bucket_name(&self.bucket)
            .with_region(&self.region);

        if let Some(endpoint) = self.endpoint.as_deref() {
            builder = builder
                .with_endpoint(endpoint)
                .with_allow_http(endpoint.starts_with("http://"));
        }

        if let (Some(key), Some(secret)) = (&self.access_key_id, &self.secret_access_key) {
            builder = builder
                .with_access_key_id(key)
                .with_secret_access_key(secret);
        }

        match &self.session_token {
            Some(token) => builder.with_token(token),
            None => builder,
        }
    }
}

impl Client for S3Provider {
    type Credentials = S3Credentials;

    const ID: &'static str = "s3";

    async fn connect(creds: &Self::Credentials) -> Result<Self, Error> {
        let store = creds
            .builder()
            .build()
            .map_err(|e| Error::connection(&e, Self::ID).with_source(e))?;

        tracing::debug!(
            target: TRACING_TARGET_PROVIDER,
            provider = Self::ID,
            bucket = %creds.bucket,
            region = %creds.region,
            endpoint = ?creds.endpoint,
            "connected object store"
        );

        Ok(Self(ObjectStoreClient::new(store)))
    }
}
