//! Static AWS credentials for the Textract client.

use aws_sdk_textract::config::Credentials;
use serde::{Deserialize, Serialize};

/// Region and key pair used to sign Textract requests.
#[derive(Clone, Serialize, Deserialize)]
pub struct TextractCredentials {
    /// AWS region hosting the Textract endpoint (e.g. `us-east-1`).
    pub region: String,

    /// Access key id.
    pub access_key_id: String,

    /// Secret access key. Never serialized or logged.
    #[serde(skip_serializing)]
    pub secret_access_key: String,

    /// Optional session token for temporary credentials.
    #[serde(default, skip_serializing)]
    pub session_token: Option<String>,
}

impl TextractCredentials {
    /// Provider name recorded on the SDK credentials.
    const PROVIDER_NAME: &'static str = "docstash";

    /// Creates credentials from a region and a static key pair.
    pub fn new(
        region: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: None,
        }
    }

    /// Adds a session token.
    #[must_use]
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    /// Returns the access key with everything after the first 4 characters masked.
    pub fn access_key_masked(&self) -> String {
        match self.access_key_id.get(..4) {
            Some(head) if self.access_key_id.len() > 4 => format!("{head}***"),
            _ => "*".repeat(self.access_key_id.len()),
        }
    }

    pub(crate) fn to_sdk(&self) -> Credentials {
        Credentials::new(
            &self.access_key_id,
            &self.secret_access_key,
            self.session_token.clone(),
            None,
            Self::PROVIDER_NAME,
        )
    }
}

impl std::fmt::Debug for TextractCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextractCredentials")
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_masked())
            .finish_non_exhaustive()
    }
}
