//! AWS connection settings.

use std::fmt;

use anyhow::{Result as AnyhowResult, anyhow};
use clap::Args;
use docstash_object::prelude::S3Credentials;
use docstash_textract::TextractCredentials;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Region, key pair and bucket shared by every command.
///
/// # Environment Variables
///
/// - `AWS_REGION` - Region of the bucket and the Textract endpoint
/// - `AWS_ACCESS_KEY_ID` - Access key id
/// - `AWS_SECRET_ACCESS_KEY` - Secret access key
/// - `AWS_SESSION_TOKEN` - Session token for temporary credentials (optional)
/// - `AWS_S3_BUCKET` - Bucket every command works on
/// - `AWS_ENDPOINT_URL` - Custom S3 endpoint such as MinIO (optional)
#[derive(Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct AwsConfig {
    /// AWS region, e.g. `us-east-1`.
    #[arg(long, env = "AWS_REGION")]
    pub region: String,

    /// Access key id used to sign requests.
    #[arg(long, env = "AWS_ACCESS_KEY_ID")]
    pub access_key_id: String,

    /// Secret access key used to sign requests.
    #[arg(long, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
    #[serde(default, skip_serializing)]
    pub secret_access_key: String,

    /// Session token for temporary credentials.
    #[arg(long, env = "AWS_SESSION_TOKEN", hide_env_values = true)]
    #[serde(default, skip_serializing)]
    pub session_token: Option<String>,

    /// Bucket to operate on.
    #[arg(long, env = "AWS_S3_BUCKET")]
    pub bucket: String,

    /// Custom S3 endpoint, e.g. `http://localhost:9000`.
    ///
    /// Only object storage uses it; Textract always talks to AWS.
    #[arg(long, env = "AWS_ENDPOINT_URL")]
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl AwsConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a required value is blank or the endpoint is not
    /// an `http(s)` URL.
    pub fn validate(&self) -> AnyhowResult<()> {
        let required = [
            ("AWS_REGION", &self.region),
            ("AWS_ACCESS_KEY_ID", &self.access_key_id),
            ("AWS_SECRET_ACCESS_KEY", &self.secret_access_key),
            ("AWS_S3_BUCKET", &self.bucket),
        ];

        if let Some((name, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(anyhow!("{name} is set but empty"));
        }

        if let Some(endpoint) = &self.endpoint
            && !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(anyhow!(
                "Endpoint {endpoint} is invalid. It must start with http:// or https://"
            ));
        }

        Ok(())
    }

    /// Credentials for the S3 object store.
    pub fn s3_credentials(&self) -> S3Credentials {
        let mut credentials = S3Credentials::new(&self.bucket, &self.region)
            .with_static_keys(&self.access_key_id, &self.secret_access_key);
        credentials.session_token = self.session_token.clone();
        if let Some(endpoint) = &self.endpoint {
            credentials = credentials.with_endpoint(endpoint);
        }
        credentials
    }

    /// Credentials for the Textract client.
    pub fn textract_credentials(&self) -> TextractCredentials {
        let credentials =
            TextractCredentials::new(&self.region, &self.access_key_id, &self.secret_access_key);
        match &self.session_token {
            Some(token) => credentials.with_session_token(token),
            None => credentials,
        }
    }

    /// Logs the configuration without secrets.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            region = %self.region,
            bucket = %self.bucket,
            endpoint = ?self.endpoint,
            access_key = %self.textract_credentials().access_key_masked(),
            session_token = self.session_token.is_some(),
            "AWS configuration"
        );
    }
}

impl fmt::Debug for AwsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsConfig")
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .field("session_token", &self.session_token.as_ref().map(|_| "***"))
            .field("bucket", &self.bucket)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AwsConfig {
        AwsConfig {
            region: "eu-central-1".to_owned(),
            access_key_id: "AKIAEXAMPLE".to_owned(),
            secret_access_key: "wJalrXUtnFEMI".to_owned(),
            session_token: None,
            bucket: "docstash-test".to_owned(),
            endpoint: None,
        }
    }

    #[test]
    fn valid_config_passes() {
        config().validate().unwrap();

        let mut minio = config();
        minio.endpoint = Some("http://localhost:9000".to_owned());
        minio.validate().unwrap();
    }

    #[test]
    fn blank_values_are_rejected() {
        let mut blank = config();
        blank.bucket = "  ".to_owned();
        let error = blank.validate().unwrap_err();
        assert!(error.to_string().contains("AWS_S3_BUCKET"));

        let mut blank = config();
        blank.secret_access_key.clear();
        let error = blank.validate().unwrap_err();
        assert!(error.to_string().contains("AWS_SECRET_ACCESS_KEY"));
    }

    #[test]
    fn endpoint_must_be_http() {
        let mut bad = config();
        bad.endpoint = Some("localhost:9000".to_owned());
        assert!(bad.validate().is_err());
    }

    #[test]
    fn credentials_carry_every_value() {
        let mut aws = config();
        aws.endpoint = Some("http://localhost:9000".to_owned());
        aws.session_token = Some("token".to_owned());

        let s3 = aws.s3_credentials();
        assert_eq!(s3.bucket, "docstash-test");
        assert_eq!(s3.region, "eu-central-1");
        assert_eq!(s3.access_key_id.as_deref(), Some("AKIAEXAMPLE"));
        assert_eq!(s3.secret_access_key.as_deref(), Some("wJalrXUtnFEMI"));
        assert_eq!(s3.session_token.as_deref(), Some("token"));
        assert_eq!(s3.endpoint.as_deref(), Some("http://localhost:9000"));

        let textract = aws.textract_credentials();
        assert_eq!(textract.region, "eu-central-1");
        assert_eq!(textract.session_token.as_deref(), Some("token"));
    }

    #[test]
    fn debug_masks_secrets() {
        let mut aws = config();
        aws.session_token = Some("token-value".to_owned());
        let debug = format!("{aws:?}");
        assert!(!debug.contains("wJalrXUtnFEMI"));
        assert!(!debug.contains("token-value"));
        assert!(debug.contains("AKIAEXAMPLE"));
    }
}
