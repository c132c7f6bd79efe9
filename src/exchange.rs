//! Trust-exchange client construction and the STS AssumeRole call
//!
//! `StsTrustExchange` derives a fresh STS client per call by inheriting from
//! a base `SdkConfig` (preserves HTTP client, sleep impl, retry defaults)
//! and applying the storage configuration's overrides: explicit static
//! credentials when both keys are supplied, endpoint override, region.
//!
//! No client caching is performed. Building a fresh client per call is
//! correctness-preserving; a concurrency-safe cache keyed by configuration
//! identity is a known performance opportunity.

use crate::config::S3StorageConfig;
use crate::credentials::TemporaryCredentials;
use crate::error::{CredentialError, Result};
use async_trait::async_trait;
use aws_credential_types::Credentials;
use aws_sdk_sts::config::Region;
use aws_sdk_sts::Client;
use aws_smithy_types::timeout::TimeoutConfig;
use std::fmt::Debug;
use std::time::Duration;
use tracing::debug;

/// Parameters for a single role-assumption call.
///
/// The role ARN comes from the storage configuration; everything here is
/// call-local.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssumeRoleRequest {
    /// Inline session policy scoping the vended credential
    pub policy: String,
    /// Opaque session name for audit correlation on the exchange side
    pub session_name: String,
    /// Credential lifetime in seconds
    pub duration_seconds: i32,
}

/// A role-assumption call against an external trust-exchange service.
///
/// The vendor performs exactly one call per dynamic vend and never retries;
/// throttling surfaces as [`CredentialError::Throttled`] so the caller can
/// decide. Implementations must be safe for unconstrained concurrent use.
#[async_trait]
pub trait TrustExchange: Debug + Send + Sync {
    /// Exchange a role reference and scoping policy for temporary credentials.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::InvalidConfiguration`] if a client cannot
    /// be constructed from `config`, [`CredentialError::Throttled`] if the
    /// service rate-limited the call, and [`CredentialError::TrustExchange`]
    /// for any other failure.
    async fn assume_role(
        &self,
        config: &S3StorageConfig,
        request: AssumeRoleRequest,
    ) -> Result<TemporaryCredentials>;
}

/// STS-backed trust exchange.
///
/// Holds the base AWS SDK configuration (from `aws_config::load_defaults()`)
/// that per-call clients are derived from. When a storage configuration
/// carries no static keys, the base configuration's ambient credential
/// discovery (environment, profile, IMDS) authenticates the call.
#[derive(Clone)]
pub struct StsTrustExchange {
    base: aws_config::SdkConfig,
    timeout_ms: Option<u64>,
}

impl Debug for StsTrustExchange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StsTrustExchange")
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl StsTrustExchange {
    /// Create a new STS trust exchange from a loaded SDK configuration.
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            base: sdk_config.clone(),
            timeout_ms: None,
        }
    }

    /// Bound each exchange call with an operation timeout (includes SDK
    /// retry time).
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Build an STS client bound to a storage configuration.
    ///
    /// Static keys, when both are present and non-empty, take precedence
    /// over the base configuration's ambient credential provider.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::InvalidConfiguration`] if the configured
    /// endpoint override is not a parseable URL.
    pub fn sts_client(&self, config: &S3StorageConfig) -> Result<Client> {
        config.validate_for_exchange()?;

        let mut builder = aws_sdk_sts::config::Builder::from(&self.base);

        if config.has_static_keys() {
            // Checked non-empty by has_static_keys
            let access_key = config.access_key.as_deref().unwrap_or_default();
            let secret_key = config.secret_key.as_deref().unwrap_or_default();
            builder = builder.credentials_provider(Credentials::new(
                access_key,
                secret_key,
                None,
                None,
                "storage-config",
            ));
            debug!(bucket = %config.bucket_path, "using static keys for trust exchange");
        } else {
            debug!(bucket = %config.bucket_path, "using ambient credentials for trust exchange");
        }

        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        if !config.region.is_empty() {
            builder = builder.region(Region::new(config.region.clone()));
        }

        if let Some(timeout_ms) = self.timeout_ms {
            let timeout_config = TimeoutConfig::builder()
                .operation_timeout(Duration::from_millis(timeout_ms))
                .build();
            builder = builder.timeout_config(timeout_config);
        }

        Ok(Client::from_conf(builder.build()))
    }
}

#[async_trait]
impl TrustExchange for StsTrustExchange {
    async fn assume_role(
        &self,
        config: &S3StorageConfig,
        request: AssumeRoleRequest,
    ) -> Result<TemporaryCredentials> {
        let client = self.sts_client(config)?;

        let response = client
            .assume_role()
            .role_arn(&config.role_arn)
            .policy(&request.policy)
            .role_session_name(&request.session_name)
            .duration_seconds(request.duration_seconds)
            .send()
            .await
            .map_err(|e| map_sts_error(e, &config.role_arn))?;

        let credentials = response.credentials().ok_or_else(|| {
            CredentialError::trust_exchange("AssumeRole response carried no credentials")
        })?;

        let expiration_ms = credentials.expiration().to_millis().map_err(|e| {
            CredentialError::trust_exchange(format!(
                "Unrepresentable expiration in AssumeRole response: {}",
                e
            ))
        })?;
        let expires_at = chrono::DateTime::from_timestamp_millis(expiration_ms).ok_or_else(|| {
            CredentialError::trust_exchange(format!(
                "Out-of-range expiration in AssumeRole response: {} ms",
                expiration_ms
            ))
        })?;

        Ok(TemporaryCredentials {
            access_key_id: credentials.access_key_id().to_string(),
            secret_access_key: credentials.secret_access_key().to_string(),
            session_token: credentials.session_token().to_string(),
            expires_at: Some(expires_at),
        })
    }
}

/// Map an SDK error to CredentialError, classifying throttling by HTTP status
fn map_sts_error<E: std::fmt::Debug>(
    err: aws_sdk_sts::error::SdkError<E>,
    role_arn: &str,
) -> CredentialError {
    use aws_sdk_sts::error::SdkError;

    match &err {
        SdkError::ServiceError(service_err) => {
            let status = service_err.raw().status().as_u16();
            match status {
                // Retryable server errors: throttling (429), server errors
                429 | 500 | 502 | 503 | 504 => CredentialError::throttled(format!(
                    "Retryable error assuming role '{}' (HTTP {})",
                    role_arn, status
                )),
                401 | 403 => CredentialError::trust_exchange(format!(
                    "Role assumption rejected for '{}' (HTTP {}): {:?}",
                    role_arn, status, err
                )),
                _ => CredentialError::trust_exchange(format!(
                    "STS error assuming role '{}' (HTTP {}): {:?}",
                    role_arn, status, err
                )),
            }
        }
        SdkError::TimeoutError(_) => CredentialError::trust_exchange(format!(
            "STS timeout assuming role '{}': {:?}",
            role_arn, err
        )),
        SdkError::DispatchFailure(_) => CredentialError::trust_exchange(format!(
            "STS connection error assuming role '{}': {:?}",
            role_arn, err
        )),
        _ => CredentialError::trust_exchange(format!(
            "STS error assuming role '{}': {:?}",
            role_arn, err
        )),
    }
}
