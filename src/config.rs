//! Storage configuration and the read-only configuration registry

use crate::error::{CredentialError, Result};
use std::collections::HashMap;
use url::Url;

/// Per-bucket storage configuration.
///
/// Loaded once at process start and immutable thereafter. When
/// `session_token` is non-empty the vendor returns the static credentials
/// directly (test/local/offline configurations that inject a pre-issued
/// credential); otherwise `role_arn` names the role assumed through the
/// trust exchange, and `access_key`/`secret_key` - if both present -
/// authenticate *to* the exchange and are never returned to the caller.
#[derive(Debug, Clone, Default)]
pub struct S3StorageConfig {
    /// Bucket path this configuration governs (e.g. `s3://my-bucket`)
    pub bucket_path: String,
    /// AWS region for the trust-exchange client
    pub region: String,
    /// Role to assume on the dynamic path
    pub role_arn: String,
    /// Optional static access key (authenticates to the exchange)
    pub access_key: Option<String>,
    /// Optional static secret key (authenticates to the exchange)
    pub secret_key: Option<String>,
    /// Pre-issued session token; non-empty switches to static pass-through
    pub session_token: Option<String>,
    /// Optional trust-exchange endpoint override (e.g. LocalStack/MinIO)
    pub endpoint: Option<String>,
}

impl S3StorageConfig {
    /// Non-empty session token switches the vendor into static pass-through.
    pub fn static_session_token(&self) -> Option<&str> {
        self.session_token.as_deref().filter(|t| !t.is_empty())
    }

    /// Both static keys present and non-empty.
    pub fn has_static_keys(&self) -> bool {
        matches!(
            (self.access_key.as_deref(), self.secret_key.as_deref()),
            (Some(ak), Some(sk)) if !ak.is_empty() && !sk.is_empty()
        )
    }

    /// Check this configuration is usable for the dynamic path.
    ///
    /// A missing role or unparseable endpoint is an `InvalidConfiguration`
    /// error, never a silent fallback. Callers loading configuration at
    /// startup can use this to reject bad entries before first use.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::InvalidConfiguration`] if `role_arn` is
    /// empty or `endpoint` is present but not a valid URL.
    pub fn validate_for_exchange(&self) -> Result<()> {
        if self.role_arn.is_empty() {
            return Err(CredentialError::invalid_configuration(format!(
                "No role ARN configured for bucket '{}' and no session token supplied",
                self.bucket_path
            )));
        }
        if let Some(endpoint) = &self.endpoint {
            Url::parse(endpoint).map_err(|e| {
                CredentialError::invalid_configuration(format!(
                    "Malformed trust-exchange endpoint '{}': {}",
                    endpoint, e
                ))
            })?;
        }
        Ok(())
    }
}

/// Immutable mapping from storage base to its configuration.
///
/// Constructed once and shared read-only by all request workers; lookup is
/// exact key equality, never prefix matching. A miss is a configuration
/// error, not a default.
#[derive(Debug, Clone, Default)]
pub struct StorageConfigRegistry {
    configs: HashMap<String, S3StorageConfig>,
}

impl StorageConfigRegistry {
    /// Build a registry from `(storage base, config)` pairs.
    ///
    /// Later entries for the same base replace earlier ones, so exactly one
    /// configuration exists per base.
    pub fn new(configs: impl IntoIterator<Item = (String, S3StorageConfig)>) -> Self {
        Self {
            configs: configs.into_iter().collect(),
        }
    }

    /// Look up the configuration for a storage base.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::ConfigurationNotFound`] if no entry exists
    /// for `base`.
    pub fn lookup(&self, base: &str) -> Result<&S3StorageConfig> {
        self.configs.get(base).ok_or_else(|| {
            CredentialError::configuration_not_found(format!(
                "No storage configuration for base '{}'",
                base
            ))
        })
    }

    /// Number of registered configurations.
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// True if no configurations are registered.
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}
