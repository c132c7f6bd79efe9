//! Credential vending decision logic

use crate::config::StorageConfigRegistry;
use crate::context::CredentialContext;
use crate::credentials::TemporaryCredentials;
use crate::error::Result;
use crate::exchange::{AssumeRoleRequest, TrustExchange};
use crate::policy::PolicyGenerator;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Lifetime of dynamically vended credentials, in seconds.
pub const VEND_DURATION_SECONDS: i32 = 3600;

/// Maps a credential request to either a static pass-through credential or
/// a freshly minted, time-bounded, least-privilege credential from the
/// trust exchange.
///
/// All collaborators are injected at construction; there is no ambient
/// global configuration. The vendor holds no mutable state, so `vend` is
/// safe for unconstrained concurrent use.
#[derive(Debug, Clone)]
pub struct AwsCredentialVendor {
    registry: StorageConfigRegistry,
    policy_generator: Arc<dyn PolicyGenerator>,
    exchange: Arc<dyn TrustExchange>,
}

impl AwsCredentialVendor {
    /// Create a vendor over a resolved configuration registry.
    pub fn new(
        registry: StorageConfigRegistry,
        policy_generator: Arc<dyn PolicyGenerator>,
        exchange: Arc<dyn TrustExchange>,
    ) -> Self {
        Self {
            registry,
            policy_generator,
            exchange,
        }
    }

    /// Vend credentials for a request context.
    ///
    /// A configuration with a non-empty session token short-circuits to
    /// static pass-through: the configured keys and token are returned
    /// unchanged with no expiration, no policy generation, and no network
    /// call. Otherwise a scoping policy is rendered for the requested
    /// privileges and locations and exchanged, with the configured role,
    /// for a credential expiring [`VEND_DURATION_SECONDS`] from issuance.
    ///
    /// The dynamic path performs exactly one outbound call and is never
    /// retried here; dropping the returned future cancels the in-flight
    /// exchange call.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CredentialError::ConfigurationNotFound`] when no
    /// configuration exists for `context.storage_base`,
    /// [`crate::CredentialError::InvalidConfiguration`] when the resolved
    /// configuration cannot support the dynamic path, and
    /// [`crate::CredentialError::TrustExchange`] /
    /// [`crate::CredentialError::Throttled`] when the exchange call fails.
    pub async fn vend(&self, context: &CredentialContext) -> Result<TemporaryCredentials> {
        let config = self.registry.lookup(&context.storage_base)?;

        // A pre-issued session token means static pass-through, regardless
        // of any other fields.
        if let Some(token) = config.static_session_token() {
            debug!(base = %context.storage_base, "vending static session credentials");
            return Ok(TemporaryCredentials {
                access_key_id: config.access_key.clone().unwrap_or_default(),
                secret_access_key: config.secret_key.clone().unwrap_or_default(),
                session_token: token.to_string(),
                expires_at: None,
            });
        }

        config.validate_for_exchange()?;

        // Audit correlation only; carries no security meaning.
        let session_name = format!("vend-{}", Uuid::new_v4());

        let policy = self
            .policy_generator
            .generate(&context.privileges, &context.locations)?;

        debug!(
            base = %context.storage_base,
            role = %config.role_arn,
            session = %session_name,
            "requesting scoped credentials from trust exchange"
        );

        self.exchange
            .assume_role(
                config,
                AssumeRoleRequest {
                    policy,
                    session_name,
                    duration_seconds: VEND_DURATION_SECONDS,
                },
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{S3StorageConfig, StorageConfigRegistry};
    use crate::context::Privilege;
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use std::collections::HashSet;
    use std::sync::Mutex;

    // Scenario-level coverage (static pass-through, lookup miss, invalid
    // configuration, session-name distinctness) lives in
    // tests/vendor_flow.rs; these tests pin down the exact request the
    // vendor hands to the exchange.

    #[derive(Debug)]
    struct MarkerPolicyGenerator;

    impl PolicyGenerator for MarkerPolicyGenerator {
        fn generate(
            &self,
            _privileges: &HashSet<Privilege>,
            _locations: &HashSet<String>,
        ) -> Result<String> {
            Ok("opaque-policy-document".to_string())
        }
    }

    #[derive(Debug, Default)]
    struct LastRequestExchange {
        last: Mutex<Option<AssumeRoleRequest>>,
    }

    #[async_trait]
    impl TrustExchange for LastRequestExchange {
        async fn assume_role(
            &self,
            _config: &S3StorageConfig,
            request: AssumeRoleRequest,
        ) -> Result<TemporaryCredentials> {
            let duration = i64::from(request.duration_seconds);
            *self.last.lock().unwrap() = Some(request);
            Ok(TemporaryCredentials {
                access_key_id: "ASIAMINTED".to_string(),
                secret_access_key: "minted-secret".to_string(),
                session_token: "minted-token".to_string(),
                expires_at: Some(Utc::now() + Duration::seconds(duration)),
            })
        }
    }

    #[tokio::test]
    async fn test_exchange_request_carries_fixed_duration_and_opaque_policy() {
        let exchange = Arc::new(LastRequestExchange::default());
        let vendor = AwsCredentialVendor::new(
            StorageConfigRegistry::new([(
                "bucket-a".to_string(),
                S3StorageConfig {
                    bucket_path: "s3://bucket-a".to_string(),
                    region: "us-east-1".to_string(),
                    role_arn: "arn:aws:iam::123456789012:role/reader".to_string(),
                    ..Default::default()
                },
            )]),
            Arc::new(MarkerPolicyGenerator),
            exchange.clone(),
        );
        let context =
            CredentialContext::for_read("bucket-a", ["s3://bucket-a/t1".to_string()]);

        let creds = vendor.vend(&context).await.unwrap();

        let secs = creds.seconds_until_expiry().unwrap();
        assert!(secs > 3590 && secs <= 3600);

        let request = exchange.last.lock().unwrap().clone().unwrap();
        assert_eq!(request.duration_seconds, VEND_DURATION_SECONDS);
        assert!(request.session_name.starts_with("vend-"));
        // The vendor must not inspect or rewrite the policy document.
        assert_eq!(request.policy, "opaque-policy-document");
    }
}
