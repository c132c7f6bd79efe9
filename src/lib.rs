//! Scoped credential vending for catalog storage access
//!
//! This crate decides, per request, whether a caller gets a pass-through
//! static credential or a freshly minted, time-bounded, least-privilege
//! credential obtained through an STS role assumption scoped to exactly
//! the privileges and locations requested. Catalog clients never receive
//! long-lived storage secrets; every dynamic grant expires.
//!
//! ## Usage
//!
//! ```ignore
//! use s3_credential_vendor::{
//!     AwsCredentialVendor, CredentialContext, S3StorageConfig,
//!     StorageConfigRegistry, StsTrustExchange,
//! };
//! use std::sync::Arc;
//!
//! // Load AWS SDK config (ambient credential/region discovery)
//! let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
//!
//! let registry = StorageConfigRegistry::new([(
//!     "my-bucket".to_string(),
//!     S3StorageConfig {
//!         bucket_path: "s3://my-bucket".to_string(),
//!         region: "us-east-1".to_string(),
//!         role_arn: "arn:aws:iam::123456789012:role/reader".to_string(),
//!         ..Default::default()
//!     },
//! )]);
//!
//! let vendor = AwsCredentialVendor::new(
//!     registry,
//!     policy_generator, // Arc<dyn PolicyGenerator>
//!     Arc::new(StsTrustExchange::new(&sdk_config).with_timeout_ms(30_000)),
//! );
//!
//! let context = CredentialContext::for_read("my-bucket", locations);
//! let creds = vendor.vend(&context).await?;
//! ```

pub mod config;
pub mod context;
pub mod credentials;
pub mod error;
pub mod exchange;
pub mod policy;
pub mod vendor;

// Re-export main types
pub use config::{S3StorageConfig, StorageConfigRegistry};
pub use context::{CredentialContext, Privilege};
pub use credentials::TemporaryCredentials;
pub use error::{CredentialError, Result};
pub use exchange::{AssumeRoleRequest, StsTrustExchange, TrustExchange};
pub use policy::PolicyGenerator;
pub use vendor::{AwsCredentialVendor, VEND_DURATION_SECONDS};
