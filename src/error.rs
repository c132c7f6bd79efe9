//! Error types for credential vending

use thiserror::Error;

/// Errors from credential vending operations
#[derive(Debug, Error)]
pub enum CredentialError {
    /// No storage configuration registered for the requested base
    #[error("Storage configuration not found: {0}")]
    ConfigurationNotFound(String),

    /// Configuration unusable for the dynamic path (bad endpoint, missing role)
    #[error("Invalid storage configuration: {0}")]
    InvalidConfiguration(String),

    /// Trust-exchange (STS) call failed
    #[error("Trust exchange error: {0}")]
    TrustExchange(String),

    /// Trust exchange throttled the request - safe for the caller to retry
    #[error("Trust exchange throttled: {0}")]
    Throttled(String),

    /// Policy generator failed to render a scoping policy
    #[error("Policy error: {0}")]
    Policy(String),
}

impl CredentialError {
    pub fn configuration_not_found(msg: impl Into<String>) -> Self {
        Self::ConfigurationNotFound(msg.into())
    }

    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    pub fn trust_exchange(msg: impl Into<String>) -> Self {
        Self::TrustExchange(msg.into())
    }

    pub fn throttled(msg: impl Into<String>) -> Self {
        Self::Throttled(msg.into())
    }

    pub fn policy(msg: impl Into<String>) -> Self {
        Self::Policy(msg.into())
    }

    /// True for failures the caller may retry with the same request
    /// (same role, same policy, same duration).
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Throttled(_))
    }
}

/// Result type for credential vending operations
pub type Result<T> = std::result::Result<T, CredentialError>;
