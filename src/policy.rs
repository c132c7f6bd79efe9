//! Scoping-policy generation seam

use crate::context::Privilege;
use crate::error::Result;
use std::collections::HashSet;
use std::fmt::Debug;

/// Renders a least-privilege authorization policy for a credential request.
///
/// The vendor treats the returned document as opaque: it is passed to the
/// trust exchange unmodified. Implementations must authorize exactly the
/// requested privileges on exactly the requested locations, never a
/// superset, and the document must be acceptable to the trust-exchange
/// service as an inline session policy.
pub trait PolicyGenerator: Debug + Send + Sync {
    /// Render a policy document scoping `privileges` to `locations`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CredentialError::Policy`] if the request cannot be
    /// rendered into a valid policy document.
    fn generate(
        &self,
        privileges: &HashSet<Privilege>,
        locations: &HashSet<String>,
    ) -> Result<String>;
}
