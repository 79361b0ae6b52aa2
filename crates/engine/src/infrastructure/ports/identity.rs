//! Identity port - turns an inbound bearer token into a user id.
//!
//! Handlers trust the resolved identity for all per-user scoping; no
//! process-wide session state exists.

use async_trait::async_trait;
use questlog_domain::UserId;

use super::error::AuthError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityPort: Send + Sync {
    /// Resolve a bearer token to the user it identifies.
    ///
    /// Fails with [`AuthError::Unauthorized`] for unknown or malformed tokens.
    async fn resolve(&self, token: &str) -> Result<UserId, AuthError>;
}
