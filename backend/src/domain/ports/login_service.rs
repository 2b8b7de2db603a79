//! Driving port for login/authentication use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it
//! to authenticate credentials without knowing (or importing) the backing
//! infrastructure. This makes HTTP handler tests deterministic because
//! they can substitute a test double instead of wiring persistence.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Outcome, User};

/// A successful authentication: the identity plus its freshly minted
/// access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The verified identity.
    pub user: User,
    /// Signed compact access token.
    pub token: String,
}

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and mint an access token.
    ///
    /// Unknown users and password mismatches fail the envelope with a
    /// diagnostic only; a populated cause means an underlying fault.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Outcome<AuthenticatedUser>;

    /// Check credentials without issuing a token.
    async fn verify_credentials(&self, username: &str, password: &str) -> Result<bool, Error>;
}
