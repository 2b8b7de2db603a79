//! Authentication use-case: credential verification plus token issuance.
//!
//! Rejections (unknown user, password mismatch) fail the envelope with a
//! diagnostic only; caught faults populate the cause. Successful sign-ins
//! are reported to the logging collaborator.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::auth::{TokenIssuer, password};
use crate::domain::ports::{AuthenticatedUser, LoginService, UserRepository};
use crate::domain::user_service::map_persistence_error;
use crate::domain::{Error, LoginCredentials, Outcome};

/// Login service implementing the driving port over a user repository and
/// a token issuer.
#[derive(Clone)]
pub struct AuthService<R> {
    repository: Arc<R>,
    issuer: TokenIssuer,
}

impl<R> AuthService<R> {
    /// Create a new service over the given repository and issuer.
    pub fn new(repository: Arc<R>, issuer: TokenIssuer) -> Self {
        Self { repository, issuer }
    }
}

#[async_trait]
impl<R: UserRepository> LoginService for AuthService<R> {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Outcome<AuthenticatedUser> {
        let user = match self.repository.find_by_username(credentials.username()).await {
            Ok(Some(user)) => user,
            Ok(None) => return Outcome::failure("the provided user does not exist"),
            Err(err) => {
                return Outcome::failure_with_cause(
                    "an error occurred while looking up the user",
                    map_persistence_error(err),
                );
            }
        };

        match password::verify_password(
            credentials.password(),
            &user.password_hash,
            &user.password_salt,
        ) {
            Ok(true) => {}
            Ok(false) => return Outcome::failure("the provided password is not valid"),
            Err(cause) => {
                return Outcome::failure_with_cause(
                    "an error occurred while verifying the credentials",
                    cause,
                );
            }
        }

        let token_outcome = self.issuer.issue(&user);
        if token_outcome.failed() {
            // Propagate the issuer's diagnostics and cause unchanged; the
            // mapping closure never runs on a failed envelope.
            let identity = user.clone();
            return token_outcome.map(|token| AuthenticatedUser {
                user: identity,
                token,
            });
        }
        let Some(token) = token_outcome.into_element() else {
            return Outcome::failure_with_cause(
                "failed to generate the user access token",
                Error::internal("token issuance produced no element"),
            );
        };

        info!(username = %user.username, "user signed in");
        Outcome::success(AuthenticatedUser { user, token })
    }

    async fn verify_credentials(&self, username: &str, password_input: &str) -> Result<bool, Error> {
        let Some(user) = self
            .repository
            .find_by_username(username)
            .await
            .map_err(map_persistence_error)?
        else {
            return Ok(false);
        };

        password::verify_password(password_input, &user.password_hash, &user.password_salt)
    }
}
