//! User registration and query use-cases.
//!
//! Registration is the only user mutation: it hashes the plaintext
//! password under a fresh salt before anything reaches the repository,
//! and reports the transactional insert through the result envelope.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::error;
use uuid::Uuid;

use crate::domain::auth::password;
use crate::domain::ports::{
    RegistrationService, UserPersistenceError, UserRepository, UsersQuery,
};
use crate::domain::{Error, NewUser, Outcome, Registration, User};

/// User service implementing the driving ports over a repository.
#[derive(Clone)]
pub struct UserService<R> {
    repository: Arc<R>,
}

impl<R> UserService<R> {
    /// Create a new service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

pub(crate) fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

#[async_trait]
impl<R: UserRepository> UsersQuery for UserService<R> {
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.repository.list().await.map_err(map_persistence_error)
    }

    async fn get_user(&self, uuid: Uuid) -> Result<Option<User>, Error> {
        self.repository
            .find_by_uuid(uuid)
            .await
            .map_err(map_persistence_error)
    }
}

#[async_trait]
impl<R: UserRepository> RegistrationService for UserService<R> {
    async fn register(&self, registration: Registration) -> Outcome<User> {
        let salt = password::generate_salt();
        let hash = match password::hash_password(&registration.password, &salt) {
            Ok(hash) => hash,
            Err(cause) => {
                return Outcome::failure_with_cause(
                    "an error occurred while registering the user",
                    cause,
                );
            }
        };

        let new_user = NewUser {
            username: registration.username,
            password_hash: hash,
            password_salt: salt,
            first_name: registration.first_name,
            middle_name: registration.middle_name,
            last_name: registration.last_name,
            email: registration.email,
        };

        match self.repository.register(&new_user).await {
            Ok(user) => Outcome::success(user),
            Err(err) => {
                let cause = map_persistence_error(err);
                let diagnostic = "an error occurred while registering the user";
                error!(cause = %cause, "{diagnostic}");
                Outcome::failure_with_cause(diagnostic, cause)
            }
        }
    }

    async fn username_exists(&self, username: &str) -> Result<bool, Error> {
        self.repository
            .username_exists(username)
            .await
            .map_err(map_persistence_error)
    }
}
