//! Credential verification against stored password hashes.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::domain::ports::{LoginService, UserRepository};
use crate::domain::{AuthError, LoginCredentials, User};

/// [`LoginService`] backed by a [`UserRepository`].
///
/// Malformed input is rejected before any lookup. Lookup failures are logged
/// and then reported exactly like a wrong password.
#[derive(Clone)]
pub struct CredentialsVerifier<R> {
    users: Arc<R>,
}

impl<R> CredentialsVerifier<R> {
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<R> LoginService for CredentialsVerifier<R>
where
    R: UserRepository,
{
    async fn verify(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let credentials = LoginCredentials::try_from_parts(email, password).map_err(|err| {
            debug!(reason = %err, "login input failed schema check");
            AuthError::InvalidCredentials
        })?;

        let record = match self.users.find_by_email(credentials.email()).await {
            Ok(Some(record)) => record,
            Ok(None) => return Err(AuthError::InvalidCredentials),
            Err(err) => {
                error!(error = %err, "user lookup failed during login");
                return Err(AuthError::InvalidCredentials);
            }
        };

        if record.password_hash.verify(credentials.password()) {
            Ok(record.user)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}
