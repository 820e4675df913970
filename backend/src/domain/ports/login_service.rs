//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to check a submitted email/password pair without
//! knowing how users are stored, so handler tests can substitute a double.

use async_trait::async_trait;

use crate::domain::{AuthError, User};

/// Domain use-case port for credential verification.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Check raw credentials and return the matching user.
    ///
    /// Every failure, including malformed input and store errors, is the
    /// same [`AuthError::InvalidCredentials`].
    async fn verify(&self, email: &str, password: &str) -> Result<User, AuthError>;
}
