//! Driven port for reading stored users and their password hashes.
#[cfg(any(test, feature = "test-support"))]
use std::sync::OnceLock;

use async_trait::async_trait;

use crate::domain::UserRecord;
#[cfg(any(test, feature = "test-support"))]
use crate::domain::{PasswordHash, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError => "user repository";
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch at most one user by exact email match.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, UserPersistenceError>;
}

/// Email of the single user known to [`FixtureUserRepository`].
#[cfg(any(test, feature = "test-support"))]
pub const FIXTURE_EMAIL: &str = "user@nextmail.com";
/// Password of the single user known to [`FixtureUserRepository`].
#[cfg(any(test, feature = "test-support"))]
pub const FIXTURE_PASSWORD: &str = "123456";
#[cfg(any(test, feature = "test-support"))]
const FIXTURE_USER_ID: &str = "410544b2-4001-4271-9855-fec4b6a6442a";
#[cfg(any(test, feature = "test-support"))]
const FIXTURE_NAME: &str = "User";

#[cfg(any(test, feature = "test-support"))]
static FIXTURE_HASH: OnceLock<Option<PasswordHash>> = OnceLock::new();

/// In-memory repository holding one seed user, for tests that do not
/// exercise the store.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[cfg(any(test, feature = "test-support"))]
impl FixtureUserRepository {
    fn seed_record() -> Result<UserRecord, UserPersistenceError> {
        let id = UserId::new(FIXTURE_USER_ID)
            .map_err(|err| UserPersistenceError::query(format!("fixture user id: {err}")))?;
        let hash = FIXTURE_HASH
            .get_or_init(|| PasswordHash::generate(FIXTURE_PASSWORD).ok())
            .clone()
            .ok_or_else(|| UserPersistenceError::query("fixture password hashing failed"))?;
        Ok(UserRecord::new(
            User::new(id, FIXTURE_NAME, FIXTURE_EMAIL),
            hash,
        ))
    }
}

#[cfg(any(test, feature = "test-support"))]
#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, UserPersistenceError> {
        if email != FIXTURE_EMAIL {
            return Ok(None);
        }
        Self::seed_record().map(Some)
    }
}
