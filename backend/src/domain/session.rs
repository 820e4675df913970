//! Authenticated session claims and the authority that issues them.
//!
//! A session is the complete claim set carried by the encrypted cookie: once
//! decoded and unexpired it resolves the user without touching the store.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{User, UserId};

/// Default validity window for a freshly issued session.
pub const DEFAULT_SESSION_TTL_MINUTES: i64 = 120;

/// Claims bound to an authenticated browser session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session is still valid at `now`.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// Identity the session is bound to.
    pub fn user(&self) -> User {
        User::new(self.user_id, self.name.clone(), self.email.clone())
    }
}

/// Issues and validates time-bounded sessions.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use chrono::TimeDelta;
/// use dashboard::domain::{SessionAuthority, User, UserId};
///
/// let authority = SessionAuthority::new(Arc::new(mockable::DefaultClock), TimeDelta::minutes(5));
/// let session = authority.issue(&User::new(UserId::random(), "User", "user@nextmail.com"));
/// assert!(authority.validate(session).is_some());
/// ```
#[derive(Clone)]
pub struct SessionAuthority {
    clock: Arc<dyn Clock>,
    ttl: TimeDelta,
}

impl SessionAuthority {
    pub fn new(clock: Arc<dyn Clock>, ttl: TimeDelta) -> Self {
        Self { clock, ttl }
    }

    /// Validity window applied to new sessions.
    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    /// Issue a session for `user` starting now.
    pub fn issue(&self, user: &User) -> Session {
        let issued_at = self.clock.utc();
        Session {
            user_id: *user.id(),
            name: user.name().to_owned(),
            email: user.email().to_owned(),
            issued_at,
            expires_at: issued_at + self.ttl,
        }
    }

    /// Return the session if it has not expired.
    pub fn validate(&self, session: Session) -> Option<Session> {
        session
            .is_active_at(self.clock.utc())
            .then_some(session)
    }
}

impl Default for SessionAuthority {
    fn default() -> Self {
        Self::new(
            Arc::new(mockable::DefaultClock),
            TimeDelta::minutes(DEFAULT_SESSION_TTL_MINUTES),
        )
    }
}
