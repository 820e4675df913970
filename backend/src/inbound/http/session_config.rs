//! Session cookie configuration parsing and validation.
//!
//! Environment-driven session settings are validated in one place so they
//! can be tested in isolation with `mockable::MockEnv`.

use actix_web::cookie::{Key, SameSite};
use chrono::TimeDelta;
use mockable::Env;
use zeroize::Zeroizing;

use crate::domain::DEFAULT_SESSION_TTL_MINUTES;

mod parsing;


pub(crate) const AUTH_SECRET_ENV: &str = "AUTH_SECRET";
pub(crate) const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
pub(crate) const SAMESITE_ENV: &str = "SESSION_SAMESITE";
pub(crate) const TTL_MINUTES_ENV: &str = "SESSION_TTL_MINUTES";

/// Minimum secret length accepted for cookie signing and encryption.
pub const AUTH_SECRET_MIN_LEN: usize = 32;

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and warn about missing toggles.
    Debug,
    /// Release builds require explicit, valid toggles.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dashboard::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// assert_eq!(mode == BuildMode::Debug, cfg!(debug_assertions));
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Session settings derived from the environment.
pub struct SessionSettings {
    /// Signing and encryption key derived from `AUTH_SECRET`.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
    /// `SameSite` policy for session cookies.
    pub same_site: SameSite,
    /// Validity window for issued sessions.
    pub ttl: TimeDelta,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// The signing secret is too short to derive a key from.
    #[error("{name} too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort {
        name: &'static str,
        length: usize,
        min_len: usize,
    },
    /// `SameSite=None` requires a secure cookie in release builds.
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
}

/// Build session settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use dashboard::inbound::http::session_config::{BuildMode, session_settings_from_env};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "AUTH_SECRET" => Some("s".repeat(32)),
///     "SESSION_COOKIE_SECURE" => Some("1".to_string()),
///     _ => None,
/// });
///
/// let settings = session_settings_from_env(&env, BuildMode::Release).unwrap();
/// assert!(settings.cookie_secure);
/// assert_eq!(settings.ttl.num_minutes(), 120);
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let key = key_from_env(env)?;
    let cookie_secure = parsing::cookie_secure(env, mode)?;
    let same_site = parsing::same_site(env, mode, cookie_secure)?;
    let ttl = parsing::ttl(env, mode, TimeDelta::minutes(DEFAULT_SESSION_TTL_MINUTES))?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
        ttl,
    })
}

fn key_from_env<E: Env>(env: &E) -> Result<Key, SessionConfigError> {
    let secret = env
        .string(AUTH_SECRET_ENV)
        .map(Zeroizing::new)
        .ok_or(SessionConfigError::MissingEnv {
            name: AUTH_SECRET_ENV,
        })?;
    let length = secret.len();
    if length < AUTH_SECRET_MIN_LEN {
        return Err(SessionConfigError::SecretTooShort {
            name: AUTH_SECRET_ENV,
            length,
            min_len: AUTH_SECRET_MIN_LEN,
        });
    }
    Ok(Key::derive_from(secret.as_bytes()))
}
