//! Value parsers for the session environment variables.
//!
//! Each parser returns the configured value, or hands a
//! [`SessionConfigError`] to [`BuildMode::tolerate`], which logs it and falls
//! back in debug builds.

use actix_web::cookie::SameSite;
use chrono::TimeDelta;
use mockable::Env;
use tracing::warn;

use super::{BuildMode, COOKIE_SECURE_ENV, SAMESITE_ENV, SessionConfigError, TTL_MINUTES_ENV};

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";
const TTL_EXPECTED: &str = "a positive number of minutes";

impl BuildMode {
    /// Release builds surface `error`; debug builds log it and use `fallback`.
    pub(super) fn tolerate<T>(
        self,
        fallback: T,
        error: SessionConfigError,
    ) -> Result<T, SessionConfigError> {
        if self.is_debug() {
            warn!(%error, "session setting fell back to its default");
            Ok(fallback)
        } else {
            Err(error)
        }
    }
}

/// `SESSION_COOKIE_SECURE`: must be set in release builds, defaults on.
pub(super) fn cookie_secure<E: Env>(env: &E, mode: BuildMode) -> Result<bool, SessionConfigError> {
    let Some(value) = env.string(COOKIE_SECURE_ENV) else {
        return mode.tolerate(
            true,
            SessionConfigError::MissingEnv {
                name: COOKIE_SECURE_ENV,
            },
        );
    };
    match flag(&value) {
        Some(secure) => Ok(secure),
        None => mode.tolerate(
            true,
            SessionConfigError::InvalidEnv {
                name: COOKIE_SECURE_ENV,
                value,
                expected: BOOL_EXPECTED,
            },
        ),
    }
}

/// `SESSION_SAMESITE`: optional, defaults to `Lax`. `None` needs a secure cookie.
pub(super) fn same_site<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let Some(value) = env.string(SAMESITE_ENV) else {
        return Ok(SameSite::Lax);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" => mode
            .tolerate((), SessionConfigError::InsecureSameSiteNone)
            .map(|()| SameSite::None),
        _ => mode.tolerate(
            SameSite::Lax,
            SessionConfigError::InvalidEnv {
                name: SAMESITE_ENV,
                value,
                expected: SAMESITE_EXPECTED,
            },
        ),
    }
}

/// `SESSION_TTL_MINUTES`: optional, falls back to `default`.
pub(super) fn ttl<E: Env>(
    env: &E,
    mode: BuildMode,
    default: TimeDelta,
) -> Result<TimeDelta, SessionConfigError> {
    let Some(value) = env.string(TTL_MINUTES_ENV) else {
        return Ok(default);
    };
    match value.trim().parse::<u32>() {
        Ok(minutes) if minutes > 0 => Ok(TimeDelta::minutes(i64::from(minutes))),
        _ => mode.tolerate(
            default,
            SessionConfigError::InvalidEnv {
                name: TTL_MINUTES_ENV,
                value,
                expected: TTL_EXPECTED,
            },
        ),
    }
}

fn flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
