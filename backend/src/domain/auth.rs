//! Authentication primitives: login credentials and the rejection type.
//!
//! Inbound payload parsing stays outside the domain; handlers pass raw
//! strings and these constructors decide whether they are worth a lookup.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use zeroize::Zeroizing;

/// Minimum accepted password length, in characters.
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Reasons login input fails its schema check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was blank or not shaped like an address.
    InvalidEmail,
    /// Password shorter than [`PASSWORD_MIN_LENGTH`].
    PasswordTooShort { min: usize },
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Rejection returned by the credential verifier.
///
/// Every failure path collapses into one variant so callers cannot tell an
/// unknown email from a wrong password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials.")]
    InvalidCredentials,
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed and syntactically an address.
/// - `password` has at least [`PASSWORD_MIN_LENGTH`] characters and keeps
///   caller whitespace; it is zeroed on drop.
///
/// # Examples
/// ```
/// use dashboard::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" user@nextmail.com ", "123456").unwrap();
/// assert_eq!(creds.email(), "user@nextmail.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if !email_regex().is_match(normalized) {
            return Err(LoginValidationError::InvalidEmail);
        }
        if password.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(LoginValidationError::PasswordTooShort {
                min: PASSWORD_MIN_LENGTH,
            });
        }
        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used for the user lookup.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
