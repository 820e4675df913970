//! Salted password hashes as stored in the users table.
//!
//! Stored hashes are opaque strings; they are only parsed when a candidate
//! password is checked, and a string that fails to parse never verifies.
//! Rows provisioned before Argon2 carry bcrypt hashes (`$2a$`, `$2b$`,
//! `$2y$`), so verification dispatches on the prefix. New hashes are always
//! Argon2id PHC strings.

use argon2::password_hash::{self, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

const BCRYPT_PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];

/// Password hash as read from the users table.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap a stored hash string without validating it.
    pub fn from_phc(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// Hash `plain` with Argon2id and a fresh random salt.
    pub fn generate(plain: &str) -> Result<Self, password_hash::Error> {
        let salt_bytes: [u8; 16] = rand::random();
        let salt = SaltString::encode_b64(&salt_bytes)?;
        let phc = Argon2::default().hash_password(plain.as_bytes(), &salt)?;
        Ok(Self(phc.to_string()))
    }

    /// Check `candidate` against the stored hash in constant time.
    pub fn verify(&self, candidate: &str) -> bool {
        if self.is_bcrypt() {
            return bcrypt::verify(candidate, &self.0).unwrap_or(false);
        }
        match password_hash::PasswordHash::new(&self.0) {
            Ok(parsed) => Argon2::default()
                .verify_password(candidate.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    fn is_bcrypt(&self) -> bool {
        BCRYPT_PREFIXES
            .iter()
            .any(|prefix| self.0.starts_with(prefix))
    }
}

// Keep hashes out of logs.
impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    // bcrypt's minimum cost keeps the suite fast.
    const TEST_BCRYPT_COST: u32 = 4;

    #[fixture]
    fn stored() -> PasswordHash {
        PasswordHash::generate("123456").expect("hashing succeeds")
    }

    #[fixture]
    fn legacy() -> PasswordHash {
        PasswordHash::from_phc(bcrypt::hash("123456", TEST_BCRYPT_COST).expect("bcrypt hash"))
    }

    #[rstest]
    fn generated_hash_is_phc(stored: PasswordHash) {
        assert!(stored.as_str().starts_with("$argon2id$"));
    }

    #[rstest]
    #[case("123456", true)]
    #[case("1234567", false)]
    #[case("", false)]
    fn verifies_only_matching_password(
        stored: PasswordHash,
        #[case] candidate: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(stored.verify(candidate), expected);
    }

    #[rstest]
    #[case("123456", true)]
    #[case("1234567", false)]
    #[case("", false)]
    fn bcrypt_hashes_verify(
        legacy: PasswordHash,
        #[case] candidate: &str,
        #[case] expected: bool,
    ) {
        assert!(legacy.as_str().starts_with("$2b$"));
        assert_eq!(legacy.verify(candidate), expected);
    }

    #[rstest]
    fn provisioned_bcrypt_hash_verifies() {
        let seeded = PasswordHash::from_phc(
            "$2b$12$4u9JF7CtSkX0BTwIh9Y9S.4IIX4huB8eR6mkUoigfKwOJBSiZjTKK",
        );
        assert!(seeded.verify("123456"));
        assert!(!seeded.verify("654321"));
    }

    #[rstest]
    fn two_y_prefix_is_accepted(legacy: PasswordHash) {
        let rewritten = legacy.as_str().replacen("$2b$", "$2y$", 1);
        assert!(PasswordHash::from_phc(rewritten).verify("123456"));
    }

    #[rstest]
    #[case("")]
    #[case("plaintext")]
    #[case("$2b$10$truncated")]
    #[case("$argon2id$v=19$broken")]
    fn malformed_hash_never_verifies(#[case] raw: &str) {
        assert!(!PasswordHash::from_phc(raw).verify("plaintext"));
    }

    #[rstest]
    fn debug_output_hides_hash(stored: PasswordHash) {
        assert_eq!(format!("{stored:?}"), "PasswordHash(..)");
    }
}
