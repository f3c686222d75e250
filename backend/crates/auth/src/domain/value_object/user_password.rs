//! User Password Value Object
//!
//! Domain wrappers over `platform::password`. The hash is computed once, at
//! registration, and afterwards only ever verified against. Neither type
//! can be serialized, and both redact themselves from `Debug`.
//!
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//! use platform::password::HashCost;
//!
//! let raw = RawPassword::new("secret123".to_string()).unwrap();
//! let hashed = UserPassword::from_raw(&raw, &HashCost::minimal()).unwrap();
//! assert!(hashed.verify(&raw).unwrap());
//! ```

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{
    ClearTextPassword, HashCost, HashedPassword, PasswordHashError, PasswordPolicyError,
};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Password as typed by the user, zeroized on drop
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Accept a new password at registration, enforcing the policy
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooLong { max, .. } => {
                AppError::bad_request(format!("Password must be at most {} characters", max))
            }
            PasswordPolicyError::EmptyOrWhitespace => {
                AppError::bad_request("Password cannot be empty")
            }
            PasswordPolicyError::InvalidCharacter => {
                AppError::bad_request("Password contains invalid characters")
            }
        })?;

        Ok(Self(clear_text))
    }

    /// Wrap a password presented at login. Never fails.
    pub fn for_verification(raw: String) -> Self {
        Self(ClearTextPassword::for_verification(raw))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Argon2id PHC string as held by the credential store
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a registration password. CPU-bound; call off the async executor.
    pub fn from_raw(raw: &RawPassword, cost: &HashCost) -> AppResult<Self> {
        raw.0
            .hash(cost)
            .map(Self)
            .map_err(|e| AppError::internal("Password hashing failed").with_source(e))
    }

    /// Rehydrate from the credential store
    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        HashedPassword::from_phc_string(phc_string)
            .map(Self)
            .map_err(|e| AppError::internal("Invalid password hash in store").with_source(e))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Constant-time check. CPU-bound; call off the async executor.
    ///
    /// `Ok(false)` is a wrong password; `Err` is a corrupt stored hash.
    pub fn verify(&self, raw: &RawPassword) -> AppResult<bool> {
        self.0.verify(&raw.0).map_err(|e| match e {
            PasswordHashError::InvalidHashFormat => {
                AppError::internal("Invalid password hash in store").with_source(e)
            }
            other => AppError::internal("Password verification failed").with_source(other),
        })
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::error::kind::ErrorKind;

    fn cost() -> HashCost {
        HashCost::minimal()
    }

    #[test]
    fn test_raw_password_policy() {
        assert!(RawPassword::new("secret123".to_string()).is_ok());

        assert!(RawPassword::new("abc".to_string()).is_ok());

        let err = RawPassword::new("   ".to_string()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);

        use platform::password::MAX_PASSWORD_LENGTH;
        assert!(RawPassword::new("a".repeat(MAX_PASSWORD_LENGTH + 1)).is_err());
        assert!(RawPassword::new(String::new()).is_err());
    }

    #[test]
    fn test_login_password_skips_policy() {
        // Blank could never be registered, but presenting it must not be an error
        let raw = RawPassword::for_verification("   ".to_string());
        let hashed =
            UserPassword::from_raw(&RawPassword::new("secret123".to_string()).unwrap(), &cost())
                .unwrap();
        assert!(!hashed.verify(&raw).unwrap());
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("secret123".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, &cost()).unwrap();

        assert!(hashed.verify(&raw).unwrap());

        let wrong = RawPassword::for_verification("wrong".to_string());
        assert!(!hashed.verify(&wrong).unwrap());
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let raw = RawPassword::new("secret123".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, &cost()).unwrap();

        let restored = UserPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(&raw).unwrap());
    }

    #[test]
    fn test_corrupt_hash_is_internal() {
        let err = UserPassword::from_phc_string("not-a-phc-string").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InternalServerError);
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("SecretPassword123!".to_string()).unwrap();
        let debug = format!("{:?}", raw);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("Secret"));

        let hashed = UserPassword::from_raw(&raw, &cost()).unwrap();
        let debug = format!("{:?}", hashed);
        assert!(debug.contains("[HASH]"));
        assert!(!debug.contains("argon2"));
    }
}
