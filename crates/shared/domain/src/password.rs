//! Password value object and the credential hasher seam.
//!
//! The plaintext never leaves this module in any form other than an Argon2
//! PHC string. Every hash carries its own random salt, so hashing the same
//! plaintext twice yields different values.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{DomainError, DomainResult};

/// Hashed password as stored by the user store.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plaintext password with a fresh salt.
    ///
    /// Length and complexity are the registration validator's concern;
    /// this only performs the one-way transform.
    pub fn new(plain_text: &str) -> DomainResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::password(format!("Password hash failed: {}", e)))?;
        Ok(Self {
            hash: hash.to_string(),
        })
    }

    /// Wrap a hash loaded from the database.
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plaintext password against this hash.
    ///
    /// A hash that cannot be parsed never verifies.
    pub fn verify(&self, plain_text: &str) -> bool {
        match PasswordHash::new(&self.hash) {
            Ok(parsed) => Self::argon2()
                .verify_password(plain_text.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

/// One-way transform of plaintext passwords into their stored form.
pub trait CredentialHasher: Send + Sync {
    /// Hash a plaintext password.
    fn hash(&self, plain_text: &str) -> DomainResult<Password>;

    /// Compare a plaintext password with a stored hash.
    fn verify(&self, plain_text: &str, stored: &Password) -> bool;
}

/// Argon2id hasher with the crate's default parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, plain_text: &str) -> DomainResult<Password> {
        Password::new(plain_text)
    }

    fn verify(&self, plain_text: &str, stored: &Password) -> bool {
        stored.verify(plain_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let plain = "P4ssword@";
        let password = Password::new(plain).unwrap();

        assert!(password.verify(plain));
        assert!(!password.verify("P4ssword#"));
    }

    #[test]
    fn test_hash_differs_from_plaintext() {
        let plain = "P4ssword@";
        let password = Password::new(plain).unwrap();

        assert_ne!(password.as_str(), plain);
        assert!(password.as_str().starts_with("$argon2"));
    }

    #[test]
    fn test_password_from_hash() {
        let plain = "TestPassword123";
        let hash = Password::new(plain).unwrap().into_string();

        let restored = Password::from_hash(hash);
        assert!(restored.verify(plain));
    }

    #[test]
    fn test_same_password_different_salts() {
        let plain = "SamePassword123";
        let pass1 = Password::new(plain).unwrap();
        let pass2 = Password::new(plain).unwrap();

        assert_ne!(pass1.as_str(), pass2.as_str());
        assert!(pass1.verify(plain));
        assert!(pass2.verify(plain));
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        let stored = Password::from_hash("not-a-phc-string");
        assert!(!stored.verify("not-a-phc-string"));
    }

    #[test]
    fn test_argon2_hasher_roundtrip() {
        let hasher = Argon2Hasher;
        let stored = hasher.hash("Secr3t=pass").unwrap();

        assert!(hasher.verify("Secr3t=pass", &stored));
        assert!(!hasher.verify("secr3t=pass", &stored));
    }

    #[test]
    fn test_debug_redacts_hash() {
        let password = Password::new("P4ssword@").unwrap();
        let debug = format!("{:?}", password);

        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains(password.as_str()));
    }
}
