//! Password hashing utilities

use bcrypt::{hash, verify, DEFAULT_COST};

/// Hash a password using bcrypt
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password, DEFAULT_COST)
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_the_original_password() {
        let hashed = hash_password("hunter22").unwrap();
        assert_ne!(hashed, "hunter22");
        assert!(verify_password("hunter22", &hashed).unwrap());
        assert!(!verify_password("hunter23", &hashed).unwrap());
    }
}
