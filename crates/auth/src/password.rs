//! Password hashing and verification.

use bcrypt::DEFAULT_COST;

use crate::{AuthError, AuthResult};

/// Hashes a plaintext password with bcrypt.
pub fn hash_password(password: &str) -> AuthResult<String> {
    bcrypt::hash(password, DEFAULT_COST).map_err(|e| AuthError::PasswordHashing(e.to_string()))
}

/// Verifies a plaintext password against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> AuthResult<bool> {
    bcrypt::verify(password, hash).map_err(|e| AuthError::PasswordHashing(e.to_string()))
}
