//! Password hashing helpers
//!
//! Accounts never store the raw password, only an argon2 digest in PHC
//! string format.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a raw password into a PHC-format digest
pub fn hash_password(raw: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let digest = Argon2::default().hash_password(raw.as_bytes(), &salt)?;
    Ok(digest.to_string())
}

/// Verify a raw password against a stored digest
///
/// An unparseable digest verifies as false rather than erroring; the
/// caller cannot do anything more useful with a mangled digest than
/// reject the login.
pub fn verify_password(raw: &str, digest: &str) -> bool {
    match PasswordHash::new(digest) {
        Ok(parsed) => Argon2::default()
            .verify_password(raw.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
