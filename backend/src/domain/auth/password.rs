//! Salted-hash credential hashing and verification.
//!
//! Hash = HMAC-SHA512(key = per-user salt, message = UTF-8 password). The
//! salt is generated fresh at registration and stored alongside the hash.
//! Verification recomputes the hash and compares constant-time, so neither
//! a length mismatch nor an early differing byte changes the timing
//! profile.

use hmac::{Hmac, Mac};
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::Sha512;
use subtle::ConstantTimeEq;

use crate::domain::Error;

type HmacSha512 = Hmac<Sha512>;

/// Length in bytes of the per-user salt generated at registration.
pub const SALT_LEN: usize = 64;

/// Generate a fresh random salt for one registration.
pub fn generate_salt() -> Vec<u8> {
    let mut salt = vec![0_u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Compute the stored hash for a plaintext password under the given salt.
///
/// # Errors
///
/// Only malformed input signals an error: an empty salt cannot key the
/// MAC and is rejected.
pub fn hash_password(password: &str, salt: &[u8]) -> Result<Vec<u8>, Error> {
    if salt.is_empty() {
        return Err(Error::invalid_request(
            "password salt must not be empty",
        ));
    }
    let mut mac = HmacSha512::new_from_slice(salt)
        .map_err(|err| Error::internal(format!("failed to key the password mac: {err}")))?;
    mac.update(password.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Verify a plaintext password against the stored hash/salt pair.
///
/// A well-formed mismatch is `Ok(false)`, never an error; only malformed
/// input (missing salt) fails.
pub fn verify_password(password: &str, stored_hash: &[u8], salt: &[u8]) -> Result<bool, Error> {
    let computed = hash_password(password, salt)?;
    // Slice ct_eq handles differing lengths by rejecting without an early
    // exit on content.
    Ok(computed.ct_eq(stored_hash).into())
}
