//! Symmetric encryption of serialized identity snapshots embedded as an
//! opaque token claim.
//!
//! AES-256-GCM with a random 96-bit nonce prepended to the ciphertext.
//! The key is derived once from the injected process secret; the cipher
//! never touches the environment itself.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

use crate::domain::Error;
use crate::domain::auth::ProcessSecret;

const NONCE_LEN: usize = 12;

/// Encrypts and decrypts claim payloads under a process-wide key.
#[derive(Clone)]
pub struct ClaimCipher {
    key: [u8; 32],
}

impl std::fmt::Debug for ClaimCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose key material through Debug output.
        f.debug_struct("ClaimCipher").finish_non_exhaustive()
    }
}

impl ClaimCipher {
    /// Derive the cipher key from the injected process secret.
    pub fn new(secret: &ProcessSecret) -> Self {
        let key = Sha256::digest(secret.expose());
        Self { key: key.into() }
    }

    fn cipher(&self) -> Result<Aes256Gcm, Error> {
        Aes256Gcm::new_from_slice(&self.key)
            .map_err(|err| Error::internal(format!("failed to build the claim cipher: {err}")))
    }

    /// Encrypt a plaintext payload to `base64(nonce || ciphertext)`.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, Error> {
        let cipher = self.cipher()?;

        let mut nonce_bytes = [0_u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from(nonce_bytes);

        let ciphertext = cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|err| Error::internal(format!("claim encryption failed: {err}")))?;

        let mut payload = nonce_bytes.to_vec();
        payload.extend_from_slice(&ciphertext);
        Ok(BASE64.encode(payload))
    }

    /// Decrypt a payload produced by [`Self::encrypt`].
    ///
    /// Tampered, truncated, or foreign-key ciphertext is rejected as an
    /// authentication failure since it can only arrive in a presented
    /// token.
    pub fn decrypt(&self, encoded: &str) -> Result<String, Error> {
        let payload = BASE64
            .decode(encoded)
            .map_err(|_| Error::unauthorized("claim payload is not valid base64"))?;
        if payload.len() < NONCE_LEN {
            return Err(Error::unauthorized("claim payload is too short"));
        }
        let (nonce_bytes, ciphertext) = payload.split_at(NONCE_LEN);

        let cipher = self.cipher()?;
        let plaintext = cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| Error::unauthorized("claim payload failed authentication"))?;

        String::from_utf8(plaintext)
            .map_err(|_| Error::unauthorized("claim payload is not valid UTF-8"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::{fixture, rstest};

    #[fixture]
    fn cipher() -> ClaimCipher {
        ClaimCipher::new(&ProcessSecret::from_value("test process secret"))
    }

    #[rstest]
    #[case("")]
    #[case("{\"username\":\"ada\"}")]
    #[case("päyload with unicode ✓")]
    fn round_trips_arbitrary_payloads(cipher: ClaimCipher, #[case] payload: &str) {
        let encrypted = cipher.encrypt(payload).expect("encrypt");
        assert_eq!(cipher.decrypt(&encrypted).expect("decrypt"), payload);
    }

    #[rstest]
    fn nonces_differ_per_encryption(cipher: ClaimCipher) {
        let a = cipher.encrypt("same").expect("encrypt");
        let b = cipher.encrypt("same").expect("encrypt");
        assert_ne!(a, b);
    }

    #[rstest]
    fn tampered_ciphertext_is_rejected(cipher: ClaimCipher) {
        let encrypted = cipher.encrypt("payload").expect("encrypt");
        let mut bytes = BASE64.decode(&encrypted).expect("decode");
        if let Some(last) = bytes.last_mut() {
            *last ^= 0xff;
        }
        let err = cipher.decrypt(&BASE64.encode(bytes)).unwrap_err();
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    fn foreign_key_ciphertext_is_rejected(cipher: ClaimCipher) {
        let other = ClaimCipher::new(&ProcessSecret::from_value("another secret"));
        let encrypted = other.encrypt("payload").expect("encrypt");
        assert!(cipher.decrypt(&encrypted).is_err());
    }

    #[rstest]
    fn garbage_input_is_rejected(cipher: ClaimCipher) {
        assert!(cipher.decrypt("not base64 at all ***").is_err());
        assert!(cipher.decrypt(&BASE64.encode([1, 2, 3])).is_err());
    }
}
