//! Access token minting and verification.
//!
//! Tokens are compact three-part JWTs signed HMAC-SHA512 under the
//! process secret. The claims carry the username plus the encrypted
//! identity snapshot; tokens expire seven days after issuance and are
//! never persisted server-side.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::auth::{ClaimCipher, ProcessSecret};
use crate::domain::{Error, Outcome, User, UserSnapshot};

/// Token lifetime from issuance.
pub const TOKEN_TTL_DAYS: i64 = 7;

/// Wire-level claim set of an issued token.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Name identifier: the authenticated username.
    pub nameid: String,
    /// Base64 ciphertext of the serialized identity snapshot.
    pub user: String,
    /// Expiry as a unix timestamp.
    pub exp: i64,
}

/// Builds and signs access tokens, and verifies presented ones.
#[derive(Clone)]
pub struct TokenIssuer {
    cipher: ClaimCipher,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer").finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Construct the issuer from the injected process secret.
    ///
    /// The same secret keys both the claim cipher and the HMAC signature,
    /// mirroring how the deployment provisions a single private value.
    pub fn new(secret: &ProcessSecret) -> Self {
        Self {
            cipher: ClaimCipher::new(secret),
            encoding_key: EncodingKey::from_secret(secret.expose()),
            decoding_key: DecodingKey::from_secret(secret.expose()),
        }
    }

    /// Mint a signed token for a verified identity.
    ///
    /// Failures (snapshot serialization, claim encryption, signing) are
    /// reported through the envelope; nothing escapes this boundary.
    pub fn issue(&self, user: &User) -> Outcome<String> {
        match self.try_issue(user) {
            Ok(token) => Outcome::success(token),
            Err(cause) => Outcome::failure_with_cause(
                "failed to generate the user access token",
                cause,
            ),
        }
    }

    fn try_issue(&self, user: &User) -> Result<String, Error> {
        let snapshot = UserSnapshot::from(user);
        let serialized = serde_json::to_string(&snapshot)
            .map_err(|err| Error::internal(format!("failed to serialize user snapshot: {err}")))?;

        let claims = TokenClaims {
            nameid: user.username.clone(),
            user: self.cipher.encrypt(&serialized)?,
            exp: (Utc::now() + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS512), &claims, &self.encoding_key)
            .map_err(|err| Error::internal(format!("failed to sign the access token: {err}")))
    }

    /// Verify a presented token and recover the embedded identity
    /// snapshot.
    ///
    /// Used by the request-authentication path: signature and expiry are
    /// checked under the same key, then the `user` claim is decrypted.
    pub fn verify(&self, token: &str) -> Result<UserSnapshot, Error> {
        let data = decode::<TokenClaims>(
            token,
            &self.decoding_key,
            &Validation::new(Algorithm::HS512),
        )
        .map_err(|_| Error::unauthorized("access token is invalid or expired"))?;

        let serialized = self.cipher.decrypt(&data.claims.user)?;
        serde_json::from_str(&serialized)
            .map_err(|_| Error::unauthorized("access token carries a malformed identity claim"))
    }
}
