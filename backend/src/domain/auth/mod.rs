//! Credential verification, claim encryption, and token issuance.

mod claim_cipher;
pub mod password;
mod secret;
mod token;

pub use claim_cipher::ClaimCipher;
pub use secret::ProcessSecret;
pub use token::{TOKEN_TTL_DAYS, TokenClaims, TokenIssuer};
