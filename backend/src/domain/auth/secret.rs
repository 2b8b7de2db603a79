//! Process-wide secret provisioning for the claim cipher and token signer.
//!
//! The secret is read from the environment exactly once at bootstrap and
//! injected into constructors, never fetched ad hoc at call time. This
//! keeps the crypto components testable with fixed keys.

use zeroize::Zeroizing;

use crate::domain::Error;

/// The single symmetric secret shared by the claim cipher and the token
/// signing key. Wiped from memory on drop.
#[derive(Clone)]
pub struct ProcessSecret(Zeroizing<Vec<u8>>);

impl std::fmt::Debug for ProcessSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose key material through Debug output.
        f.debug_tuple("ProcessSecret").finish()
    }
}

impl ProcessSecret {
    /// Read the secret from the named environment variable.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the variable is absent or empty;
    /// callers are expected to fail fast rather than retry.
    pub fn from_env(variable: &str) -> Result<Self, Error> {
        match std::env::var(variable) {
            Ok(value) if !value.trim().is_empty() => Ok(Self::from_value(value)),
            Ok(_) => Err(Error::configuration(format!(
                "environment variable {variable} holding the private key is empty"
            ))),
            Err(_) => Err(Error::configuration(format!(
                "environment variable {variable} holding the private key is not set"
            ))),
        }
    }

    /// Wrap an already-obtained secret value, e.g. a fixed test key.
    pub fn from_value(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into().into_bytes()))
    }

    /// Raw secret bytes for key derivation.
    pub fn expose(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn missing_variable_is_a_configuration_error() {
        let err = ProcessSecret::from_env("GAZETTEER_TEST_SECRET_UNSET").unwrap_err();
        assert_eq!(err.code(), ErrorCode::Configuration);
    }

    #[rstest]
    fn fixed_values_round_trip() {
        let secret = ProcessSecret::from_value("hunter2");
        assert_eq!(secret.expose(), b"hunter2");
    }
}
