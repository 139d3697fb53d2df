// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Keyward vault core.

use thiserror::Error;

/// The error type returned by every fallible Keyward operation.
///
/// Messages never carry passphrases, key bytes, or plaintext.
#[derive(Debug, Error)]
pub enum KeywardError {
    /// Malformed base64 input at the transport boundary.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Empty passphrase, invalid KDF parameters, or a failing KDF primitive.
    #[error("key derivation error: {0}")]
    KeyDerivation(String),

    /// Passphrase rejected by the account verifier, or a missing/corrupt salt.
    ///
    /// Treated as account-level and never retried silently.
    #[error("authentication error: {0}")]
    Authentication(String),

    /// AEAD authentication failure: wrong key, tampered or corrupted data.
    #[error("decryption error: {0}")]
    Decryption(String),

    /// An operation needing the master key was attempted while locked.
    #[error("vault is locked")]
    VaultLocked,

    /// Invalid configuration handed to the core.
    #[error("configuration error: {0}")]
    Config(String),

    /// CSPRNG or primitive setup failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl KeywardError {
    /// Whether the caller can recover by prompting for the passphrase and
    /// retrying the same logical operation.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, KeywardError::VaultLocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_vault_locked_is_recoverable() {
        assert!(KeywardError::VaultLocked.is_recoverable());
        assert!(!KeywardError::Decryption("x".into()).is_recoverable());
        assert!(!KeywardError::Authentication("x".into()).is_recoverable());
        assert!(!KeywardError::KeyDerivation("x".into()).is_recoverable());
        assert!(!KeywardError::Encoding("x".into()).is_recoverable());
    }

    #[test]
    fn decryption_message_is_prefixed() {
        let err = KeywardError::Decryption("invalid key or corrupted DEK".into());
        assert_eq!(err.to_string(), "decryption error: invalid key or corrupted DEK");
    }
}
