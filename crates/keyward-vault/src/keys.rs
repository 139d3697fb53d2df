// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key material types.
//!
//! Both key types are zeroized on drop and redact themselves in `Debug`.
//! Neither implements `Clone`: a key has exactly one owner.

use keyward_core::KeywardError;
use ring::rand::{SecureRandom, SystemRandom};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of every symmetric key in bytes.
pub const KEY_LEN: usize = 32;

/// The passphrase-derived master encryption key (MEK).
///
/// Encrypts per-secret data keys, and secrets directly in legacy records.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct MasterKey([u8; KEY_LEN]);

impl MasterKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw key bytes. Use only for an immediate cipher operation.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MasterKey([REDACTED])")
    }
}

/// A per-secret data encryption key (DEK).
///
/// A new one is generated for every encryption; it only outlives the call in
/// MEK-encrypted form.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DataKey([u8; KEY_LEN]);

impl DataKey {
    /// Generate a fresh random DEK from the system CSPRNG.
    pub fn generate() -> Result<Self, KeywardError> {
        let mut key = [0u8; KEY_LEN];
        SystemRandom::new()
            .fill(&mut key)
            .map_err(|_| KeywardError::Internal("failed to generate data key".to_string()))?;
        Ok(Self(key))
    }

    /// Rebuild a DEK from decrypted bytes. Fails unless exactly 32 bytes.
    pub(crate) fn from_slice(bytes: &[u8]) -> Option<Self> {
        let key: [u8; KEY_LEN] = bytes.try_into().ok()?;
        Some(Self(key))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for DataKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DataKey([REDACTED])")
    }
}

#[cfg(test)]
pub(crate) fn test_master_key(byte: u8) -> MasterKey {
    MasterKey::from_bytes([byte; KEY_LEN])
}
