// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Passphrase key derivation.
//!
//! Argon2id (v0x13) is the primary KDF. PBKDF2-HMAC-SHA256 is available as an
//! explicitly configured fallback for runtimes that cannot spend the Argon2id
//! memory cost; it is not memory-hard, so a GPU attacker tests passphrases
//! orders of magnitude faster against it. Both produce a 32-byte key and are
//! deterministic in (passphrase, salt, parameters).

use std::num::NonZeroU32;

use keyward_config::validation::MIN_PBKDF2_ITERATIONS;
use keyward_config::{KdfAlgorithm, KdfConfig};
use keyward_core::KeywardError;
use ring::rand::{SecureRandom, SystemRandom};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use zeroize::Zeroizing;

use crate::codec;
use crate::keys::{MasterKey, KEY_LEN};

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// A derived master key together with the salt it was derived under.
#[derive(Debug)]
pub struct DerivedKey {
    pub key: MasterKey,
    pub salt: [u8; SALT_LEN],
}

impl DerivedKey {
    /// The salt in its transport encoding, for persisting at registration.
    pub fn salt_base64(&self) -> String {
        codec::to_base64(&self.salt)
    }
}

/// Derive the master key from a passphrase.
///
/// When `salt` is `None` a fresh random salt is generated (account creation);
/// otherwise the user's persisted salt is used (unlock).
pub fn derive_key(
    passphrase: &SecretString,
    salt: Option<&[u8; SALT_LEN]>,
    config: &KdfConfig,
) -> Result<DerivedKey, KeywardError> {
    let passphrase = passphrase.expose_secret();
    if passphrase.is_empty() {
        return Err(KeywardError::KeyDerivation(
            "passphrase cannot be empty".to_string(),
        ));
    }

    let salt = match salt {
        Some(salt) => *salt,
        None => generate_salt()?,
    };

    let mut output = Zeroizing::new([0u8; KEY_LEN]);
    match config.algorithm {
        KdfAlgorithm::Argon2id => argon2id(passphrase.as_bytes(), &salt, config, &mut output)?,
        KdfAlgorithm::Pbkdf2Sha256 => {
            pbkdf2_sha256(passphrase.as_bytes(), &salt, config, &mut output)?
        }
    }

    debug!(algorithm = ?config.algorithm, "master key derived");
    Ok(DerivedKey {
        key: MasterKey::from_bytes(*output),
        salt,
    })
}

fn argon2id(
    passphrase: &[u8],
    salt: &[u8; SALT_LEN],
    config: &KdfConfig,
    output: &mut [u8; KEY_LEN],
) -> Result<(), KeywardError> {
    let params = argon2::Params::new(
        config.memory_cost,
        config.iterations,
        config.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| KeywardError::KeyDerivation(format!("invalid Argon2id parameters: {e}")))?;

    argon2::Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params)
        .hash_password_into(passphrase, salt, output)
        .map_err(|e| KeywardError::KeyDerivation(format!("Argon2id key derivation failed: {e}")))
}

fn pbkdf2_sha256(
    passphrase: &[u8],
    salt: &[u8; SALT_LEN],
    config: &KdfConfig,
    output: &mut [u8; KEY_LEN],
) -> Result<(), KeywardError> {
    if config.pbkdf2_iterations < MIN_PBKDF2_ITERATIONS {
        return Err(KeywardError::KeyDerivation(format!(
            "PBKDF2 iteration count must be at least {MIN_PBKDF2_ITERATIONS}, got {}",
            config.pbkdf2_iterations
        )));
    }
    let iterations = NonZeroU32::new(config.pbkdf2_iterations).ok_or_else(|| {
        KeywardError::KeyDerivation("PBKDF2 iteration count must be non-zero".to_string())
    })?;
    ring::pbkdf2::derive(
        ring::pbkdf2::PBKDF2_HMAC_SHA256,
        iterations,
        salt,
        passphrase,
        output,
    );
    Ok(())
}

/// Generate a random 16-byte salt.
pub fn generate_salt() -> Result<[u8; SALT_LEN], KeywardError> {
    let mut salt = [0u8; SALT_LEN];
    SystemRandom::new()
        .fill(&mut salt)
        .map_err(|_| KeywardError::Internal("failed to generate random salt".to_string()))?;
    Ok(salt)
}
