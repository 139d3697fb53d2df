// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The surface the UI talks to.
//!
//! `VaultCrypto` owns the session and routes every storage operation through
//! [`SessionKeyManager::with_key`], so nothing cryptographic happens while the
//! vault is locked. Writes always produce envelope records; reads accept both
//! shapes.

use std::sync::Arc;
use std::time::Duration;

use keyward_config::KeywardConfig;
use keyward_core::{AccountVerifier, Clock, KeywardError};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};

use crate::envelope::{decrypt_envelope, encrypt_envelope};
use crate::keys::MasterKey;
use crate::legacy::decrypt_direct;
use crate::record::{EnvelopeForm, StoredSecret};
use crate::session::{LockListener, SessionKeyManager};

#[derive(Debug)]
pub struct VaultCrypto {
    session: SessionKeyManager,
}

impl VaultCrypto {
    pub fn new(config: &KeywardConfig, verifier: Arc<dyn AccountVerifier>) -> Self {
        Self::from_session(SessionKeyManager::new(config, verifier))
    }

    pub fn from_session(session: SessionKeyManager) -> Self {
        Self { session }
    }

    /// Replace the clock used for inactivity deadlines.
    pub fn with_clock(self, clock: Arc<dyn Clock>) -> Self {
        Self::from_session(self.session.with_clock(clock))
    }

    pub fn unlock(&mut self, passphrase: &SecretString) -> Result<(), KeywardError> {
        self.session.unlock(passphrase)
    }

    pub fn lock(&mut self) {
        self.session.lock();
    }

    pub fn sign_out(&mut self) {
        self.session.sign_out();
    }

    pub fn is_locked(&mut self) -> bool {
        self.session.is_locked()
    }

    /// See [`SessionKeyManager::poll_expiry`].
    pub fn poll_expiry(&mut self) -> bool {
        self.session.poll_expiry()
    }

    pub fn remaining(&mut self) -> Option<Duration> {
        self.session.remaining()
    }

    /// Register a session-expired listener.
    pub fn on_lock(&mut self, listener: LockListener) {
        self.session.on_lock(listener);
    }

    /// Encrypt a secret for persistence. Always produces an envelope record.
    pub fn encrypt_for_storage(&mut self, secret: &str) -> Result<EnvelopeForm, KeywardError> {
        self.session.with_key(|mek| encrypt_envelope(secret, mek))
    }

    /// Decrypt a stored record of either shape.
    pub fn decrypt_from_storage(
        &mut self,
        record: &StoredSecret,
    ) -> Result<SecretString, KeywardError> {
        self.session.with_key(|mek| decrypt_record(record, mek))
    }

    /// Decrypt a record and re-encrypt it as a fresh envelope.
    ///
    /// Legacy records come back upgraded; envelope records get a new DEK and
    /// new nonces.
    pub fn reseal(&mut self, record: &StoredSecret) -> Result<EnvelopeForm, KeywardError> {
        self.session.with_key(|mek| {
            let secret = decrypt_record(record, mek)?;
            let resealed = encrypt_envelope(secret.expose_secret(), mek)?;
            info!(from_legacy = record.is_legacy(), "record resealed");
            Ok(resealed)
        })
    }
}

fn decrypt_record(record: &StoredSecret, mek: &MasterKey) -> Result<SecretString, KeywardError> {
    match record {
        StoredSecret::Envelope(form) => decrypt_envelope(form, mek),
        StoredSecret::Legacy(form) => {
            debug!("decrypting legacy record, reseal on next write");
            decrypt_direct(form, mek)
        }
    }
}

/// Mask a secret for display, showing only the first and last four
/// characters. Values shorter than ten characters are fully masked.
pub fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() < 10 {
        return "****".to_string();
    }
    let prefix: String = chars[..4].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();
    format!("{prefix}...{suffix}")
}
