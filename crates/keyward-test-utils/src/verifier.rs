// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock account verifier.
//!
//! Counts every call so tests can assert that locked operations never reach
//! the account collaborator or the KDF.

use std::sync::atomic::{AtomicUsize, Ordering};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use keyward_core::{AccountVerifier, KeywardError};
use secrecy::{ExposeSecret, SecretString};

/// Salt bytes used by [`MockVerifier::new`].
pub const TEST_SALT: [u8; 16] = [0x5A; 16];

/// An account with a fixed salt that accepts exactly one passphrase.
#[derive(Debug)]
pub struct MockVerifier {
    passphrase: String,
    salt: Option<String>,
    fail_with: Option<String>,
    salt_calls: AtomicUsize,
    verify_calls: AtomicUsize,
}

impl MockVerifier {
    /// An account that accepts `passphrase`, with [`TEST_SALT`] on record.
    pub fn new(passphrase: &str) -> Self {
        Self {
            passphrase: passphrase.to_string(),
            salt: Some(STANDARD.encode(TEST_SALT)),
            fail_with: None,
            salt_calls: AtomicUsize::new(0),
            verify_calls: AtomicUsize::new(0),
        }
    }

    /// Replace the salt on record. `None` models an account with no salt.
    pub fn with_salt(mut self, salt: Option<&str>) -> Self {
        self.salt = salt.map(str::to_string);
        self
    }

    /// Make every collaborator call fail, as if the account backend were down.
    pub fn failing(mut self, message: &str) -> Self {
        self.fail_with = Some(message.to_string());
        self
    }

    pub fn salt_calls(&self) -> usize {
        self.salt_calls.load(Ordering::SeqCst)
    }

    pub fn verify_calls(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }

    fn check_backend(&self) -> Result<(), KeywardError> {
        match &self.fail_with {
            Some(message) => Err(KeywardError::Authentication(message.clone())),
            None => Ok(()),
        }
    }
}

impl AccountVerifier for MockVerifier {
    fn salt(&self) -> Result<Option<String>, KeywardError> {
        self.salt_calls.fetch_add(1, Ordering::SeqCst);
        self.check_backend()?;
        Ok(self.salt.clone())
    }

    fn verify_passphrase(&self, passphrase: &SecretString) -> Result<bool, KeywardError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        self.check_backend()?;
        Ok(passphrase.expose_secret() == self.passphrase)
    }
}
