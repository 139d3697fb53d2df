// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Account collaborator for offline use.
//!
//! The CLI has no account server to confirm the passphrase against, so it
//! accepts any passphrase. A wrong one derives a different master key and
//! surfaces as a decryption error on the first record read.

use keyward_core::{AccountVerifier, KeywardError};
use secrecy::SecretString;

#[derive(Debug, Clone)]
pub struct OfflineAccount {
    salt: String,
}

impl OfflineAccount {
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }
}

impl AccountVerifier for OfflineAccount {
    fn salt(&self) -> Result<Option<String>, KeywardError> {
        Ok(Some(self.salt.clone()))
    }

    fn verify_passphrase(&self, _passphrase: &SecretString) -> Result<bool, KeywardError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hands_back_the_given_salt() {
        let account = OfflineAccount::new("c2FsdA==");
        assert_eq!(account.salt().unwrap().as_deref(), Some("c2FsdA=="));
        assert!(account
            .verify_passphrase(&SecretString::from("anything".to_string()))
            .unwrap());
    }
}
