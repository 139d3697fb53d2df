// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Account verifier trait: the server-side half of unlocking.

use secrecy::SecretString;

use crate::error::KeywardError;

/// The external account service consulted before a passphrase is used.
///
/// Implementations talk to whatever authenticates the user (an HTTP API, a
/// local account file). The core never sends the derived key anywhere.
pub trait AccountVerifier: Send + Sync {
    /// Returns the user's persisted salt as base64, or `None` if the account
    /// has no salt on record.
    fn salt(&self) -> Result<Option<String>, KeywardError>;

    /// Confirms the passphrase against the account. `Ok(false)` means the
    /// passphrase was rejected; `Err` means the check itself failed.
    fn verify_passphrase(&self, passphrase: &SecretString) -> Result<bool, KeywardError>;
}
