// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Passphrase acquisition via TTY prompt or the `KEYWARD_PASSPHRASE`
//! environment variable.

use std::io::IsTerminal;

use keyward_core::KeywardError;
use secrecy::SecretString;
use zeroize::Zeroizing;

/// The environment variable name for providing the passphrase.
pub const PASSPHRASE_ENV_VAR: &str = "KEYWARD_PASSPHRASE";

const NO_SOURCE: &str =
    "no passphrase provided; set KEYWARD_PASSPHRASE or run interactively";

/// Get the passphrase from the environment or an interactive prompt.
///
/// Priority:
/// 1. `KEYWARD_PASSPHRASE` (scripts, CI)
/// 2. Interactive TTY prompt via `rpassword`
pub fn get_passphrase() -> Result<SecretString, KeywardError> {
    if let Some(passphrase) = from_env() {
        return Ok(passphrase);
    }

    if std::io::stdin().is_terminal() {
        let passphrase = read_hidden("Passphrase: ")?;
        return into_secret(passphrase);
    }

    Err(KeywardError::Authentication(NO_SOURCE.to_string()))
}

/// Get a new passphrase, prompting twice on a TTY.
///
/// The environment variable is taken as-is without confirmation.
pub fn get_passphrase_with_confirm() -> Result<SecretString, KeywardError> {
    if let Some(passphrase) = from_env() {
        return Ok(passphrase);
    }

    if std::io::stdin().is_terminal() {
        let first = read_hidden("New passphrase: ")?;
        let second = read_hidden("Confirm passphrase: ")?;
        return confirmed(first, second);
    }

    Err(KeywardError::Authentication(NO_SOURCE.to_string()))
}

fn from_env() -> Option<SecretString> {
    std::env::var(PASSPHRASE_ENV_VAR)
        .ok()
        .filter(|value| !value.is_empty())
        .map(SecretString::from)
}

/// Both buffers are wiped on drop, whether or not they match.
fn confirmed(
    first: Zeroizing<String>,
    second: Zeroizing<String>,
) -> Result<SecretString, KeywardError> {
    if *first != *second {
        return Err(KeywardError::Authentication(
            "passphrases do not match".to_string(),
        ));
    }
    into_secret(first)
}

fn into_secret(mut passphrase: Zeroizing<String>) -> Result<SecretString, KeywardError> {
    if passphrase.is_empty() {
        return Err(KeywardError::KeyDerivation(
            "passphrase cannot be empty".to_string(),
        ));
    }
    // Moves the buffer into the secret without leaving a copy behind.
    Ok(SecretString::from(std::mem::take(&mut *passphrase)))
}

fn read_hidden(label: &str) -> Result<Zeroizing<String>, KeywardError> {
    eprint!("{label}");
    rpassword::read_password()
        .map(Zeroizing::new)
        .map_err(|e| KeywardError::Internal(format!("failed to read passphrase: {e}")))
}
