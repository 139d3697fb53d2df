// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `keyward init|salt|encrypt|decrypt|reseal`.
//!
//! Records are read from and written to stdio as the same camelCase JSON the
//! persistence layer stores.

use std::io::{Read, Write};
use std::sync::Arc;

use keyward_config::KeywardConfig;
use keyward_core::KeywardError;
use keyward_vault::{
    codec, derive_key, generate_salt, get_passphrase, get_passphrase_with_confirm, mask_secret,
    StoredSecret, VaultCrypto,
};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::account::OfflineAccount;

/// Register a new passphrase: derive its key under a fresh salt and print the
/// salt to persist alongside the account.
pub fn run_init(config: &KeywardConfig, out: &mut impl Write) -> Result<(), KeywardError> {
    let passphrase = get_passphrase_with_confirm()?;
    eprintln!("keyward: deriving key ({:?})...", config.kdf.algorithm);
    let derived = derive_key(&passphrase, None, &config.kdf)?;
    debug!("new account salt generated");
    writeln!(out, "{}", derived.salt_base64()).map_err(io_error)
}

/// Print a fresh random salt for a new account.
pub fn run_salt(out: &mut impl Write) -> Result<(), KeywardError> {
    let salt = generate_salt()?;
    writeln!(out, "{}", codec::to_base64(&salt)).map_err(io_error)
}

/// Encrypt a secret read from stdin and print the envelope record.
pub fn run_encrypt(
    config: &KeywardConfig,
    salt: &str,
    input: &mut impl Read,
    out: &mut impl Write,
) -> Result<(), KeywardError> {
    let secret = read_secret(input)?;
    let mut vault = unlock(config, salt)?;
    let form = vault.encrypt_for_storage(secret.expose_secret())?;
    vault.lock();
    write_record(out, &StoredSecret::from(form))
}

/// Decrypt a record read from stdin and print the plaintext (or a masked
/// preview).
pub fn run_decrypt(
    config: &KeywardConfig,
    salt: &str,
    mask: bool,
    input: &mut impl Read,
    out: &mut impl Write,
) -> Result<(), KeywardError> {
    let record = read_record(input)?;
    let mut vault = unlock(config, salt)?;
    let secret = vault.decrypt_from_storage(&record)?;
    vault.lock();

    if mask {
        writeln!(out, "{}", mask_secret(secret.expose_secret())).map_err(io_error)
    } else {
        writeln!(out, "{}", secret.expose_secret()).map_err(io_error)
    }
}

/// Re-encrypt a record of either shape as a fresh envelope.
pub fn run_reseal(
    config: &KeywardConfig,
    salt: &str,
    input: &mut impl Read,
    out: &mut impl Write,
) -> Result<(), KeywardError> {
    let record = read_record(input)?;
    let mut vault = unlock(config, salt)?;
    let form = vault.reseal(&record)?;
    vault.lock();
    write_record(out, &StoredSecret::from(form))
}

fn unlock(config: &KeywardConfig, salt: &str) -> Result<VaultCrypto, KeywardError> {
    let passphrase = get_passphrase()?;
    let mut vault = VaultCrypto::new(config, Arc::new(OfflineAccount::new(salt)));
    eprintln!("keyward: deriving key ({:?})...", config.kdf.algorithm);
    vault.unlock(&passphrase)?;
    Ok(vault)
}

fn read_secret(input: &mut impl Read) -> Result<SecretString, KeywardError> {
    let mut buf = String::new();
    input.read_to_string(&mut buf).map_err(io_error)?;
    // A single trailing newline comes from `echo`, not from the secret.
    if buf.ends_with('\n') {
        buf.pop();
        if buf.ends_with('\r') {
            buf.pop();
        }
    }
    Ok(SecretString::from(buf))
}

fn read_record(input: &mut impl Read) -> Result<StoredSecret, KeywardError> {
    let mut buf = String::new();
    input.read_to_string(&mut buf).map_err(io_error)?;
    let record: StoredSecret = serde_json::from_str(&buf)
        .map_err(|e| KeywardError::Decryption(format!("unreadable record: {e}")))?;
    debug!(legacy = record.is_legacy(), "record parsed");
    Ok(record)
}

fn write_record(out: &mut impl Write, record: &StoredSecret) -> Result<(), KeywardError> {
    let json = serde_json::to_string(record)
        .map_err(|e| KeywardError::Internal(format!("failed to serialize record: {e}")))?;
    writeln!(out, "{json}").map_err(io_error)
}

fn io_error(e: std::io::Error) -> KeywardError {
    KeywardError::Internal(format!("i/o error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salt_is_sixteen_random_bytes() {
        let mut first = Vec::new();
        let mut second = Vec::new();
        run_salt(&mut first).unwrap();
        run_salt(&mut second).unwrap();

        let first = String::from_utf8(first).unwrap();
        assert_eq!(codec::from_base64(first.trim()).unwrap().len(), 16);
        assert_ne!(first, String::from_utf8(second).unwrap());
    }

    #[test]
    fn one_trailing_newline_is_stripped() {
        let secret = read_secret(&mut "s3cr3t\r\n".as_bytes()).unwrap();
        assert_eq!(secret.expose_secret(), "s3cr3t");
        let secret = read_secret(&mut "two\n\n".as_bytes()).unwrap();
        assert_eq!(secret.expose_secret(), "two\n");
    }

    #[test]
    fn half_envelope_json_is_rejected() {
        let json = r#"{"ciphertext":"AA==","nonce":"AA==","dekNonce":"AA=="}"#;
        let err = read_record(&mut json.as_bytes()).unwrap_err();
        assert!(matches!(err, KeywardError::Decryption(_)));
    }
}
