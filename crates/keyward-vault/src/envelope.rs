// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Envelope encryption: the secret under a fresh DEK, the DEK under the MEK.
//!
//! A new DEK and two new nonces are drawn on every call, so re-encrypting the
//! same secret (an update) never reuses key material.

use keyward_core::KeywardError;
use secrecy::SecretString;

use crate::aead::{self, NONCE_LEN};
use crate::codec;
use crate::keys::{DataKey, MasterKey};
use crate::record::EnvelopeForm;

pub(crate) const CORRUPTED_DEK: &str = "invalid key or corrupted DEK";
pub(crate) const CORRUPTED_PAYLOAD: &str = "invalid key or corrupted payload";

/// Encrypt `plaintext` for storage in envelope form.
pub fn encrypt_envelope(plaintext: &str, mek: &MasterKey) -> Result<EnvelopeForm, KeywardError> {
    let dek = DataKey::generate()?;
    let (ciphertext, nonce) = aead::seal(dek.as_bytes(), plaintext.as_bytes())?;
    let (encrypted_dek, dek_nonce) = aead::seal(mek.as_bytes(), dek.as_bytes())?;
    // `dek` is zeroized when it drops at the end of this call.

    Ok(EnvelopeForm {
        ciphertext: codec::to_base64(&ciphertext),
        nonce: codec::to_base64(&nonce),
        encrypted_dek: codec::to_base64(&encrypted_dek),
        dek_nonce: codec::to_base64(&dek_nonce),
    })
}

/// Decrypt an envelope-form record.
///
/// All four fields are decoded before any cryptographic work, so malformed
/// base64 anywhere is reported as an encoding error.
pub fn decrypt_envelope(
    form: &EnvelopeForm,
    mek: &MasterKey,
) -> Result<SecretString, KeywardError> {
    let ciphertext = codec::from_base64(&form.ciphertext)?;
    let nonce = codec::from_base64_array::<NONCE_LEN>("nonce", &form.nonce)?;
    let encrypted_dek = codec::from_base64(&form.encrypted_dek)?;
    let dek_nonce = codec::from_base64_array::<NONCE_LEN>("dekNonce", &form.dek_nonce)?;

    let dek_nonce = dek_nonce.ok_or_else(|| KeywardError::Decryption(CORRUPTED_DEK.to_string()))?;
    let dek_bytes = aead::open(mek.as_bytes(), &dek_nonce, &encrypted_dek)
        .map_err(|_| KeywardError::Decryption(CORRUPTED_DEK.to_string()))?;
    let dek = DataKey::from_slice(&dek_bytes)
        .ok_or_else(|| KeywardError::Decryption(CORRUPTED_DEK.to_string()))?;

    let nonce = nonce.ok_or_else(|| KeywardError::Decryption(CORRUPTED_PAYLOAD.to_string()))?;
    let plaintext = aead::open(dek.as_bytes(), &nonce, &ciphertext)
        .map_err(|_| KeywardError::Decryption(CORRUPTED_PAYLOAD.to_string()))?;

    utf8_secret(plaintext)
}

/// Convert authenticated plaintext bytes into a secret string.
pub(crate) fn utf8_secret(
    plaintext: zeroize::Zeroizing<Vec<u8>>,
) -> Result<SecretString, KeywardError> {
    let text = std::str::from_utf8(&plaintext)
        .map_err(|_| KeywardError::Decryption(CORRUPTED_PAYLOAD.to_string()))?;
    Ok(SecretString::from(text.to_owned()))
}
