// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Direct encryption under the master key, for records written before
//! envelope encryption. New writes never use this shape.

use keyward_core::KeywardError;
use secrecy::SecretString;

use crate::aead::{self, NONCE_LEN};
use crate::codec;
use crate::envelope::{utf8_secret, CORRUPTED_PAYLOAD};
use crate::keys::MasterKey;
use crate::record::LegacyForm;

pub fn encrypt_direct(plaintext: &str, mek: &MasterKey) -> Result<LegacyForm, KeywardError> {
    let (ciphertext, nonce) = aead::seal(mek.as_bytes(), plaintext.as_bytes())?;
    Ok(LegacyForm {
        ciphertext: codec::to_base64(&ciphertext),
        nonce: codec::to_base64(&nonce),
    })
}

pub fn decrypt_direct(form: &LegacyForm, mek: &MasterKey) -> Result<SecretString, KeywardError> {
    let ciphertext = codec::from_base64(&form.ciphertext)?;
    let nonce = codec::from_base64_array::<NONCE_LEN>("nonce", &form.nonce)?
        .ok_or_else(|| KeywardError::Decryption(CORRUPTED_PAYLOAD.to_string()))?;

    let plaintext = aead::open(mek.as_bytes(), &nonce, &ciphertext)
        .map_err(|_| KeywardError::Decryption(CORRUPTED_PAYLOAD.to_string()))?;
    utf8_secret(plaintext)
}
