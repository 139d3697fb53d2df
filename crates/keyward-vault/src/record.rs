// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ciphertext bundles exchanged with the persistence layer.
//!
//! The wire shape is a flat JSON object with camelCase fields. Whether a
//! record is envelope or legacy is decided once, when it is read, by the
//! presence of the DEK fields; the rest of the crate matches on
//! [`StoredSecret`] instead of re-inspecting fields.

use keyward_core::KeywardError;
use serde::{Deserialize, Serialize};

/// A secret encrypted under a per-record DEK, with the DEK encrypted under
/// the master key. All fields are base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EnvelopeForm {
    pub ciphertext: String,
    pub nonce: String,
    pub encrypted_dek: String,
    pub dek_nonce: String,
}

/// A secret encrypted directly under the master key, as written before
/// envelope encryption existed. All fields are base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LegacyForm {
    pub ciphertext: String,
    pub nonce: String,
}

/// A stored ciphertext bundle of either shape.
///
/// Always handled as one value: fields from two different writes are never
/// combined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireRecord", into = "WireRecord")]
pub enum StoredSecret {
    Envelope(EnvelopeForm),
    Legacy(LegacyForm),
}

impl StoredSecret {
    /// Build from the loose field set a persistence layer hands over.
    ///
    /// Empty strings count as absent. Exactly one DEK field present means
    /// the record was damaged or mixed from two writes.
    pub fn from_fields(
        ciphertext: impl Into<String>,
        nonce: impl Into<String>,
        encrypted_dek: Option<String>,
        dek_nonce: Option<String>,
    ) -> Result<Self, KeywardError> {
        let present = |field: Option<String>| field.filter(|value| !value.is_empty());

        match (present(encrypted_dek), present(dek_nonce)) {
            (Some(encrypted_dek), Some(dek_nonce)) => Ok(StoredSecret::Envelope(EnvelopeForm {
                ciphertext: ciphertext.into(),
                nonce: nonce.into(),
                encrypted_dek,
                dek_nonce,
            })),
            (None, None) => Ok(StoredSecret::Legacy(LegacyForm {
                ciphertext: ciphertext.into(),
                nonce: nonce.into(),
            })),
            _ => Err(KeywardError::Decryption(
                "corrupted record: encryptedDek and dekNonce must be stored together".to_string(),
            )),
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, StoredSecret::Legacy(_))
    }
}

impl From<EnvelopeForm> for StoredSecret {
    fn from(form: EnvelopeForm) -> Self {
        StoredSecret::Envelope(form)
    }
}

impl From<LegacyForm> for StoredSecret {
    fn from(form: LegacyForm) -> Self {
        StoredSecret::Legacy(form)
    }
}

/// Flat wire representation shared by both shapes.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRecord {
    ciphertext: String,
    nonce: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    encrypted_dek: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dek_nonce: Option<String>,
}

impl TryFrom<WireRecord> for StoredSecret {
    type Error = KeywardError;

    fn try_from(wire: WireRecord) -> Result<Self, Self::Error> {
        StoredSecret::from_fields(wire.ciphertext, wire.nonce, wire.encrypted_dek, wire.dek_nonce)
    }
}

impl From<StoredSecret> for WireRecord {
    fn from(record: StoredSecret) -> Self {
        match record {
            StoredSecret::Envelope(form) => WireRecord {
                ciphertext: form.ciphertext,
                nonce: form.nonce,
                encrypted_dek: Some(form.encrypted_dek),
                dek_nonce: Some(form.dek_nonce),
            },
            StoredSecret::Legacy(form) => WireRecord {
                ciphertext: form.ciphertext,
                nonce: form.nonce,
                encrypted_dek: None,
                dek_nonce: None,
            },
        }
    }
}
