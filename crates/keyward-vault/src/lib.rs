// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client-side vault cryptography for Keyward.
//!
//! Secrets are encrypted in envelope form: each secret under its own random
//! data key (DEK), and the DEK under the master key (MEK) derived from the
//! user's passphrase. The MEK never leaves memory and never leaves the
//! [`SessionKeyManager`], which drops it on lock, sign-out or inactivity.
//!
//! Records written before envelope encryption (the secret directly under the
//! MEK) are still readable and can be upgraded with [`VaultCrypto::reseal`].

pub mod aead;
pub mod codec;
pub mod envelope;
pub mod facade;
pub mod kdf;
pub mod keys;
pub mod legacy;
pub mod prompt;
pub mod record;
pub mod session;

pub use envelope::{decrypt_envelope, encrypt_envelope};
pub use facade::{mask_secret, VaultCrypto};
pub use kdf::{derive_key, generate_salt, DerivedKey, SALT_LEN};
pub use keys::{DataKey, MasterKey};
pub use legacy::{decrypt_direct, encrypt_direct};
pub use prompt::{get_passphrase, get_passphrase_with_confirm};
pub use record::{EnvelopeForm, LegacyForm, StoredSecret};
pub use session::{LockListener, SessionKeyManager};
