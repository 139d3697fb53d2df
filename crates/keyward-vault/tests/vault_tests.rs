// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the vault facade: unlock, storage round-trips,
//! tamper detection, legacy compatibility, lock gating and inactivity expiry.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use keyward_core::{KeywardError, LockReason};
use keyward_test_utils::{fast_kdf_config, test_config, ManualClock, MockVerifier, TEST_SALT};
use keyward_vault::codec::{from_base64, to_base64};
use keyward_vault::{
    decrypt_envelope, derive_key, encrypt_direct, encrypt_envelope, EnvelopeForm, StoredSecret,
    VaultCrypto,
};
use proptest::prelude::*;
use secrecy::{ExposeSecret, SecretString};

const PASSPHRASE: &str = "Correct Horse Battery Staple!";

fn pass(s: &str) -> SecretString {
    SecretString::from(s.to_string())
}

struct Fixture {
    vault: VaultCrypto,
    verifier: Arc<MockVerifier>,
    clock: Arc<ManualClock>,
}

fn fixture() -> Fixture {
    let verifier = Arc::new(MockVerifier::new(PASSPHRASE));
    let clock = Arc::new(ManualClock::new());
    let vault = VaultCrypto::new(&test_config(), verifier.clone()).with_clock(clock.clone());
    Fixture {
        vault,
        verifier,
        clock,
    }
}

fn unlocked() -> Fixture {
    let mut f = fixture();
    f.vault.unlock(&pass(PASSPHRASE)).unwrap();
    f
}

fn assert_decryption_fails(vault: &mut VaultCrypto, form: EnvelopeForm) {
    match vault.decrypt_from_storage(&StoredSecret::from(form)) {
        Err(KeywardError::Decryption(_)) => {}
        Err(other) => panic!("expected decryption error, got {other}"),
        Ok(_) => panic!("tampered record decrypted"),
    }
}

fn flip_first_byte(field: &str) -> String {
    let mut bytes = from_base64(field).unwrap();
    bytes[0] ^= 0x01;
    to_base64(&bytes)
}

#[test]
fn end_to_end_scenario() {
    let mut f = fixture();
    f.vault.unlock(&pass(PASSPHRASE)).unwrap();

    let form = f.vault.encrypt_for_storage("s3cr3t").unwrap();
    for field in [&form.ciphertext, &form.nonce, &form.encrypted_dek, &form.dek_nonce] {
        assert!(!field.is_empty());
        assert!(from_base64(field).is_ok());
    }

    let record = StoredSecret::from(form);
    assert_eq!(
        f.vault.decrypt_from_storage(&record).unwrap().expose_secret(),
        "s3cr3t"
    );

    f.vault.lock();
    let err = f.vault.decrypt_from_storage(&record).unwrap_err();
    assert!(matches!(err, KeywardError::VaultLocked));
    assert!(err.is_recoverable());
}

#[test]
fn record_survives_a_json_trip_through_storage() {
    let mut f = unlocked();
    let form = f.vault.encrypt_for_storage("persisted").unwrap();
    let json = serde_json::to_string(&StoredSecret::from(form)).unwrap();
    assert!(json.contains("\"encryptedDek\""));

    let record: StoredSecret = serde_json::from_str(&json).unwrap();
    assert_eq!(
        f.vault.decrypt_from_storage(&record).unwrap().expose_secret(),
        "persisted"
    );
}

#[test]
fn record_decrypts_after_relock_with_same_passphrase() {
    let mut f = unlocked();
    let record = StoredSecret::from(f.vault.encrypt_for_storage("kept").unwrap());
    f.vault.lock();
    f.vault.unlock(&pass(PASSPHRASE)).unwrap();
    assert_eq!(f.vault.decrypt_from_storage(&record).unwrap().expose_secret(), "kept");
}

#[test]
fn tampering_any_field_is_detected() {
    let mut f = unlocked();
    let form = f.vault.encrypt_for_storage("s3cr3t").unwrap();

    let mut t = form.clone();
    t.ciphertext = flip_first_byte(&form.ciphertext);
    assert_decryption_fails(&mut f.vault, t);

    let mut t = form.clone();
    t.nonce = flip_first_byte(&form.nonce);
    assert_decryption_fails(&mut f.vault, t);

    let mut t = form.clone();
    t.encrypted_dek = flip_first_byte(&form.encrypted_dek);
    assert_decryption_fails(&mut f.vault, t);

    let mut t = form.clone();
    t.dek_nonce = flip_first_byte(&form.dek_nonce);
    assert_decryption_fails(&mut f.vault, t);
}

#[test]
fn another_accounts_key_cannot_decrypt() {
    let mut alice = unlocked();
    let record = StoredSecret::from(alice.vault.encrypt_for_storage("alice only").unwrap());

    let other_salt = to_base64(&[0x33; 16]);
    let verifier = Arc::new(MockVerifier::new(PASSPHRASE).with_salt(Some(&other_salt)));
    let mut bob = VaultCrypto::new(&test_config(), verifier);
    bob.unlock(&pass(PASSPHRASE)).unwrap();

    let err = bob.decrypt_from_storage(&record).unwrap_err();
    assert_eq!(err.to_string(), "decryption error: invalid key or corrupted DEK");
}

#[test]
fn different_passphrase_same_salt_is_rejected() {
    let config = fast_kdf_config();
    let right = derive_key(&pass(PASSPHRASE), Some(&TEST_SALT), &config).unwrap();
    let wrong =
        derive_key(&pass("Correct Horse Battery Staple?"), Some(&TEST_SALT), &config).unwrap();

    let form = encrypt_envelope("s3cr3t", &right.key).unwrap();
    assert!(matches!(
        decrypt_envelope(&form, &wrong.key),
        Err(KeywardError::Decryption(_))
    ));
    assert_eq!(decrypt_envelope(&form, &right.key).unwrap().expose_secret(), "s3cr3t");
}

#[test]
fn legacy_records_remain_readable_and_upgrade_on_reseal() {
    let derived = derive_key(&pass(PASSPHRASE), Some(&TEST_SALT), &fast_kdf_config()).unwrap();
    let legacy = encrypt_direct("written long ago", &derived.key).unwrap();
    let json = serde_json::to_string(&legacy).unwrap();
    assert!(!json.contains("encryptedDek"));

    let record: StoredSecret = serde_json::from_str(&json).unwrap();
    assert!(record.is_legacy());

    let mut f = unlocked();
    assert_eq!(
        f.vault.decrypt_from_storage(&record).unwrap().expose_secret(),
        "written long ago"
    );

    let upgraded = StoredSecret::from(f.vault.reseal(&record).unwrap());
    assert!(!upgraded.is_legacy());
    assert_eq!(
        f.vault.decrypt_from_storage(&upgraded).unwrap().expose_secret(),
        "written long ago"
    );
}

#[test]
fn locked_vault_does_no_crypto_work() {
    let mut f = fixture();
    let record = StoredSecret::from_fields("AAAA", "AAAA", None, None).unwrap();

    assert!(matches!(f.vault.encrypt_for_storage("x"), Err(KeywardError::VaultLocked)));
    // Even a malformed record reports the lock, not the corruption.
    assert!(matches!(f.vault.decrypt_from_storage(&record), Err(KeywardError::VaultLocked)));
    assert!(matches!(f.vault.reseal(&record), Err(KeywardError::VaultLocked)));

    assert_eq!(f.verifier.salt_calls(), 0);
    assert_eq!(f.verifier.verify_calls(), 0);
}

#[test]
fn wrong_passphrase_leaves_vault_locked() {
    let mut f = fixture();
    let err = f.vault.unlock(&pass("correct horse battery staple!")).unwrap_err();
    assert!(matches!(err, KeywardError::Authentication(_)));
    assert!(!err.is_recoverable());
    assert!(f.vault.is_locked());
}

#[test]
fn inactivity_locks_and_notifies() {
    let mut f = unlocked();
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    f.vault.on_lock(Box::new(move |reason| sink.lock().unwrap().push(reason)));

    let record = StoredSecret::from(f.vault.encrypt_for_storage("s3cr3t").unwrap());
    let window = Duration::from_secs(600);
    assert_eq!(f.vault.remaining(), Some(window));

    f.clock.advance(window - Duration::from_secs(1));
    assert!(f.vault.decrypt_from_storage(&record).is_ok());

    f.clock.advance(window);
    assert!(f.vault.poll_expiry());
    assert!(f.vault.is_locked());
    assert!(matches!(
        f.vault.decrypt_from_storage(&record),
        Err(KeywardError::VaultLocked)
    ));
    assert_eq!(*events.lock().unwrap(), vec![LockReason::InactivityTimeout]);

    f.vault.unlock(&pass(PASSPHRASE)).unwrap();
    assert!(f.vault.decrypt_from_storage(&record).is_ok());
}

#[test]
fn sign_out_is_reported_distinctly() {
    let mut f = unlocked();
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    f.vault.on_lock(Box::new(move |reason| sink.lock().unwrap().push(reason)));

    f.vault.sign_out();
    assert!(f.vault.is_locked());
    assert_eq!(*events.lock().unwrap(), vec![LockReason::SignOut]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn any_secret_roundtrips(secret in "\\PC*") {
        let mut f = unlocked();
        let record = StoredSecret::from(f.vault.encrypt_for_storage(&secret).unwrap());
        let plain = f.vault.decrypt_from_storage(&record).unwrap();
        prop_assert_eq!(plain.expose_secret(), secret.as_str());
    }
}
