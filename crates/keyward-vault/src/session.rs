// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Master key lifecycle.
//!
//! The manager is the sole owner of the MEK. It moves between two states:
//!
//! - `Locked`: no key in memory. Every key use fails with
//!   [`KeywardError::VaultLocked`].
//! - `Unlocked`: the MEK and an inactivity deadline. Any key use or
//!   [`SessionKeyManager::touch`] pushes the deadline out by the configured
//!   window.
//!
//! There is no timer thread. Expiry is checked against the injected [`Clock`]
//! on every access, and hosts with an event loop can call
//! [`SessionKeyManager::poll_expiry`] to drop the key as soon as the deadline
//! passes rather than on the next access.

use std::sync::Arc;
use std::time::{Duration, Instant};

use keyward_config::{KdfConfig, KeywardConfig};
use keyward_core::{AccountVerifier, Clock, KeywardError, LockReason, SystemClock};
use secrecy::SecretString;
use tracing::{debug, info, warn};

use crate::codec;
use crate::kdf::{self, SALT_LEN};
use crate::keys::MasterKey;

/// Callback invoked on every unlocked-to-locked transition.
pub type LockListener = Box<dyn Fn(LockReason) + Send + Sync>;

enum SessionState {
    Locked,
    Unlocked { mek: MasterKey, expires_at: Instant },
}

pub struct SessionKeyManager {
    state: SessionState,
    kdf: KdfConfig,
    inactivity_timeout: Duration,
    verifier: Arc<dyn AccountVerifier>,
    clock: Arc<dyn Clock>,
    listeners: Vec<LockListener>,
}

impl std::fmt::Debug for SessionKeyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.state {
            SessionState::Locked => "locked",
            SessionState::Unlocked { .. } => "unlocked",
        };
        f.debug_struct("SessionKeyManager")
            .field("state", &state)
            .field("inactivity_timeout", &self.inactivity_timeout)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl SessionKeyManager {
    /// Create a locked manager using the system clock.
    pub fn new(config: &KeywardConfig, verifier: Arc<dyn AccountVerifier>) -> Self {
        Self {
            state: SessionState::Locked,
            kdf: config.kdf.clone(),
            inactivity_timeout: config.session.inactivity_timeout(),
            verifier,
            clock: Arc::new(SystemClock),
            listeners: Vec::new(),
        }
    }

    /// Replace the clock used for inactivity deadlines.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn inactivity_timeout(&self) -> Duration {
        self.inactivity_timeout
    }

    /// Register a listener for lock transitions.
    pub fn on_lock(&mut self, listener: LockListener) {
        self.listeners.push(listener);
    }

    /// Verify the passphrase with the account collaborator and derive the MEK.
    ///
    /// A missing or malformed salt is an account-level problem and is reported
    /// as [`KeywardError::Authentication`] without touching the KDF. A session
    /// whose deadline already passed is locked first, so listeners still see
    /// the timeout. Otherwise a failure leaves the current state as it was,
    /// and success replaces (and zeroizes) a previous MEK.
    pub fn unlock(&mut self, passphrase: &SecretString) -> Result<(), KeywardError> {
        // An expired session locks (and notifies) before it can be replaced.
        self.poll_expiry();
        let salt = self.account_salt()?;

        if !self.verifier.verify_passphrase(passphrase)? {
            warn!("unlock rejected by account verifier");
            return Err(KeywardError::Authentication(
                "passphrase rejected".to_string(),
            ));
        }

        let derived = kdf::derive_key(passphrase, Some(&salt), &self.kdf)?;
        let expires_at = self.deadline_from(self.clock.now())?;
        let relocked = matches!(self.state, SessionState::Unlocked { .. });
        self.state = SessionState::Unlocked {
            mek: derived.key,
            expires_at,
        };

        info!(
            timeout_secs = self.inactivity_timeout.as_secs(),
            replaced_key = relocked,
            "vault unlocked"
        );
        Ok(())
    }

    fn account_salt(&self) -> Result<[u8; SALT_LEN], KeywardError> {
        let encoded = self.verifier.salt()?.filter(|s| !s.is_empty()).ok_or_else(|| {
            KeywardError::Authentication("no salt on record for this account".to_string())
        })?;

        codec::from_base64_array::<SALT_LEN>("salt", &encoded)
            .ok()
            .flatten()
            .ok_or_else(|| {
                KeywardError::Authentication("stored salt is corrupted".to_string())
            })
    }

    /// Discard the MEK.
    pub fn lock(&mut self) {
        self.transition_to_locked(LockReason::Manual);
    }

    /// Discard the MEK because the user signed out.
    pub fn sign_out(&mut self) {
        self.transition_to_locked(LockReason::SignOut);
    }

    /// Lock now if the inactivity deadline has passed.
    ///
    /// Returns `true` when this call performed the lock.
    pub fn poll_expiry(&mut self) -> bool {
        let expired = match &self.state {
            SessionState::Unlocked { expires_at, .. } => self.clock.now() >= *expires_at,
            SessionState::Locked => false,
        };
        if expired {
            self.transition_to_locked(LockReason::InactivityTimeout);
        }
        expired
    }

    pub fn is_locked(&mut self) -> bool {
        self.poll_expiry();
        matches!(self.state, SessionState::Locked)
    }

    /// Reset the inactivity deadline.
    pub fn touch(&mut self) -> Result<(), KeywardError> {
        self.poll_expiry();
        let deadline = match self.state {
            SessionState::Unlocked { .. } => self.deadline_from(self.clock.now())?,
            SessionState::Locked => return Err(KeywardError::VaultLocked),
        };
        match &mut self.state {
            SessionState::Unlocked { expires_at, .. } => {
                *expires_at = deadline;
                Ok(())
            }
            SessionState::Locked => Err(KeywardError::VaultLocked),
        }
    }

    /// Time left before the session locks itself, or `None` while locked.
    pub fn remaining(&mut self) -> Option<Duration> {
        self.poll_expiry();
        match &self.state {
            SessionState::Unlocked { expires_at, .. } => {
                Some(expires_at.saturating_duration_since(self.clock.now()))
            }
            SessionState::Locked => None,
        }
    }

    /// Lend the MEK to `f`, counting as activity.
    ///
    /// Fails with [`KeywardError::VaultLocked`] before calling `f` if the
    /// session is locked or has just expired.
    pub fn with_key<T>(
        &mut self,
        f: impl FnOnce(&MasterKey) -> Result<T, KeywardError>,
    ) -> Result<T, KeywardError> {
        self.touch()?;
        match &self.state {
            SessionState::Unlocked { mek, .. } => f(mek),
            SessionState::Locked => Err(KeywardError::VaultLocked),
        }
    }

    fn deadline_from(&self, now: Instant) -> Result<Instant, KeywardError> {
        now.checked_add(self.inactivity_timeout).ok_or_else(|| {
            KeywardError::Config(format!(
                "inactivity timeout of {}s is out of range",
                self.inactivity_timeout.as_secs()
            ))
        })
    }

    fn transition_to_locked(&mut self, reason: LockReason) {
        if matches!(self.state, SessionState::Locked) {
            debug!(%reason, "lock requested while already locked");
            return;
        }
        // Dropping the old state zeroizes the MEK.
        self.state = SessionState::Locked;
        info!(%reason, "vault locked");

        for listener in &self.listeners {
            listener(reason);
        }
    }
}
