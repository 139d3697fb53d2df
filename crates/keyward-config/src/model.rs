// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Keyward.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level Keyward configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KeywardConfig {
    /// Passphrase key derivation settings.
    #[serde(default)]
    pub kdf: KdfConfig,

    /// Unlocked-session settings.
    #[serde(default)]
    pub session: SessionConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Key derivation function used to turn a passphrase into the master key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum KdfAlgorithm {
    /// Argon2id v1.3 (memory-hard). Always preferred.
    #[default]
    Argon2id,
    /// PBKDF2-HMAC-SHA256. Not memory-hard: a GPU attacker gets far more
    /// guesses per second than against Argon2id. Only for runtimes that
    /// cannot afford the Argon2id memory cost.
    Pbkdf2Sha256,
}

/// Key derivation configuration.
///
/// Changing any of these after accounts exist changes every derived key;
/// they are part of the account's key material contract.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KdfConfig {
    /// Which KDF to use (default: argon2id).
    #[serde(default)]
    pub algorithm: KdfAlgorithm,

    /// Argon2id memory cost in KiB (default: 65536 = 64 MiB).
    #[serde(default = "default_memory_cost")]
    pub memory_cost: u32,

    /// Argon2id iteration count (default: 3).
    #[serde(default = "default_iterations")]
    pub iterations: u32,

    /// Argon2id parallelism lanes (default: 1).
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,

    /// PBKDF2-HMAC-SHA256 iteration count (default: 600000).
    #[serde(default = "default_pbkdf2_iterations")]
    pub pbkdf2_iterations: u32,
}

impl Default for KdfConfig {
    fn default() -> Self {
        Self {
            algorithm: KdfAlgorithm::default(),
            memory_cost: default_memory_cost(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
            pbkdf2_iterations: default_pbkdf2_iterations(),
        }
    }
}

fn default_memory_cost() -> u32 {
    65536 // 64 MiB
}

fn default_iterations() -> u32 {
    3
}

fn default_parallelism() -> u32 {
    1
}

fn default_pbkdf2_iterations() -> u32 {
    600_000 // OWASP 2023 figure for PBKDF2-HMAC-SHA256
}

/// Unlocked-session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Seconds without activity before the vault locks itself (default: 600).
    #[serde(default = "default_inactivity_timeout_secs")]
    pub inactivity_timeout_secs: u64,
}

impl SessionConfig {
    pub fn inactivity_timeout(&self) -> Duration {
        Duration::from_secs(self.inactivity_timeout_secs)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            inactivity_timeout_secs: default_inactivity_timeout_secs(),
        }
    }
}

fn default_inactivity_timeout_secs() -> u64 {
    600
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
