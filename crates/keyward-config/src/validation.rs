// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes:
//! KDF work factor floors, the inactivity window range, and the log level.

use crate::diagnostic::ConfigError;
use crate::model::KeywardConfig;

/// Argon2id memory floor in KiB (19 MiB, the OWASP minimum configuration).
pub const MIN_ARGON2_MEMORY_KIB: u32 = 19 * 1024;

/// PBKDF2 iteration floor.
pub const MIN_PBKDF2_ITERATIONS: u32 = 100_000;

/// Shortest accepted inactivity window in seconds.
pub const MIN_INACTIVITY_TIMEOUT_SECS: u64 = 60;

/// Longest accepted inactivity window in seconds.
pub const MAX_INACTIVITY_TIMEOUT_SECS: u64 = 3600;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &KeywardConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.kdf.memory_cost < MIN_ARGON2_MEMORY_KIB {
        errors.push(ConfigError::Validation {
            message: format!(
                "kdf.memory_cost must be at least {MIN_ARGON2_MEMORY_KIB} (19 MiB), got {}",
                config.kdf.memory_cost
            ),
        });
    }

    if config.kdf.iterations < 2 {
        errors.push(ConfigError::Validation {
            message: format!(
                "kdf.iterations must be at least 2, got {}",
                config.kdf.iterations
            ),
        });
    }

    if !(1..=16).contains(&config.kdf.parallelism) {
        errors.push(ConfigError::Validation {
            message: format!(
                "kdf.parallelism must be between 1 and 16, got {}",
                config.kdf.parallelism
            ),
        });
    }

    if config.kdf.pbkdf2_iterations < MIN_PBKDF2_ITERATIONS {
        errors.push(ConfigError::Validation {
            message: format!(
                "kdf.pbkdf2_iterations must be at least {MIN_PBKDF2_ITERATIONS}, got {}",
                config.kdf.pbkdf2_iterations
            ),
        });
    }

    let timeout = config.session.inactivity_timeout_secs;
    if !(MIN_INACTIVITY_TIMEOUT_SECS..=MAX_INACTIVITY_TIMEOUT_SECS).contains(&timeout) {
        errors.push(ConfigError::Validation {
            message: format!(
                "session.inactivity_timeout_secs must be between {MIN_INACTIVITY_TIMEOUT_SECS} and {MAX_INACTIVITY_TIMEOUT_SECS}, got {timeout}"
            ),
        });
    }

    if !LOG_LEVELS.contains(&config.logging.level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
