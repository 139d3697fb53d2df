// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./keyward.toml` > `~/.config/keyward/keyward.toml` > `/etc/keyward/keyward.toml`
//! with environment variable overrides via `KEYWARD_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::KeywardConfig;

/// Config sections reachable through `KEYWARD_*` variables.
///
/// Other `KEYWARD_*` variables (such as the CLI passphrase variable) are not
/// config keys and must not reach the strict deserializer.
const ENV_SECTIONS: &[&str] = &["kdf", "session", "logging"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/keyward/keyward.toml` (system-wide)
/// 3. `~/.config/keyward/keyward.toml` (user XDG config)
/// 4. `./keyward.toml` (local directory)
/// 5. `KEYWARD_*` environment variables
pub fn load_config() -> Result<KeywardConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<KeywardConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KeywardConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<KeywardConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KeywardConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(KeywardConfig::default()))
        .merge(Toml::file("/etc/keyward/keyward.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("keyward/keyward.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("keyward.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so underscore-containing key
/// names survive: `KEYWARD_KDF_MEMORY_COST` maps to `kdf.memory_cost`, not
/// `kdf.memory.cost`.
fn env_provider() -> Env {
    Env::prefixed("KEYWARD_")
        .filter(|key| {
            let key = key.as_str().to_ascii_lowercase();
            ENV_SECTIONS
                .iter()
                .any(|section| key.starts_with(&format!("{section}_")))
        })
        .map(|key| {
            let key = key.as_str().to_ascii_lowercase();
            let mapped = ENV_SECTIONS
                .iter()
                .find_map(|section| {
                    key.strip_prefix(&format!("{section}_"))
                        .map(|rest| format!("{section}.{rest}"))
                })
                .unwrap_or(key);
            mapped.into()
        })
}
