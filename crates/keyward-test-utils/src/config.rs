// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use keyward_config::{KdfConfig, KeywardConfig};

/// Argon2id parameters far below the production floor, for tests only.
///
/// These bypass config validation on purpose: they are constructed directly
/// rather than loaded.
pub fn fast_kdf_config() -> KdfConfig {
    KdfConfig {
        memory_cost: 8192,
        iterations: 1,
        parallelism: 1,
        ..KdfConfig::default()
    }
}

/// Default configuration with [`fast_kdf_config`] swapped in.
pub fn test_config() -> KeywardConfig {
    KeywardConfig {
        kdf: fast_kdf_config(),
        ..KeywardConfig::default()
    }
}
