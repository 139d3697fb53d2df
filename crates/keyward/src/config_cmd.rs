// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `keyward config show|check`.

use std::io::Write;

use keyward_config::KeywardConfig;
use keyward_core::KeywardError;

/// Print the effective configuration as TOML.
pub fn run_show(config: &KeywardConfig, out: &mut impl Write) -> Result<(), KeywardError> {
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| KeywardError::Config(format!("failed to render config: {e}")))?;
    write!(out, "{rendered}").map_err(|e| KeywardError::Internal(format!("i/o error: {e}")))
}

/// Report that configuration loaded and validated.
pub fn run_check(config: &KeywardConfig, out: &mut impl Write) -> Result<(), KeywardError> {
    writeln!(
        out,
        "config ok (kdf: {:?}, inactivity timeout: {}s)",
        config.kdf.algorithm, config.session.inactivity_timeout_secs
    )
    .map_err(|e| KeywardError::Internal(format!("i/o error: {e}")))
}
