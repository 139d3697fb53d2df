// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Keyward configuration system.

use std::io::Write;

use keyward_config::diagnostic::ConfigError;
use keyward_config::model::{KdfAlgorithm, KeywardConfig};
use keyward_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_keyward_config() {
    let toml = r#"
[kdf]
algorithm = "argon2id"
memory_cost = 131072
iterations = 4
parallelism = 2
pbkdf2_iterations = 700000

[session]
inactivity_timeout_secs = 300

[logging]
level = "debug"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.kdf.algorithm, KdfAlgorithm::Argon2id);
    assert_eq!(config.kdf.memory_cost, 131072);
    assert_eq!(config.kdf.iterations, 4);
    assert_eq!(config.kdf.parallelism, 2);
    assert_eq!(config.kdf.pbkdf2_iterations, 700_000);
    assert_eq!(config.session.inactivity_timeout_secs, 300);
    assert_eq!(config.logging.level, "debug");
}

/// Missing sections fall back to compiled defaults.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("[logging]\nlevel = \"warn\"\n").unwrap();
    assert_eq!(config.kdf, KeywardConfig::default().kdf);
    assert_eq!(config.session.inactivity_timeout_secs, 600);
    assert_eq!(config.logging.level, "warn");
}

/// Defaults favour Argon2id with a 64 MiB cost and a ten minute window.
#[test]
fn serialized_defaults_are_sensible() {
    let config = KeywardConfig::default();
    assert_eq!(config.kdf.algorithm, KdfAlgorithm::Argon2id);
    assert_eq!(config.kdf.memory_cost, 65536);
    assert_eq!(config.kdf.iterations, 3);
    assert_eq!(config.kdf.parallelism, 1);
    assert_eq!(config.kdf.pbkdf2_iterations, 600_000);
    assert_eq!(config.session.inactivity_timeout_secs, 600);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn deny_unknown_fields_at_top_level() {
    let err = load_config_from_str("[vault]\nkey = 1\n").expect_err("should reject [vault]");
    assert!(format!("{err}").contains("vault"));
}

#[test]
fn diagnostic_typo_suggests_memory_cost() {
    let toml = r#"
[kdf]
memroy_cost = 65536
"#;
    let errors = load_and_validate_str(toml).expect_err("should reject typo");
    let suggestion = errors.iter().find_map(|e| match e {
        ConfigError::UnknownKey { suggestion, .. } => suggestion.clone(),
        _ => None,
    });
    assert_eq!(suggestion.as_deref(), Some("memory_cost"));
}

#[test]
fn diagnostic_lists_valid_session_keys() {
    let errors = load_and_validate_str("[session]\ntimeout = 10\n").unwrap_err();
    let valid_keys = errors.iter().find_map(|e| match e {
        ConfigError::UnknownKey { valid_keys, .. } => Some(valid_keys.clone()),
        _ => None,
    });
    assert!(valid_keys.unwrap().contains("inactivity_timeout_secs"));
}

#[test]
fn diagnostic_wrong_type_is_reported() {
    let errors =
        load_and_validate_str("[session]\ninactivity_timeout_secs = \"soon\"\n").unwrap_err();
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::InvalidValue { .. })));
}

#[test]
fn diagnostic_unknown_algorithm_is_reported() {
    let errors = load_and_validate_str("[kdf]\nalgorithm = \"md5\"\n").unwrap_err();
    assert!(!errors.is_empty());
    let rendered = errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n");
    assert!(rendered.contains("md5"), "got: {rendered}");
}

#[test]
fn config_error_renders_with_miette() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let errors = load_and_validate_str("[kdf]\nmemroy_cost = 1\n").unwrap_err();
    let handler = GraphicalReportHandler::new();
    let mut buf = String::new();
    let diagnostic: &dyn Diagnostic = &errors[0];
    handler.render_report(&mut buf, diagnostic).unwrap();
    assert!(buf.contains("memroy_cost"));
    assert!(buf.contains("keyward::config::unknown_key"));
}

#[test]
fn load_and_validate_defaults() {
    let config = load_and_validate_str("").expect("defaults should validate");
    assert_eq!(config.kdf.algorithm, KdfAlgorithm::Argon2id);
}

#[test]
fn validation_runs_after_deserialization() {
    let errors = load_and_validate_str("[kdf]\npbkdf2_iterations = 1000\n").unwrap_err();
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("pbkdf2_iterations"))
    ));
}

#[test]
fn explicit_path_is_loaded_and_validated() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[session]\ninactivity_timeout_secs = 120").unwrap();

    let config = load_and_validate_path(file.path()).expect("file config should validate");
    assert_eq!(config.session.inactivity_timeout_secs, 120);
}
