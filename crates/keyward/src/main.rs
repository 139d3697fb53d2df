// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyward - client-side vault cryptography from the command line.
//!
//! The passphrase comes from `KEYWARD_PASSPHRASE` or an interactive prompt.
//! Secrets and records travel over stdin/stdout.

mod account;
mod config_cmd;
mod secrets;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use keyward_config::KeywardConfig;
use keyward_core::KeywardError;

/// Keyward - client-side vault cryptography.
#[derive(Parser, Debug)]
#[command(name = "keyward", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Register a new passphrase and print its generated salt.
    Init,
    /// Generate a random salt for a new account.
    Salt,
    /// Encrypt a secret read from stdin into an envelope record.
    Encrypt {
        /// The account's base64 salt.
        #[arg(long, env = "KEYWARD_SALT")]
        salt: String,
    },
    /// Decrypt a record (envelope or legacy JSON) read from stdin.
    Decrypt {
        #[arg(long, env = "KEYWARD_SALT")]
        salt: String,
        /// Print a masked preview instead of the full secret.
        #[arg(long)]
        mask: bool,
    },
    /// Re-encrypt a record read from stdin with a fresh data key.
    Reseal {
        #[arg(long, env = "KEYWARD_SALT")]
        salt: String,
    },
    /// Inspect Keyward configuration.
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Print the effective configuration as TOML.
    Show,
    /// Validate the configuration and exit.
    Check,
}

fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => keyward_config::load_and_validate_path(path),
        None => keyward_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            keyward_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.level);

    if let Err(e) = run(cli.command, &config) {
        eprintln!("keyward: {e}");
        std::process::exit(if e.is_recoverable() { 2 } else { 1 });
    }
}

fn run(command: Commands, config: &KeywardConfig) -> Result<(), KeywardError> {
    let mut stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();

    match command {
        Commands::Init => secrets::run_init(config, &mut stdout),
        Commands::Salt => secrets::run_salt(&mut stdout),
        Commands::Encrypt { salt } => secrets::run_encrypt(config, &salt, &mut stdin, &mut stdout),
        Commands::Decrypt { salt, mask } => {
            secrets::run_decrypt(config, &salt, mask, &mut stdin, &mut stdout)
        }
        Commands::Reseal { salt } => secrets::run_reseal(config, &salt, &mut stdin, &mut stdout),
        Commands::Config { action } => match action {
            ConfigCommands::Show => config_cmd::run_show(config, &mut stdout),
            ConfigCommands::Check => config_cmd::run_check(config, &mut stdout),
        },
    }
}

/// Logs go to stderr so stdout carries only records and secrets.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "keyward={log_level},keyward_vault={log_level},warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
