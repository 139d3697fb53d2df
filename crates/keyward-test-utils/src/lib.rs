// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Keyward integration tests.
//!
//! Provides collaborator mocks and cheap configuration so session and facade
//! tests run deterministically and fast.
//!
//! # Components
//!
//! - [`MockVerifier`] - Account verifier with a fixed salt and passphrase
//! - [`ManualClock`] - Clock that only moves when told to
//! - [`fast_kdf_config`] / [`test_config`] - Low-cost KDF parameters

pub mod clock;
pub mod config;
pub mod verifier;

pub use clock::ManualClock;
pub use config::{fast_kdf_config, test_config};
pub use verifier::{MockVerifier, TEST_SALT};
