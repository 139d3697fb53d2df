// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Keyward.
//!
//! Provides the error taxonomy, the collaborator traits the vault core is
//! wired against (account verification, time), and small shared types.

pub mod error;
pub mod traits;
pub mod types;

pub use error::KeywardError;
pub use traits::{AccountVerifier, Clock, SystemClock};
pub use types::LockReason;
