// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared types used across Keyward crates.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Why a session moved from unlocked to locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LockReason {
    /// The user locked the vault explicitly.
    Manual,
    /// The inactivity window elapsed with no activity.
    InactivityTimeout,
    /// The user signed out of the account.
    SignOut,
}
