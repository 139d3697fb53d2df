// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Traits for the collaborators the vault core depends on.

pub mod account;
pub mod clock;

pub use account::AccountVerifier;
pub use clock::{Clock, SystemClock};
