// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base64 transport encoding (standard alphabet, padded).

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use keyward_core::KeywardError;

/// Encode bytes as standard padded base64.
pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode standard padded base64.
pub fn from_base64(encoded: &str) -> Result<Vec<u8>, KeywardError> {
    STANDARD
        .decode(encoded.trim())
        .map_err(|e| KeywardError::Encoding(format!("malformed base64: {e}")))
}

/// Decode a fixed-width field such as a nonce or salt.
///
/// Returns `Ok(None)` when the input is valid base64 but decodes to the wrong
/// length, so the caller can classify that in its own terms (a corrupted
/// payload is not an encoding problem).
pub fn from_base64_array<const N: usize>(
    field: &str,
    encoded: &str,
) -> Result<Option<[u8; N]>, KeywardError> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| KeywardError::Encoding(format!("malformed base64 in `{field}`: {e}")))?;
    Ok(bytes.try_into().ok())
}
