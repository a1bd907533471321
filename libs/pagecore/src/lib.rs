//! Cursor-paginated page envelope and the opaque cursor codec.
//!
//! A cursor is the base64 of a UTF-8 JSON object. Its field set is owned
//! by the strategy that minted it; cursor structs are expected to carry
//! `#[serde(deny_unknown_fields)]` so a token produced under one ordering
//! fails shape validation when fed to another.

mod page;

pub use page::{Edge, Page, PageInfo};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Decode failures for pagination cursors. All of them are caller input
/// errors and must surface as a bad-request condition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    #[error("invalid cursor: invalid base64 encoding")]
    InvalidBase64,
    #[error("invalid cursor: payload is not UTF-8 JSON")]
    InvalidUtf8,
    #[error("invalid cursor: field set does not match the active ordering")]
    InvalidShape,
}

/// Encode a cursor record into an opaque token (JSON, then base64).
///
/// Cursor records are small structs of primitives; serialization cannot
/// fail for them, so a failure here is a programming error.
pub fn encode_cursor<T: Serialize>(cursor: &T) -> String {
    let json = serde_json::to_vec(cursor).unwrap_or_default();
    BASE64.encode(json)
}

/// Decode an opaque token back into a cursor record of the expected shape.
pub fn decode_cursor<T: DeserializeOwned>(token: &str) -> Result<T, CursorError> {
    let bytes = BASE64
        .decode(token.as_bytes())
        .map_err(|_| CursorError::InvalidBase64)?;
    let text = std::str::from_utf8(&bytes).map_err(|_| CursorError::InvalidUtf8)?;
    serde_json::from_str(text).map_err(|_| CursorError::InvalidShape)
}

#[cfg(test)]
mod tests;
