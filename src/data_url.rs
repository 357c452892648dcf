//! `data:` URLs for PNG snapshots.

use base64::{Engine as _, engine::general_purpose};
use thiserror::Error;

pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

#[derive(Debug, Error)]
pub enum DataUrlError {
    #[error("not a base64 PNG data URL")]
    UnsupportedScheme,

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Wraps PNG bytes as `data:image/png;base64,...`.
pub fn encode_png(bytes: &[u8]) -> String {
    let mut url = String::with_capacity(PNG_DATA_URL_PREFIX.len() + bytes.len() * 4 / 3 + 4);
    url.push_str(PNG_DATA_URL_PREFIX);
    general_purpose::STANDARD.encode_string(bytes, &mut url);
    url
}

/// Extracts the PNG bytes from a data URL produced by [`encode_png`].
pub fn decode_png(url: &str) -> Result<Vec<u8>, DataUrlError> {
    let payload = url
        .trim()
        .strip_prefix(PNG_DATA_URL_PREFIX)
        .ok_or(DataUrlError::UnsupportedScheme)?;
    Ok(general_purpose::STANDARD.decode(payload)?)
}
