use base64::Engine as _;

use crate::foundation::error::{CardError, CardResult};

/// A parsed `data:<mime>;base64,<payload>` URI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataUri {
    /// Media type declared in the URI header (e.g. `image/jpeg`).
    pub mime: String,
    /// Decoded payload bytes.
    pub bytes: Vec<u8>,
}

impl DataUri {
    /// Render back to the textual `data:` form.
    pub fn to_uri(&self) -> String {
        format_data_uri(&self.mime, &self.bytes)
    }
}

/// Build a base64 `data:` URI from raw bytes.
pub fn format_data_uri(mime: &str, bytes: &[u8]) -> String {
    let b64 = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{b64}")
}

/// Parse a base64 `data:` URI. Non-base64 (plain text) data URIs are rejected.
pub fn parse_data_uri(uri: &str) -> CardResult<DataUri> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| CardError::decode("data URI must start with 'data:'"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| CardError::decode("data URI is missing the ',' separator"))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| CardError::decode("only base64 data URIs are supported"))?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| CardError::decode(format!("data URI payload is not valid base64: {e}")))?;

    Ok(DataUri {
        mime: if mime.is_empty() {
            "text/plain".to_string()
        } else {
            mime.to_string()
        },
        bytes,
    })
}

/// Decode the image embedded in a `data:` URI.
pub fn decode_data_uri_image(uri: &str) -> CardResult<image::DynamicImage> {
    let data = parse_data_uri(uri)?;
    image::load_from_memory(&data.bytes)
        .map_err(|e| CardError::decode(format!("embedded image ({}) is unreadable: {e}", data.mime)))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/data_uri.rs"]
mod tests;
