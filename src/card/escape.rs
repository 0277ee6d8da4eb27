use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::foundation::error::{CardError, CardResult};

/// Bytes `encodeURIComponent` escapes: everything but ASCII alphanumerics and `-_.!~*'()`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-escape `input` the way browsers' `encodeURIComponent` does: UTF-8 bytes outside the
/// unreserved set become `%XX` with uppercase hex.
pub fn encode_uri_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

/// Reverse of [`encode_uri_component`]. Any `%XX` sequence is decoded; truncated or non-hex
/// escapes and escapes that do not form valid UTF-8 are errors.
pub fn decode_uri_component(input: &str) -> CardResult<String> {
    if let Some(at) = malformed_escape(input) {
        return Err(CardError::decode(format!(
            "malformed percent escape at byte {at}"
        )));
    }
    percent_decode_str(input)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| CardError::decode("percent-decoded text is not valid UTF-8"))
}

/// Byte offset of the first `%` not followed by two hex digits.
fn malformed_escape(input: &str) -> Option<usize> {
    let bytes = input.as_bytes();
    input.match_indices('%').map(|(i, _)| i).find(|&i| {
        !bytes
            .get(i + 1..i + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/card/escape.rs"]
mod tests;
