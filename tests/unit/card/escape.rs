use super::*;

#[test]
fn unreserved_characters_pass_through() {
    let s = "AZaz09-_.!~*'()";
    assert_eq!(encode_uri_component(s), s);
}

#[test]
fn matches_browser_escaping() {
    assert_eq!(encode_uri_component("a b&c=d/e?"), "a%20b%26c%3Dd%2Fe%3F");
    assert_eq!(encode_uri_component("{\"k\":1}"), "%7B%22k%22%3A1%7D");
    assert_eq!(encode_uri_component("ừ"), "%E1%BB%AB");
    assert_eq!(encode_uri_component("+"), "%2B");
}

#[test]
fn decode_reverses_encode_for_unicode() {
    let s = "Chúc mừng ngày 20/10 💖";
    assert_eq!(decode_uri_component(&encode_uri_component(s)).unwrap(), s);
}

#[test]
fn decode_accepts_lowercase_hex_and_plain_text() {
    assert_eq!(decode_uri_component("%7b%7D").unwrap(), "{}");
    assert_eq!(decode_uri_component("plain").unwrap(), "plain");
}

#[test]
fn decode_rejects_malformed_escapes() {
    assert!(decode_uri_component("%").is_err());
    assert!(decode_uri_component("%4").is_err());
    assert!(decode_uri_component("%zz").is_err());
    // Lone continuation byte.
    assert!(decode_uri_component("%80").is_err());
}
