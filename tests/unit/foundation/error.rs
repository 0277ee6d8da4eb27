use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(CardError::decode("x").to_string().contains("decode error:"));
    assert!(
        CardError::resource("x")
            .to_string()
            .contains("resource acquisition error:")
    );
    assert!(
        CardError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    let too_large = CardError::payload_too_large(2101, 2000).to_string();
    assert!(too_large.contains("2101"));
    assert!(too_large.contains("2000"));
}

#[test]
fn only_payload_too_large_is_size_related() {
    assert!(CardError::payload_too_large(1, 0).is_size_related());
    assert!(!CardError::decode("x").is_size_related());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CardError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
