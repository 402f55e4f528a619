use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        QuoteCardError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        QuoteCardError::drawing("x")
            .to_string()
            .contains("drawing error:")
    );
    assert!(
        QuoteCardError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(
        QuoteCardError::from(LoadError::Timeout { after_ms: 5000 })
            .to_string()
            .contains("load error:")
    );
}

#[test]
fn load_error_messages_name_the_cause() {
    assert_eq!(
        LoadError::Timeout { after_ms: 5000 }.to_string(),
        "image loading timed out after 5000ms"
    );
    assert!(LoadError::failed("404").to_string().contains("404"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = QuoteCardError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
