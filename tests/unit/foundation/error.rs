use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        InkError::malformed("x")
            .to_string()
            .contains("malformed document:")
    );
    assert!(InkError::config("x").to_string().contains("invalid config:"));
    assert!(InkError::render("x").to_string().contains("render error:"));
    assert!(
        InkError::vector_export("x")
            .to_string()
            .contains("vector export failed:")
    );
}

#[test]
fn input_io_classifies_not_found() {
    let err = InkError::input_io(
        "missing.json",
        std::io::Error::from(std::io::ErrorKind::NotFound),
    );
    assert!(matches!(err, InkError::InputNotFound { .. }));
    assert!(err.to_string().contains("missing.json"));

    let err = InkError::input_io(
        "locked.json",
        std::io::Error::from(std::io::ErrorKind::PermissionDenied),
    );
    assert!(matches!(err, InkError::InputUnreadable { .. }));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = InkError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
