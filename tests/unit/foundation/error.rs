use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        QuadError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        QuadError::projection("x")
            .to_string()
            .contains("projection error:")
    );
    assert!(
        QuadError::lifecycle("x")
            .to_string()
            .contains("lifecycle error:")
    );
    assert!(QuadError::render("x").to_string().contains("render error:"));
    assert!(
        QuadError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = QuadError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: QuadError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, QuadError::Serde(_)));
}
