use hom_core::errors::{ErrorInfo, HomError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("path", "gt/d0_snr50dB.json")
        .with_context("reason", "example")
}

#[test]
fn precondition_error_surface() {
    let err = HomError::Precondition(sample_info("P001", "mask shape mismatch"));
    assert_eq!(err.info().code, "P001");
    assert!(err.info().context.contains_key("path"));
    assert!(err.to_string().starts_with("precondition violated"));
}

#[test]
fn config_error_surface() {
    let err = HomError::config("C001", "bad geometry");
    assert_eq!(err.info().code, "C001");
    assert!(err.info().context.is_empty());
}

#[test]
fn serde_error_surface() {
    let err = HomError::Serde(sample_info("S001", "unparsable json"));
    assert!(err.info().context.contains_key("reason"));
}

#[test]
fn display_includes_context_and_hint() {
    let info = ErrorInfo::new("E001", "problem")
        .with_context("rows", "5")
        .with_hint("check the plan");
    let rendered = info.to_string();
    assert_eq!(rendered, "problem (code: E001) | context: [rows=5] | hint: check the plan");
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = HomError::Codec(ErrorInfo::new("K001", "not a float raster"));
    let json = serde_json::to_value(&err).expect("serialize");
    assert_eq!(json["family"], "Codec");
    let decoded: HomError = serde_json::from_value(json).expect("deserialize");
    assert_eq!(decoded, err);
}
