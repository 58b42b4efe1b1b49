use std::path::Path;

use lilith_core::errors::{ErrorInfo, IoFailure, LilithError, MISSING_KEY_CODE};

#[test]
fn missing_key_surface() {
    let err = LilithError::missing_key("reduced couplings", "ZZ").at_entry(2);
    assert_eq!(err.missing_key_name(), Some("ZZ"));
    let info = err.info().expect("payload");
    assert_eq!(info.code, MISSING_KEY_CODE);
    assert_eq!(info.context.get("entry").map(String::as_str), Some("2"));
    assert!(err.to_string().contains("'ZZ' key is missing"));
}

#[test]
fn other_validation_errors_have_no_key() {
    let err = LilithError::validation("lilith.empty", "there are no couplings");
    assert_eq!(err.missing_key_name(), None);
    assert_eq!(err.info().map(|info| info.code.as_str()), Some("lilith.empty"));
}

#[test]
fn io_surface_carries_path_and_code() {
    let os_err = std::io::Error::from_raw_os_error(13);
    let err = LilithError::io(Path::new("/nowhere/out.xml"), &os_err);
    match &err {
        LilithError::Io(failure) => {
            assert_eq!(failure.path, "/nowhere/out.xml");
            assert_eq!(failure.code, Some(13));
        }
        other => panic!("unexpected error {other:?}"),
    }
    let text = err.to_string();
    assert!(text.starts_with("I/O error(13): "));
    assert!(text.ends_with("cannot write in the output file \"/nowhere/out.xml\"."));
    assert!(err.info().is_none());
}

#[test]
fn io_surface_without_os_code() {
    let failure = IoFailure {
        path: "out.slha".into(),
        code: None,
        message: "disk full".into(),
    };
    assert_eq!(
        failure.to_string(),
        "I/O error: disk full; cannot write in the output file \"out.slha\"."
    );
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = LilithError::Stats(ErrorInfo::new("lilith.chi2", "bad ndf").with_hint("use ndf > 0"));
    let json = serde_json::to_value(&err).expect("serialize");
    assert_eq!(json["family"], "Stats");
    assert_eq!(json["detail"]["hint"], "use ndf > 0");
    let back: LilithError = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back, err);
}
