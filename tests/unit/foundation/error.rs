use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PanoError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PanoError::capability("x")
            .to_string()
            .contains("capability error:")
    );
    assert!(
        PanoError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn device_errors_convert_and_keep_the_operation() {
    let err: PanoError = DeviceError::rejected("requestPresent", "no headset").into();
    let msg = err.to_string();
    assert!(msg.starts_with("device error:"));
    assert!(msg.contains("requestPresent rejected: no headset"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PanoError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
