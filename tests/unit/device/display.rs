use super::*;

#[test]
fn probe_yields_device_when_available() {
    let probe = DeviceProbe::Available(7u8);
    assert_eq!(probe.into_device(), Ok(7));
}

#[test]
fn probe_failures_carry_distinct_messages() {
    let outdated = DeviceProbe::<u8>::Outdated.into_device().unwrap_err();
    let unsupported = DeviceProbe::<u8>::Unsupported.into_device().unwrap_err();
    assert!(outdated.contains("outdated"));
    assert!(unsupported.contains("mono"));
    assert_ne!(outdated, unsupported);
}

#[test]
fn eye_parameters_round_trip_through_json() {
    let json = r#"{
        "field_of_view": {"up_degrees": 41.0, "down_degrees": 48.0, "left_degrees": 51.0, "right_degrees": 43.5},
        "offset": [-0.032, 0.0, 0.0],
        "render_width": 1512,
        "render_height": 1680
    }"#;
    let eye: EyeParameters = serde_json::from_str(json).unwrap();
    assert_eq!(eye.render_width, 1512);
    assert_eq!(eye.offset, Vec3::new(-0.032, 0.0, 0.0));
    assert_eq!(eye.field_of_view.right_degrees, 43.5);
}
