use super::*;

#[test]
fn defaults_are_valid() {
    let cfg = ViewerConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.camera.fov_degrees, 90.0);
    assert_eq!(cfg.camera.mono_fov_degrees, 45.0);
    assert_eq!(cfg.sphere.wireframe_color, 0x888888);
    assert_eq!(cfg.effective_pixel_ratio(), 1.0);
}

#[test]
fn partial_json_keeps_other_defaults() {
    let json = br#"{ "pixel_ratio": 2.6, "sphere": { "radius": 20.0 } }"#;
    let cfg = ViewerConfig::from_json_reader(&json[..]).unwrap();
    assert_eq!(cfg.sphere.radius, 20.0);
    assert_eq!(cfg.sphere.width_segments, 64);
    assert_eq!(cfg.camera.far, 100.0);
    assert_eq!(cfg.effective_pixel_ratio(), 2.0);
}

#[test]
fn fractional_ratio_below_one_clamps_up() {
    let cfg = ViewerConfig {
        pixel_ratio: 0.75,
        ..ViewerConfig::default()
    };
    cfg.validate().unwrap();
    assert_eq!(cfg.effective_pixel_ratio(), 1.0);
}

#[test]
fn rejects_sphere_outside_far_plane() {
    let mut cfg = ViewerConfig::default();
    cfg.sphere.radius = 150.0;
    let err = cfg.validate().unwrap_err();
    assert!(matches!(err, PanoError::Validation(_)));
    assert!(err.to_string().contains("far plane"));
}

#[test]
fn rejects_bad_clip_planes_and_segments() {
    let mut cfg = ViewerConfig::default();
    cfg.camera.near = 0.0;
    assert!(cfg.validate().is_err());

    let mut cfg = ViewerConfig::default();
    cfg.camera.far = 0.5;
    assert!(cfg.validate().is_err());

    let mut cfg = ViewerConfig::default();
    cfg.sphere.width_segments = 2;
    assert!(cfg.validate().is_err());

    let mut cfg = ViewerConfig::default();
    cfg.camera.mono_fov_degrees = 180.0;
    assert!(cfg.validate().is_err());

    let mut cfg = ViewerConfig::default();
    cfg.pixel_ratio = f32::NAN;
    assert!(cfg.validate().is_err());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = ViewerConfig::from_json_reader(&b"{ not json"[..]).unwrap_err();
    assert!(matches!(err, PanoError::Serde(_)));
}
