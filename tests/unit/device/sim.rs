use super::*;

#[test]
fn default_spec_is_mirror_symmetric() {
    let spec = SimulatedHmdSpec::default();
    assert_eq!(spec.left.offset.x, -spec.right.offset.x);
    assert_eq!(
        spec.left.field_of_view.left_degrees,
        spec.right.field_of_view.right_degrees
    );
    assert!(spec.capabilities.can_present);
}

#[test]
fn pose_advances_yaw_and_reset_returns_to_forward() {
    let mut hmd = SimulatedHmd::default().with_yaw_step_degrees(90.0);
    let first = hmd.pose();
    let second = hmd.pose();
    assert_eq!(first.orientation, Some(Quat::IDENTITY));
    let expected = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
    assert!(second.orientation.unwrap().abs_diff_eq(expected, 1e-6));

    hmd.reset_pose();
    assert_eq!(hmd.pose().orientation, Some(Quat::IDENTITY));
}

#[test]
fn orientation_only_tracking_omits_position() {
    let mut hmd = SimulatedHmd::default().without_position_tracking();
    assert_eq!(hmd.pose().position, None);
}

#[test]
fn rejection_applies_once() {
    let mut hmd = SimulatedHmd::default();
    hmd.reject_next_request("busy");
    assert_eq!(
        hmd.request_present(),
        Err(DeviceError::rejected("requestPresent", "busy"))
    );
    assert!(!hmd.is_presenting());
    assert_eq!(hmd.request_present(), Ok(()));
    assert!(hmd.is_presenting());
}

#[test]
fn non_presentable_device_refuses_requests() {
    let mut spec = SimulatedHmdSpec::default();
    spec.capabilities.can_present = false;
    let mut hmd = SimulatedHmd::new(spec);
    assert_eq!(hmd.request_present(), Err(DeviceError::NotPresentable));
}

#[test]
fn submit_records_count_and_pose() {
    let mut hmd = SimulatedHmd::default();
    let pose = hmd.pose();
    hmd.submit_frame(&pose);
    hmd.submit_frame(&pose);
    assert_eq!(hmd.submitted_frames(), 2);
    assert_eq!(hmd.last_submitted_pose(), Some(pose));
}

#[test]
fn held_pose_overrides_head_motion() {
    let held = Pose::new(Quat::from_rotation_x(0.3), Vec3::new(1.0, 2.0, 3.0));
    let mut hmd = SimulatedHmd::default()
        .with_yaw_step_degrees(10.0)
        .hold_pose(held);
    assert_eq!(hmd.pose(), held);
    assert_eq!(hmd.pose(), held);
}
