use crate::{
    device::display::EyeParameters,
    pose::camera::{Camera, EulerAngles, Pose},
    projection::fov::{Handedness, fov_to_projection},
};

/// Fixed horizontal field of view used for monoscopic rendering.
pub const MONO_FOV_DEGREES: f32 = 45.0;

/// Write `pose` (and, for stereo, the eye's projection and offset) into `camera`.
///
/// Missing orientation resolves to identity and missing position to the origin. The
/// eye offset is added in world axes after the orientation has been applied; it is
/// not rotated by the head pose.
pub fn resolve_view(pose: &Pose, eye: Option<&EyeParameters>, camera: &mut Camera) {
    resolve_view_with_mono_fov(pose, eye, camera, MONO_FOV_DEGREES);
}

/// [`resolve_view`] with a configurable monoscopic field of view.
pub fn resolve_view_with_mono_fov(
    pose: &Pose,
    eye: Option<&EyeParameters>,
    camera: &mut Camera,
    mono_fov_degrees: f32,
) {
    camera.position = pose.position_or_origin();
    camera.rotation = EulerAngles::from_quat(pose.orientation_or_identity());

    match eye {
        Some(eye) => {
            camera.projection =
                fov_to_projection(eye.field_of_view, Handedness::Right, camera.near, camera.far);
            camera.position += eye.offset;
        }
        None => {
            camera.set_horizontal_fov(mono_fov_degrees);
            camera.update_projection_matrix();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pose/resolve.rs"]
mod tests;
