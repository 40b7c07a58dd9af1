use crate::foundation::core::{EulerRot, Mat4, Quat, Vec3};

/// Euler order used for camera orientation: intrinsic X, then Z, then Y.
pub const CAMERA_EULER_ORDER: EulerRot = EulerRot::XZY;

/// Head pose for one frame, in tracking space.
///
/// Either component may be missing when the device cannot track it.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Pose {
    /// Unit quaternion `[x, y, z, w]`.
    #[serde(default)]
    pub orientation: Option<Quat>,
    /// Position in metres.
    #[serde(default)]
    pub position: Option<Vec3>,
}

impl Pose {
    pub fn new(orientation: Quat, position: Vec3) -> Self {
        Self {
            orientation: Some(orientation),
            position: Some(position),
        }
    }

    pub fn orientation_or_identity(&self) -> Quat {
        self.orientation.unwrap_or(Quat::IDENTITY)
    }

    pub fn position_or_origin(&self) -> Vec3 {
        self.position.unwrap_or(Vec3::ZERO)
    }
}

/// Euler angles in radians, applied in [`CAMERA_EULER_ORDER`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EulerAngles {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl EulerAngles {
    pub fn from_quat(q: Quat) -> Self {
        let (x, z, y) = q.to_euler(CAMERA_EULER_ORDER);
        Self { x, y, z }
    }

    pub fn to_quat(self) -> Quat {
        Quat::from_euler(CAMERA_EULER_ORDER, self.x, self.z, self.y)
    }
}

/// The single perspective camera shared by every render call.
///
/// Pose resolution overwrites it in place for each eye; nothing else may read it
/// between the left-eye write and the right-eye overwrite.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: EulerAngles,
    /// Up vector; the sphere is authored Z-up.
    pub up: Vec3,
    /// Vertical field of view in degrees for the symmetric projection.
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub projection: Mat4,
}

impl Camera {
    pub fn new(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            rotation: EulerAngles::default(),
            up: Vec3::Z,
            fov_degrees,
            aspect,
            near,
            far,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Recompute the symmetric perspective from `fov_degrees` and `aspect`.
    pub fn update_projection_matrix(&mut self) {
        self.projection =
            Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far);
    }

    /// Set a horizontal field of view, stored as the equivalent vertical one.
    pub fn set_horizontal_fov(&mut self, degrees: f32) {
        let half = (degrees.to_radians() * 0.5).tan() / self.aspect;
        self.fov_degrees = (2.0 * half.atan()).to_degrees();
    }

    pub fn orientation(&self) -> Quat {
        self.rotation.to_quat()
    }

    /// Camera-to-world transform.
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation(), self.position)
    }

    /// World-to-camera transform.
    pub fn view_matrix(&self) -> Mat4 {
        self.world_matrix().inverse()
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pose/camera.rs"]
mod tests;
