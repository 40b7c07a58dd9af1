//! Simulated head-mounted display for headless runs and tests.
//!
//! Reports a fixed pair of eyes, advances a yaw rotation each time the pose is
//! queried, and counts submitted frames.

use crate::{
    device::display::{Capabilities, EyeParameters, PresentationDevice},
    foundation::core::{Eye, Quat, Vec3},
    foundation::error::DeviceError,
    pose::camera::Pose,
    projection::fov::FieldOfView,
};

/// Standing head height used for the simulated pose.
const HEAD_HEIGHT_M: f32 = 1.6;
/// Average inter-pupillary distance.
const DEFAULT_IPD_M: f32 = 0.064;

/// Static description of a simulated headset.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SimulatedHmdSpec {
    pub left: EyeParameters,
    pub right: EyeParameters,
    pub capabilities: Capabilities,
}

impl Default for SimulatedHmdSpec {
    fn default() -> Self {
        let eye = |sign: f32, inner: f32, outer: f32| EyeParameters {
            field_of_view: FieldOfView {
                up_degrees: 45.0,
                down_degrees: 45.0,
                left_degrees: if sign < 0.0 { outer } else { inner },
                right_degrees: if sign < 0.0 { inner } else { outer },
            },
            offset: Vec3::new(sign * DEFAULT_IPD_M * 0.5, 0.0, 0.0),
            render_width: 960,
            render_height: 1080,
        };
        Self {
            left: eye(-1.0, 40.0, 50.0),
            right: eye(1.0, 40.0, 50.0),
            capabilities: Capabilities {
                can_present: true,
                has_external_display: true,
            },
        }
    }
}

/// Headless [`PresentationDevice`].
#[derive(Debug)]
pub struct SimulatedHmd {
    spec: SimulatedHmdSpec,
    presenting: bool,
    yaw_rad: f32,
    yaw_step_rad: f32,
    track_position: bool,
    held_pose: Option<Pose>,
    reject_next: Option<String>,
    submitted: u64,
    last_submitted: Option<Pose>,
}

impl SimulatedHmd {
    pub fn new(spec: SimulatedHmdSpec) -> Self {
        Self {
            spec,
            presenting: false,
            yaw_rad: 0.0,
            yaw_step_rad: 0.0,
            track_position: true,
            held_pose: None,
            reject_next: None,
            submitted: 0,
            last_submitted: None,
        }
    }

    /// Rotate the head by `degrees` around the vertical axis on every pose query.
    pub fn with_yaw_step_degrees(mut self, degrees: f32) -> Self {
        self.yaw_step_rad = degrees.to_radians();
        self
    }

    /// Report orientation only, like a 3-DoF headset.
    pub fn without_position_tracking(mut self) -> Self {
        self.track_position = false;
        self
    }

    /// Report `pose` on every query instead of the simulated head motion.
    pub fn hold_pose(mut self, pose: Pose) -> Self {
        self.held_pose = Some(pose);
        self
    }

    /// Make the next present/exit request fail with `reason`.
    pub fn reject_next_request(&mut self, reason: impl Into<String>) {
        self.reject_next = Some(reason.into());
    }

    /// Flip presentation from the device side (e.g. headset taken off).
    pub fn set_presenting(&mut self, presenting: bool) {
        self.presenting = presenting;
    }

    pub fn submitted_frames(&self) -> u64 {
        self.submitted
    }

    pub fn last_submitted_pose(&self) -> Option<Pose> {
        self.last_submitted
    }

    fn take_rejection(&mut self, op: &'static str) -> Result<(), DeviceError> {
        match self.reject_next.take() {
            Some(reason) => Err(DeviceError::rejected(op, reason)),
            None => Ok(()),
        }
    }
}

impl Default for SimulatedHmd {
    fn default() -> Self {
        Self::new(SimulatedHmdSpec::default())
    }
}

impl PresentationDevice for SimulatedHmd {
    fn pose(&mut self) -> Pose {
        if let Some(pose) = self.held_pose {
            return pose;
        }
        let pose = Pose {
            orientation: Some(Quat::from_rotation_y(self.yaw_rad)),
            position: self
                .track_position
                .then(|| Vec3::new(0.0, HEAD_HEIGHT_M, 0.0)),
        };
        self.yaw_rad = (self.yaw_rad + self.yaw_step_rad) % std::f32::consts::TAU;
        pose
    }

    fn eye_parameters(&self, eye: Eye) -> EyeParameters {
        match eye {
            Eye::Left => self.spec.left,
            Eye::Right => self.spec.right,
        }
    }

    fn is_presenting(&self) -> bool {
        self.presenting
    }

    fn capabilities(&self) -> Capabilities {
        self.spec.capabilities
    }

    fn request_present(&mut self) -> Result<(), DeviceError> {
        if !self.spec.capabilities.can_present {
            return Err(DeviceError::NotPresentable);
        }
        self.take_rejection("requestPresent")?;
        self.presenting = true;
        Ok(())
    }

    fn exit_present(&mut self) -> Result<(), DeviceError> {
        self.take_rejection("exitPresent")?;
        self.presenting = false;
        Ok(())
    }

    fn submit_frame(&mut self, pose: &Pose) {
        self.submitted += 1;
        self.last_submitted = Some(*pose);
    }

    fn reset_pose(&mut self) {
        self.yaw_rad = 0.0;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/device/sim.rs"]
mod tests;
