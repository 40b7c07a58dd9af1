use crate::{
    foundation::core::{Eye, Vec3},
    foundation::error::DeviceError,
    pose::camera::Pose,
    projection::fov::FieldOfView,
};

/// Per-eye rendering parameters reported by a presentation device.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EyeParameters {
    pub field_of_view: FieldOfView,
    /// Eye-to-head translation in metres.
    pub offset: Vec3,
    /// Recommended render target width for this eye, in logical pixels.
    pub render_width: u32,
    /// Recommended render target height for this eye, in logical pixels.
    pub render_height: u32,
}

/// What a presentation device can do.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Capabilities {
    /// Whether the device can take over output for stereo presentation.
    pub can_present: bool,
    /// `false` for integrated displays (phone-in-headset), where the host surface is the
    /// headset and no separate enter/exit affordance is shown.
    pub has_external_display: bool,
}

/// Head-mounted or stereo-capable display collaborator.
///
/// `request_present` / `exit_present` report the eventual outcome of the device's
/// asynchronous operation; the device reflects success through `is_presenting`.
pub trait PresentationDevice {
    fn pose(&mut self) -> Pose;

    fn eye_parameters(&self, eye: Eye) -> EyeParameters;

    fn is_presenting(&self) -> bool;

    fn capabilities(&self) -> Capabilities;

    fn request_present(&mut self) -> Result<(), DeviceError>;

    fn exit_present(&mut self) -> Result<(), DeviceError>;

    /// Hand the composed frame to the device's timing and lens-distortion pipeline.
    fn submit_frame(&mut self, pose: &Pose);

    fn reset_pose(&mut self);
}

/// Result of looking for a presentation device when the viewer starts.
pub enum DeviceProbe<D> {
    /// A usable device was found.
    Available(D),
    /// The host exposes an older, incompatible VR interface.
    Outdated,
    /// The host has no VR support, or no display is connected.
    Unsupported,
}

impl<D> DeviceProbe<D> {
    /// The device, if one is available; otherwise the message to report once.
    pub fn into_device(self) -> Result<D, &'static str> {
        match self {
            Self::Available(device) => Ok(device),
            Self::Outdated => Err(
                "host supports an outdated VR interface; see https://webvr.info for supported versions",
            ),
            Self::Unsupported => Err("host has no VR display support; rendering in mono"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/device/display.rs"]
mod tests;
