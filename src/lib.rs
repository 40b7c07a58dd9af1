//! panoview renders equirectangular 360° video on the inside of a sphere, either through
//! a regular 2D surface or side by side for a stereoscopic head-mounted display.
//!
//! # Frame overview
//!
//! 1. **Pose**: the presentation device reports head orientation and position.
//! 2. **Resolve**: [`resolve_view`] writes the pose (plus the eye offset and an off-axis
//!    projection when presenting) into the shared [`Camera`].
//! 3. **Render**: [`FrameOrchestrator`] clears the surface, renders once (mono) or twice
//!    into the left and right halves (stereo), then submits the frame to the device.
//!
//! Everything outside the per-frame math sits behind collaborator traits
//! ([`Renderer`], [`PresentationDevice`], [`VideoSource`], [`ControlSurface`],
//! [`FrameScheduler`]) owned by the [`Viewer`] context object. Headless implementations
//! of each ship with the crate; [`CpuRenderer`] ray-casts the sphere on the CPU.
#![forbid(unsafe_code)]

mod device;
mod foundation;
mod media;
mod pose;
mod present;
mod projection;
mod render;
mod session;
mod ui;

pub use device::display::{Capabilities, DeviceProbe, EyeParameters, PresentationDevice};
pub use device::sim::{SimulatedHmd, SimulatedHmdSpec};
pub use foundation::core::{EulerRot, Eye, Mat4, Quat, SurfaceSize, Vec3, Viewport};
pub use foundation::error::{DeviceError, PanoError, PanoResult};
pub use media::texture::{TextureState, VideoTexture};
pub use media::video::{ReadyState, StillVideo, VideoSource};
pub use pose::camera::{CAMERA_EULER_ORDER, Camera, EulerAngles, Pose};
pub use pose::resolve::{MONO_FOV_DEGREES, resolve_view, resolve_view_with_mono_fov};
pub use present::state::{
    PresentTargets, PresentationController, PresentationState, presenting_size,
};
pub use projection::fov::{
    DEFAULT_Z_FAR, DEFAULT_Z_NEAR, FieldOfView, FovPort, Handedness, NdcScaleOffset,
    fov_port_to_projection, fov_to_ndc_scale_offset, fov_to_projection,
};
pub use render::backend::{FrameRGBA, Renderer};
pub use render::cpu::{CpuRenderer, EquirectFrame};
pub use render::frame::{
    FrameKind, FrameOrchestrator, FrameStats, FrameTargets, stereo_viewports,
};
pub use render::scene::{SphereMaterial, SphereScene};
pub use session::config::{CameraConfig, SphereConfig, ViewerConfig};
pub use session::scheduler::{FrameHandle, FrameScheduler, ManualScheduler};
pub use session::viewer::{Viewer, ViewerParts};
pub use ui::controls::{ButtonId, ButtonSpec, ControlSurface, HeadlessControls, UiAction};
