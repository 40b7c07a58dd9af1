//! Presentation state machine.
//!
//! Tracks whether the headset is driving output, resizes the surface on every
//! transition and keeps the enter/exit button in sync with the current state.

use crate::{
    device::display::PresentationDevice,
    foundation::core::{Eye, SurfaceSize},
    pose::camera::Camera,
    render::backend::Renderer,
    ui::controls::{ButtonId, ButtonSpec, ControlSurface},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PresentationState {
    #[default]
    NotPresenting,
    Presenting,
}

impl PresentationState {
    pub fn is_presenting(self) -> bool {
        self == Self::Presenting
    }

    fn from_presenting(presenting: bool) -> Self {
        if presenting {
            Self::Presenting
        } else {
            Self::NotPresenting
        }
    }
}

/// Everything a presentation transition touches.
pub struct PresentTargets<'a, R: ?Sized, D: ?Sized, U: ?Sized> {
    pub renderer: &'a mut R,
    pub device: &'a mut D,
    pub controls: &'a mut U,
    pub camera: &'a mut Camera,
    /// Native video dimensions, restored when presentation ends.
    pub video_size: SurfaceSize,
}

/// Surface size while presenting: both eyes side by side at the larger eye's resolution.
pub fn presenting_size<D: PresentationDevice + ?Sized>(device: &D) -> SurfaceSize {
    let left = device.eye_parameters(Eye::Left);
    let right = device.eye_parameters(Eye::Right);
    SurfaceSize::new(
        left.render_width.max(right.render_width) * 2,
        left.render_height.max(right.render_height),
    )
}

#[derive(Debug, Default)]
pub struct PresentationController {
    state: PresentationState,
    toggle_button: Option<ButtonId>,
}

impl PresentationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PresentationState {
        self.state
    }

    /// Add the "Enter VR" button if the device can present at all.
    pub fn install_button<D, U>(&mut self, device: &D, controls: &mut U)
    where
        D: PresentationDevice + ?Sized,
        U: ControlSurface + ?Sized,
    {
        if device.capabilities().can_present && self.toggle_button.is_none() {
            self.toggle_button = Some(controls.add_button(self.toggle_spec()));
        }
    }

    /// Ask the device to start presenting. A rejection is logged and leaves the state
    /// untouched so the user can retry.
    pub fn request_present<R, D, U>(&mut self, targets: PresentTargets<'_, R, D, U>)
    where
        R: Renderer + ?Sized,
        D: PresentationDevice + ?Sized,
        U: ControlSurface + ?Sized,
    {
        match targets.device.request_present() {
            Ok(()) => {
                self.on_present_change(targets);
            }
            Err(err) => tracing::error!(%err, "failed to enter presentation"),
        }
    }

    /// Ask the device to stop presenting. A rejection is logged and leaves the state
    /// untouched.
    pub fn exit_present<R, D, U>(&mut self, targets: PresentTargets<'_, R, D, U>)
    where
        R: Renderer + ?Sized,
        D: PresentationDevice + ?Sized,
        U: ControlSurface + ?Sized,
    {
        match targets.device.exit_present() {
            Ok(()) => {
                self.on_present_change(targets);
            }
            Err(err) => tracing::error!(%err, "failed to exit presentation"),
        }
    }

    /// Sync with the device's presenting flag. Returns `true` if the state changed;
    /// a notification that matches the current state does nothing.
    pub fn on_present_change<R, D, U>(&mut self, targets: PresentTargets<'_, R, D, U>) -> bool
    where
        R: Renderer + ?Sized,
        D: PresentationDevice + ?Sized,
        U: ControlSurface + ?Sized,
    {
        let PresentTargets {
            renderer,
            device,
            controls,
            camera,
            video_size,
        } = targets;

        let next = PresentationState::from_presenting(device.is_presenting());
        if next == self.state {
            return false;
        }
        tracing::debug!(from = ?self.state, to = ?next, "presentation changed");
        self.state = next;

        self.resize(renderer, &*device, camera, video_size);

        if device.capabilities().has_external_display {
            if let Some(id) = self.toggle_button.take() {
                controls.remove_button(id);
            }
            self.toggle_button = Some(controls.add_button(self.toggle_spec()));
        }
        true
    }

    /// Size the surface for the current state.
    pub fn resize<R, D>(&self, renderer: &mut R, device: &D, camera: &mut Camera, video_size: SurfaceSize)
    where
        R: Renderer + ?Sized,
        D: PresentationDevice + ?Sized,
    {
        if self.state.is_presenting() {
            renderer.set_size(presenting_size(device));
        } else {
            camera.aspect = video_size.aspect();
            camera.update_projection_matrix();
            renderer.set_size(video_size);
        }
    }

    fn toggle_spec(&self) -> ButtonSpec {
        match self.state {
            PresentationState::NotPresenting => ButtonSpec::enter_presentation(),
            PresentationState::Presenting => ButtonSpec::exit_presentation(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/present/state.rs"]
mod tests;
