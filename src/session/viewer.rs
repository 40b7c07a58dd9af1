//! The viewer context object.
//!
//! [`Viewer`] owns every collaborator together with the camera and the sphere scene.
//! Hosts forward their events to it: refresh callbacks go to
//! [`Viewer::on_animation_frame`], button clicks and shortcuts go to
//! [`Viewer::handle_action`], the device's presentation-change notification goes to
//! [`Viewer::on_present_change`], and media readiness goes to [`Viewer::on_video_ready`].

use crate::{
    device::display::{DeviceProbe, PresentationDevice},
    foundation::core::SurfaceSize,
    foundation::error::PanoResult,
    media::texture::{TextureState, VideoTexture},
    media::video::VideoSource,
    pose::camera::Camera,
    present::state::{PresentTargets, PresentationController, PresentationState},
    render::backend::Renderer,
    render::frame::{FrameKind, FrameOrchestrator, FrameStats, FrameTargets},
    render::scene::SphereScene,
    session::config::ViewerConfig,
    session::scheduler::{FrameHandle, FrameScheduler},
    ui::controls::{ButtonId, ButtonSpec, ControlSurface, UiAction},
};

/// Collaborators handed to [`Viewer::new`].
pub struct ViewerParts<R, D, V, U, S> {
    pub renderer: R,
    pub device: DeviceProbe<D>,
    pub video: V,
    pub controls: U,
    pub scheduler: S,
}

pub struct Viewer<R, D, V, U, S> {
    config: ViewerConfig,
    renderer: R,
    device: Option<D>,
    video: V,
    controls: U,
    scheduler: S,
    camera: Camera,
    scene: SphereScene,
    orchestrator: FrameOrchestrator,
    presentation: PresentationController,
    texture: VideoTexture,
    play_button: Option<ButtonId>,
    pending_frame: Option<FrameHandle>,
}

impl<R, D, V, U, S> Viewer<R, D, V, U, S>
where
    R: Renderer,
    D: PresentationDevice,
    V: VideoSource,
    U: ControlSurface,
    S: FrameScheduler,
{
    /// Wire up the collaborators.
    ///
    /// A missing or outdated presentation device is reported once and the viewer
    /// renders without pose input for the rest of its life. The animation loop is not
    /// started; call [`Viewer::start_animation`].
    pub fn new(config: ViewerConfig, parts: ViewerParts<R, D, V, U, S>) -> PanoResult<Self> {
        config.validate()?;
        let ViewerParts {
            mut renderer,
            device,
            video,
            mut controls,
            scheduler,
        } = parts;

        let mut presentation = PresentationController::new();
        let device = match device.into_device() {
            Ok(device) => {
                controls.add_button(ButtonSpec::reset_pose());
                presentation.install_button(&device, &mut controls);
                Some(device)
            }
            Err(msg) => {
                tracing::error!("{msg}");
                None
            }
        };

        let video_size = video.dimensions();
        let cam = &config.camera;
        let camera = Camera::new(cam.fov_degrees, video_size.aspect(), cam.near, cam.far);

        renderer.set_pixel_ratio(config.effective_pixel_ratio());
        renderer.set_size(video_size);

        let sphere = &config.sphere;
        let scene = SphereScene::new(
            sphere.radius,
            sphere.width_segments,
            sphere.height_segments,
            sphere.wireframe_color,
        );

        let mut viewer = Self {
            orchestrator: FrameOrchestrator::new(cam.mono_fov_degrees),
            config,
            renderer,
            device,
            video,
            controls,
            scheduler,
            camera,
            scene,
            presentation,
            texture: VideoTexture::default(),
            play_button: None,
            pending_frame: None,
        };

        if viewer.video.ready_state().can_show_frame() {
            viewer.on_video_ready();
        }
        Ok(viewer)
    }

    /// The video has data to show: bind it to the sphere and offer a play button.
    pub fn on_video_ready(&mut self) {
        if self.play_button.is_some() {
            return;
        }
        self.texture.bind(&mut self.scene);
        self.play_button = Some(self.controls.add_button(ButtonSpec::play()));
    }

    pub fn handle_action(&mut self, action: UiAction) {
        tracing::debug!(?action, "ui action");
        match action {
            UiAction::Play => self.play(),
            UiAction::ResetPose => {
                if let Some(device) = self.device.as_mut() {
                    device.reset_pose();
                }
            }
            UiAction::EnterPresentation => {
                let video_size = self.video.dimensions();
                if let Some(device) = self.device.as_mut() {
                    self.presentation.request_present(PresentTargets {
                        renderer: &mut self.renderer,
                        device,
                        controls: &mut self.controls,
                        camera: &mut self.camera,
                        video_size,
                    });
                }
            }
            UiAction::ExitPresentation => {
                let video_size = self.video.dimensions();
                if let Some(device) = self.device.as_mut() {
                    self.presentation.exit_present(PresentTargets {
                        renderer: &mut self.renderer,
                        device,
                        controls: &mut self.controls,
                        camera: &mut self.camera,
                        video_size,
                    });
                }
            }
            UiAction::SurfaceClick => {
                if self.video.is_paused() {
                    self.play();
                } else {
                    self.on_video_ready();
                    self.video.pause();
                }
            }
        }
    }

    /// Device-side presentation change (e.g. the headset was removed).
    pub fn on_present_change(&mut self) -> bool {
        let video_size = self.video.dimensions();
        let Some(device) = self.device.as_mut() else {
            return false;
        };
        self.presentation.on_present_change(PresentTargets {
            renderer: &mut self.renderer,
            device,
            controls: &mut self.controls,
            camera: &mut self.camera,
            video_size,
        })
    }

    /// Re-apply the surface size for the current presentation state.
    pub fn resize(&mut self) {
        let video_size = self.video.dimensions();
        match self.device.as_ref() {
            Some(device) => {
                self.presentation
                    .resize(&mut self.renderer, device, &mut self.camera, video_size);
            }
            None => {
                self.camera.aspect = video_size.aspect();
                self.camera.update_projection_matrix();
                self.renderer.set_size(video_size);
            }
        }
    }

    /// Draw one frame without touching the scheduler.
    pub fn render_frame(&mut self) -> FrameKind {
        self.orchestrator.render_frame(FrameTargets {
            renderer: &mut self.renderer,
            device: self.device.as_mut(),
            camera: &mut self.camera,
            scene: &self.scene,
        })
    }

    /// Start the refresh loop: schedule the next callback and draw immediately.
    pub fn start_animation(&mut self) -> FrameKind {
        tracing::debug!("animation started");
        self.on_animation_frame()
    }

    /// Refresh callback. Reschedules itself before drawing, so the loop runs until
    /// [`Viewer::stop_animation`].
    #[tracing::instrument(skip_all)]
    pub fn on_animation_frame(&mut self) -> FrameKind {
        self.pending_frame = Some(self.scheduler.request_frame());
        self.render_frame()
    }

    /// Cancel the pending refresh and pause the video.
    pub fn stop_animation(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.video.pause();
        tracing::debug!("animation stopped");
    }

    fn play(&mut self) {
        if let Some(id) = self.play_button.take() {
            self.controls.remove_button(id);
        }
        self.video.play();
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn stats(&self) -> FrameStats {
        self.orchestrator.stats()
    }

    pub fn presentation_state(&self) -> PresentationState {
        self.presentation.state()
    }

    pub fn texture_state(&self) -> TextureState {
        self.texture.state()
    }

    pub fn is_animating(&self) -> bool {
        self.pending_frame.is_some()
    }

    pub fn surface_size(&self) -> SurfaceSize {
        self.renderer.size()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn scene(&self) -> &SphereScene {
        &self.scene
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn device(&self) -> Option<&D> {
        self.device.as_ref()
    }

    pub fn device_mut(&mut self) -> Option<&mut D> {
        self.device.as_mut()
    }

    pub fn video(&self) -> &V {
        &self.video
    }

    pub fn video_mut(&mut self) -> &mut V {
        &mut self.video
    }

    pub fn controls(&self) -> &U {
        &self.controls
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/viewer.rs"]
mod tests;
