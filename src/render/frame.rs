use crate::{
    device::display::PresentationDevice,
    foundation::core::{Eye, SurfaceSize, Viewport},
    pose::camera::Camera,
    pose::resolve::resolve_view_with_mono_fov,
    render::backend::Renderer,
    render::scene::SphereScene,
};

/// What the orchestrator did for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameKind {
    /// No presentation device: camera rendered as-is.
    Fallback,
    /// Device present but not presenting: one pose-driven full-surface render.
    Mono,
    /// Presenting: left and right eye renders followed by a submit.
    Stereo,
}

/// Running per-frame counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct FrameStats {
    pub frames: u64,
    pub fallback_frames: u64,
    pub mono_frames: u64,
    pub stereo_frames: u64,
    pub submits: u64,
}

impl FrameStats {
    fn record(&mut self, kind: FrameKind) {
        self.frames += 1;
        match kind {
            FrameKind::Fallback => self.fallback_frames += 1,
            FrameKind::Mono => self.mono_frames += 1,
            FrameKind::Stereo => {
                self.stereo_frames += 1;
                self.submits += 1;
            }
        }
    }
}

/// Borrowed view of everything a frame touches.
pub struct FrameTargets<'a, R: ?Sized, D: ?Sized> {
    pub renderer: &'a mut R,
    pub device: Option<&'a mut D>,
    pub camera: &'a mut Camera,
    pub scene: &'a SphereScene,
}

/// Split a surface into side-by-side eye viewports. The right half absorbs an odd pixel.
pub fn stereo_viewports(size: SurfaceSize) -> [(Eye, Viewport); 2] {
    let half = size.width / 2;
    [
        (Eye::Left, Viewport::new(0, 0, half, size.height)),
        (Eye::Right, Viewport::new(half, 0, size.width - half, size.height)),
    ]
}

/// Per-frame driver deciding between fallback, mono and stereo rendering.
#[derive(Clone, Debug)]
pub struct FrameOrchestrator {
    mono_fov_degrees: f32,
    stats: FrameStats,
}

impl FrameOrchestrator {
    pub fn new(mono_fov_degrees: f32) -> Self {
        Self {
            mono_fov_degrees,
            stats: FrameStats::default(),
        }
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Render one frame.
    ///
    /// When presenting, the left eye is rendered before the right and the frame is
    /// submitted exactly once, after both.
    #[tracing::instrument(skip_all, fields(frame = self.stats.frames))]
    pub fn render_frame<R, D>(&mut self, targets: FrameTargets<'_, R, D>) -> FrameKind
    where
        R: Renderer + ?Sized,
        D: PresentationDevice + ?Sized,
    {
        let FrameTargets {
            renderer,
            device,
            camera,
            scene,
        } = targets;

        renderer.clear();

        let kind = match device {
            None => {
                renderer.render(scene, camera);
                FrameKind::Fallback
            }
            Some(device) if !device.is_presenting() => {
                let pose = device.pose();
                resolve_view_with_mono_fov(&pose, None, camera, self.mono_fov_degrees);
                renderer.render(scene, camera);
                FrameKind::Mono
            }
            Some(device) => {
                let pose = device.pose();
                let size = renderer.size();

                renderer.set_scissor_test(true);
                for (eye, viewport) in stereo_viewports(size) {
                    renderer.set_scissor(viewport);
                    renderer.set_viewport(viewport);
                    let params = device.eye_parameters(eye);
                    resolve_view_with_mono_fov(&pose, Some(&params), camera, self.mono_fov_degrees);
                    renderer.render(scene, camera);
                }
                renderer.set_scissor_test(false);
                renderer.set_viewport(size.full_viewport());

                device.submit_frame(&pose);
                FrameKind::Stereo
            }
        };

        self.stats.record(kind);
        tracing::trace!(?kind, "frame rendered");
        kind
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
