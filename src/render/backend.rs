use crate::{
    foundation::core::{SurfaceSize, Viewport},
    pose::camera::Camera,
    render::scene::SphereScene,
};

/// Straight (non-premultiplied) RGBA8 pixels, top row first.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl FrameRGBA {
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.width + x) * 4) as usize;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }
}

/// Rendering collaborator: owns the rasterizer and the output surface.
///
/// Viewport and scissor rectangles are in logical pixels; implementations scale them
/// by their pixel ratio.
pub trait Renderer {
    fn render(&mut self, scene: &SphereScene, camera: &Camera);

    fn clear(&mut self);

    fn set_viewport(&mut self, viewport: Viewport);

    fn set_scissor(&mut self, scissor: Viewport);

    fn set_scissor_test(&mut self, enabled: bool);

    /// Resize the output surface (logical pixels).
    fn set_size(&mut self, size: SurfaceSize);

    fn size(&self) -> SurfaceSize;

    fn set_pixel_ratio(&mut self, ratio: f32);
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
