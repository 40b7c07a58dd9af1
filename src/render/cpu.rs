//! Reference software renderer.
//!
//! Ray-casts every pixel of the active viewport against the viewing sphere instead of
//! rasterizing its mesh, so the output only depends on the camera and the sphere
//! parameters. Rows are shaded in parallel within a single `render` call.

use std::{path::Path, sync::Arc};

use anyhow::Context;
use rayon::prelude::*;

use crate::{
    foundation::core::{SurfaceSize, Vec3, Viewport},
    foundation::error::{PanoError, PanoResult},
    pose::camera::Camera,
    render::backend::{FrameRGBA, Renderer},
    render::scene::{SphereMaterial, SphereScene},
};

/// Half-width of a wireframe line, in fractions of one sphere segment.
const WIREFRAME_HALF_WIDTH: f32 = 0.06;

/// Decoded equirectangular frame used as the sphere's video texture.
#[derive(Clone, Debug)]
pub struct EquirectFrame {
    pub width: u32,
    pub height: u32,
    rgba: Arc<Vec<u8>>,
}

impl EquirectFrame {
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> PanoResult<Self> {
        if width == 0 || height == 0 {
            return Err(PanoError::validation("equirect frame must be non-empty"));
        }
        if rgba.len() != (width as usize) * (height as usize) * 4 {
            return Err(PanoError::validation(
                "equirect frame expects width*height*4 bytes",
            ));
        }
        Ok(Self {
            width,
            height,
            rgba: Arc::new(rgba),
        })
    }

    /// Decode an image file (PNG or JPEG).
    pub fn open(path: &Path) -> PanoResult<Self> {
        let img = image::open(path)
            .with_context(|| format!("decode equirect image '{}'", path.display()))?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba(width, height, rgba.into_raw())
    }

    /// Bilinear sample at texture coordinates; `u` wraps, `v` clamps (0 = top row).
    pub fn sample(&self, u: f32, v: f32) -> [u8; 4] {
        let w = self.width as i64;
        let h = self.height as i64;
        let x = u * self.width as f32 - 0.5;
        let y = v * self.height as f32 - 0.5;
        let (x0, y0) = (x.floor(), y.floor());
        let (fx, fy) = (x - x0, y - y0);

        let texel = |tx: i64, ty: i64| -> [f32; 4] {
            let tx = tx.rem_euclid(w) as usize;
            let ty = ty.clamp(0, h - 1) as usize;
            let i = (ty * self.width as usize + tx) * 4;
            let p = &self.rgba[i..i + 4];
            [p[0] as f32, p[1] as f32, p[2] as f32, p[3] as f32]
        };

        let (x0, y0) = (x0 as i64, y0 as i64);
        let a = texel(x0, y0);
        let b = texel(x0 + 1, y0);
        let c = texel(x0, y0 + 1);
        let d = texel(x0 + 1, y0 + 1);

        let mut out = [0u8; 4];
        for k in 0..4 {
            let top = a[k] + (b[k] - a[k]) * fx;
            let bottom = c[k] + (d[k] - c[k]) * fx;
            out[k] = (top + (bottom - top) * fy).round().clamp(0.0, 255.0) as u8;
        }
        out
    }
}

/// Headless [`Renderer`] writing into an in-memory RGBA8 drawing buffer.
pub struct CpuRenderer {
    size: SurfaceSize,
    pixel_ratio: f32,
    clear_rgba: [u8; 4],
    viewport: Viewport,
    scissor: Viewport,
    scissor_test: bool,
    pixels: Vec<u8>,
    video_frame: Option<EquirectFrame>,
    render_calls: u64,
}

impl CpuRenderer {
    pub fn new(size: SurfaceSize, clear_rgba: [u8; 4]) -> Self {
        let mut renderer = Self {
            size,
            pixel_ratio: 1.0,
            clear_rgba,
            viewport: size.full_viewport(),
            scissor: size.full_viewport(),
            scissor_test: false,
            pixels: Vec::new(),
            video_frame: None,
            render_calls: 0,
        };
        renderer.reallocate();
        renderer
    }

    /// Frame sampled when the scene material is [`SphereMaterial::VideoTexture`].
    pub fn set_video_frame(&mut self, frame: EquirectFrame) {
        self.video_frame = Some(frame);
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    pub fn drawing_buffer_size(&self) -> SurfaceSize {
        self.size.scaled(self.pixel_ratio)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn render_calls(&self) -> u64 {
        self.render_calls
    }

    pub fn frame(&self) -> FrameRGBA {
        let buf = self.drawing_buffer_size();
        FrameRGBA {
            width: buf.width,
            height: buf.height,
            data: self.pixels.clone(),
        }
    }

    pub fn write_png(&self, path: &Path) -> PanoResult<()> {
        let buf = self.drawing_buffer_size();
        let img = image::RgbaImage::from_raw(buf.width, buf.height, self.pixels.clone())
            .ok_or_else(|| PanoError::validation("drawing buffer size mismatch"))?;
        img.save(path)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }

    fn reallocate(&mut self) {
        let buf = self.drawing_buffer_size();
        let len = (buf.width as usize) * (buf.height as usize) * 4;
        self.pixels = self
            .clear_rgba
            .iter()
            .copied()
            .cycle()
            .take(len)
            .collect();
    }

    /// Active region in physical pixels (bottom-left origin), clipped to the buffer.
    fn active_region(&self, logical: Viewport) -> Viewport {
        let buf = self.drawing_buffer_size();
        let mut region = scale_viewport(logical, self.pixel_ratio);
        if self.scissor_test {
            region = region.intersect(scale_viewport(self.scissor, self.pixel_ratio));
        }
        region.intersect(buf.full_viewport())
    }
}

fn scale_viewport(v: Viewport, ratio: f32) -> Viewport {
    let s = |n: u32| (n as f32 * ratio) as u32;
    Viewport::new(s(v.x), s(v.y), s(v.width), s(v.height))
}

impl Renderer for CpuRenderer {
    fn render(&mut self, scene: &SphereScene, camera: &Camera) {
        self.render_calls += 1;

        let region = self.active_region(self.viewport);
        if region.is_empty() {
            return;
        }
        let vp = scale_viewport(self.viewport, self.pixel_ratio);
        let buf = self.drawing_buffer_size();
        let row_bytes = buf.width as usize * 4;

        let inv_view_proj = camera.view_projection().inverse();
        let origin = camera.position;
        let video = match scene.material {
            SphereMaterial::VideoTexture => self.video_frame.as_ref(),
            SphereMaterial::Wireframe { .. } => None,
        };

        // Buffer rows are stored top-down; the region is bottom-up.
        let top = (buf.height - (region.y + region.height)) as usize;
        let bottom = (buf.height - region.y) as usize;

        self.pixels
            .par_chunks_mut(row_bytes)
            .enumerate()
            .skip(top)
            .take(bottom - top)
            .for_each(|(row, line)| {
                let py = buf.height as usize - 1 - row;
                let ny = ((py as f32 + 0.5 - vp.y as f32) / vp.height as f32) * 2.0 - 1.0;
                for px in region.x..region.x + region.width {
                    let nx = ((px as f32 + 0.5 - vp.x as f32) / vp.width as f32) * 2.0 - 1.0;
                    let target = inv_view_proj.project_point3(Vec3::new(nx, ny, 0.5));
                    let dir = (target - origin).normalize_or_zero();
                    let Some((u, v)) = sphere_uv(scene, origin, dir) else {
                        continue;
                    };
                    let color = match (scene.material, video) {
                        (SphereMaterial::VideoTexture, Some(frame)) => Some(frame.sample(u, v)),
                        (SphereMaterial::VideoTexture, None) => None,
                        (SphereMaterial::Wireframe { color_rgb }, _) => {
                            on_wireframe(scene, u, v).then(|| rgb_to_rgba(color_rgb))
                        }
                    };
                    if let Some(rgba) = color {
                        let i = px as usize * 4;
                        line[i..i + 4].copy_from_slice(&rgba);
                    }
                }
            });
    }

    fn clear(&mut self) {
        let region = self.active_region(self.drawing_buffer_size().full_viewport());
        if region.is_empty() {
            return;
        }
        let buf = self.drawing_buffer_size();
        let row_bytes = buf.width as usize * 4;
        let top = (buf.height - (region.y + region.height)) as usize;
        for row in top..top + region.height as usize {
            let line = &mut self.pixels[row * row_bytes..(row + 1) * row_bytes];
            for px in region.x..region.x + region.width {
                let i = px as usize * 4;
                line[i..i + 4].copy_from_slice(&self.clear_rgba);
            }
        }
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn set_scissor(&mut self, scissor: Viewport) {
        self.scissor = scissor;
    }

    fn set_scissor_test(&mut self, enabled: bool) {
        self.scissor_test = enabled;
    }

    fn set_size(&mut self, size: SurfaceSize) {
        self.size = size;
        self.viewport = size.full_viewport();
        self.scissor = size.full_viewport();
        self.reallocate();
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn set_pixel_ratio(&mut self, ratio: f32) {
        self.pixel_ratio = ratio;
        self.reallocate();
    }
}

/// Equirectangular texture coordinates where a ray from inside the sphere exits it.
///
/// `u` runs around the vertical (Y) axis, `v` from the top pole (0) to the bottom (1).
fn sphere_uv(scene: &SphereScene, origin: Vec3, dir: Vec3) -> Option<(f32, f32)> {
    let r = scene.radius;
    let b = origin.dot(dir);
    let c = origin.length_squared() - r * r;
    let disc = b * b - c;
    if disc < 0.0 || dir == Vec3::ZERO {
        return None;
    }
    let t = -b + disc.sqrt();
    if t <= 0.0 {
        return None;
    }
    let p = origin + dir * t;

    // Unmirrored sphere vertices are x = -r cos(phi) sin(theta), z = r sin(phi) sin(theta).
    let x_unmirrored = if scene.mirror_x { -p.x } else { p.x };
    let phi = p.z.atan2(-x_unmirrored).rem_euclid(std::f32::consts::TAU);
    let theta = (p.y / r).clamp(-1.0, 1.0).acos();
    Some((
        phi / std::f32::consts::TAU,
        theta / std::f32::consts::PI,
    ))
}

fn on_wireframe(scene: &SphereScene, u: f32, v: f32) -> bool {
    let near_line = |t: f32, segments: u32| {
        let f = (t * segments as f32).fract();
        f.min(1.0 - f) < WIREFRAME_HALF_WIDTH
    };
    near_line(u, scene.width_segments) || near_line(v, scene.height_segments)
}

fn rgb_to_rgba(rgb: u32) -> [u8; 4] {
    [(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 255]
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
