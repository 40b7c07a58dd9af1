/// Surface appearance of the viewing sphere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SphereMaterial {
    /// Placeholder shown until video data is available.
    Wireframe { color_rgb: u32 },
    /// Equirectangular video frame, sampled with linear filtering.
    VideoTexture,
}

/// The scene handed to the renderer: a single sphere viewed from the inside.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SphereScene {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    /// Negate X so the texture reads correctly from inside the sphere.
    pub mirror_x: bool,
    pub material: SphereMaterial,
}

impl SphereScene {
    pub fn new(radius: f32, width_segments: u32, height_segments: u32, wireframe_rgb: u32) -> Self {
        Self {
            radius,
            width_segments,
            height_segments,
            mirror_x: true,
            material: SphereMaterial::Wireframe {
                color_rgb: wireframe_rgb,
            },
        }
    }

    pub fn has_video_texture(&self) -> bool {
        self.material == SphereMaterial::VideoTexture
    }
}
