use std::io::Read;

use crate::{
    foundation::error::{PanoError, PanoResult},
    pose::resolve::MONO_FOV_DEGREES,
};

/// Viewer-wide settings.
///
/// Every field has a default, so a JSON file only needs the values it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub camera: CameraConfig,
    pub sphere: SphereConfig,
    /// Host device pixel ratio, floored and clamped to at least 1 when applied.
    pub pixel_ratio: f32,
    pub clear_rgba: [u8; 4],
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view of the fallback camera, in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Horizontal field of view used for the non-presenting pose-driven view.
    pub mono_fov_degrees: f32,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SphereConfig {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    /// Placeholder wireframe colour as `0xRRGGBB`.
    pub wireframe_color: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            sphere: SphereConfig::default(),
            pixel_ratio: 1.0,
            clear_rgba: [0, 0, 0, 255],
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 90.0,
            near: 1.0,
            far: 100.0,
            mono_fov_degrees: MONO_FOV_DEGREES,
        }
    }
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            radius: 50.0,
            width_segments: 64,
            height_segments: 32,
            wireframe_color: 0x888888,
        }
    }
}

impl ViewerConfig {
    pub fn from_json_reader<R: Read>(reader: R) -> PanoResult<Self> {
        let config: Self = serde_json::from_reader(reader)
            .map_err(|e| PanoError::serde(format!("viewer config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PanoResult<()> {
        let cam = &self.camera;
        if !cam.fov_degrees.is_finite() || cam.fov_degrees <= 0.0 || cam.fov_degrees >= 180.0 {
            return Err(PanoError::validation("camera fov_degrees must be in (0, 180)"));
        }
        if !cam.near.is_finite() || cam.near <= 0.0 {
            return Err(PanoError::validation("camera near must be finite and > 0"));
        }
        if !cam.far.is_finite() || cam.far <= cam.near {
            return Err(PanoError::validation("camera far must be finite and > near"));
        }
        if !cam.mono_fov_degrees.is_finite()
            || cam.mono_fov_degrees <= 0.0
            || cam.mono_fov_degrees >= 180.0
        {
            return Err(PanoError::validation(
                "camera mono_fov_degrees must be in (0, 180)",
            ));
        }

        let sphere = &self.sphere;
        if !sphere.radius.is_finite() || sphere.radius <= 0.0 {
            return Err(PanoError::validation("sphere radius must be finite and > 0"));
        }
        if sphere.radius >= cam.far {
            return Err(PanoError::validation(format!(
                "sphere radius {} is beyond the far plane {}",
                sphere.radius, cam.far
            )));
        }
        if sphere.width_segments < 3 || sphere.height_segments < 2 {
            return Err(PanoError::validation(
                "sphere needs at least 3 width segments and 2 height segments",
            ));
        }

        if !self.pixel_ratio.is_finite() || self.pixel_ratio <= 0.0 {
            return Err(PanoError::validation("pixel_ratio must be finite and > 0"));
        }
        Ok(())
    }

    /// Pixel ratio handed to the renderer: whole device pixels only.
    pub fn effective_pixel_ratio(&self) -> f32 {
        self.pixel_ratio.floor().max(1.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
