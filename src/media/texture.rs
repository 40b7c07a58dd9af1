use crate::render::scene::{SphereMaterial, SphereScene};

/// Lifecycle of the sphere's video texture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextureState {
    /// Placeholder material in use; no video data seen yet.
    #[default]
    Unbound,
    /// Sphere material samples the video.
    Bound,
}

/// Binds the video texture to the sphere the first time the video reports data.
#[derive(Clone, Copy, Debug, Default)]
pub struct VideoTexture {
    state: TextureState,
}

impl VideoTexture {
    pub fn state(&self) -> TextureState {
        self.state
    }

    /// Swap the sphere material to the video texture. Returns `true` on the
    /// transition, `false` if already bound.
    pub fn bind(&mut self, scene: &mut SphereScene) -> bool {
        if self.state == TextureState::Bound {
            return false;
        }
        scene.material = SphereMaterial::VideoTexture;
        self.state = TextureState::Bound;
        tracing::debug!("video texture bound");
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/texture.rs"]
mod tests;
