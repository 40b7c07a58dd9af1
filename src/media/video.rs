use crate::foundation::core::SurfaceSize;

/// How much media data the video element has buffered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum ReadyState {
    HaveNothing = 0,
    HaveMetadata = 1,
    HaveCurrentData = 2,
    HaveFutureData = 3,
    HaveEnoughData = 4,
}

impl ReadyState {
    /// Whether a frame is available to upload as a texture.
    pub fn can_show_frame(self) -> bool {
        self >= Self::HaveCurrentData
    }
}

/// Video element collaborator.
pub trait VideoSource {
    fn is_paused(&self) -> bool;

    fn ready_state(&self) -> ReadyState;

    fn play(&mut self);

    fn pause(&mut self);

    /// Native dimensions of the video.
    fn dimensions(&self) -> SurfaceSize;
}

/// A single decoded frame standing in for a playing video.
#[derive(Clone, Debug)]
pub struct StillVideo {
    dimensions: SurfaceSize,
    ready: ReadyState,
    paused: bool,
}

impl StillVideo {
    pub fn new(dimensions: SurfaceSize) -> Self {
        Self {
            dimensions,
            ready: ReadyState::HaveEnoughData,
            paused: true,
        }
    }

    /// A video that has not buffered anything yet.
    pub fn loading(dimensions: SurfaceSize) -> Self {
        Self {
            ready: ReadyState::HaveNothing,
            ..Self::new(dimensions)
        }
    }

    pub fn set_ready_state(&mut self, ready: ReadyState) {
        self.ready = ready;
    }
}

impl VideoSource for StillVideo {
    fn is_paused(&self) -> bool {
        self.paused
    }

    fn ready_state(&self) -> ReadyState {
        self.ready
    }

    fn play(&mut self) {
        self.paused = false;
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn dimensions(&self) -> SurfaceSize {
        self.dimensions
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/video.rs"]
mod tests;
