pub(crate) mod texture;
pub(crate) mod video;
