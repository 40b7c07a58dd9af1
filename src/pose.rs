pub(crate) mod camera;
pub(crate) mod resolve;
