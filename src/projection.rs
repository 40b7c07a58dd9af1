pub(crate) mod fov;
