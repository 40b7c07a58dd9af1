pub(crate) mod controls;
