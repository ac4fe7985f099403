//! The scene driver: camera, configuration and the tick/render loop.

pub(crate) mod camera;
pub(crate) mod config;
pub(crate) mod driver;
