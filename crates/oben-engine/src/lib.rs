//! Oben engine crate.
//!
//! Real-time fullscreen shader front end: platform runtime, GPU bring-up, input
//! accumulation, an arcball camera and a multi-pipeline renderer whose fragment
//! shaders receive time, viewport, camera and user parameters as uniforms.

pub mod camera;
pub mod core;
pub mod device;
pub mod events;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod params;
pub mod render;
pub mod time;
pub mod window;
