//! Arcball camera.
//!
//! Orbit around a fixed focus point, plus screen-space pan and a free-axis
//! rotation offset the fragment shader applies to the scene.

mod arcball;

pub use arcball::{ArcballCamera, CameraConfig, CameraState, DEFAULT_RADIUS, MAX_RADIUS, MIN_RADIUS, PITCH_LIMIT};
