//! Time subsystem.
//!
//! One `FrameClock` per render loop; call `tick()` once per frame to obtain
//! the elapsed and total time fed to the frame uniforms.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
