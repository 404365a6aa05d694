use crate::device::{Gpu, GpuError};
use crate::input::InputEvent;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by [`Runtime`](crate::window::Runtime).
pub trait App {
    /// Called once the GPU for the window is up. An error ends the session.
    fn on_device_ready(&mut self, gpu: &Gpu<'_>) -> anyhow::Result<()>;

    /// Called when the GPU could not be brought up. The runtime exits afterwards.
    fn on_device_unavailable(&mut self, error: &GpuError) {
        log::warn!("no GPU device, nothing will be drawn: {error}");
    }

    /// Called for every input event the accumulator does not suppress.
    fn on_input(&mut self, event: &InputEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
