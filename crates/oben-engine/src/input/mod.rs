//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Runtime code translates platform events into `InputEvent`s and feeds them
//! to an `InputAccumulator`; the render loop only sees the `InputSource`
//! capability and polls it once per frame.

mod accumulator;
mod snapshot;
mod source;
mod types;

pub mod platform;

pub use accumulator::{InputAccumulator, Propagation};
pub use snapshot::InputSnapshot;
pub use source::InputSource;
pub use types::{
    InputEvent,
    Key,
    KeyState,
    Modifiers,
    MouseButton,
    MouseButtonState,
    MouseWheelDelta,
    PointerButtonEvent,
    PointerMoveEvent,
    TouchEvent,
    TouchPhase,
};
