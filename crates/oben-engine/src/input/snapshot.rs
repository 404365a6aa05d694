use glam::Vec2;

/// Input accumulated between two frames.
///
/// Produced once per frame by an [`InputSource`](super::InputSource) and consumed
/// by the camera. Every field except `primary_held` is a sum over the events
/// received since the previous drain.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    /// Primary-button drag, in logical pixels.
    pub pointer: Vec2,

    /// Middle-button drag. Horizontal motion is inverted.
    pub pan: Vec2,

    /// Secondary-button drag, driving the free-axis rotation.
    pub rotation: Vec2,

    /// Sum of wheel steps; each wheel event contributes exactly +1 or -1.
    pub zoom: i32,

    /// Whether the primary button (or a touch contact) is down at poll time.
    pub primary_held: bool,
}

impl InputSnapshot {
    /// True when no deltas were accumulated.
    ///
    /// `primary_held` is instantaneous state and is not considered.
    pub fn is_idle(&self) -> bool {
        self.pointer == Vec2::ZERO && self.pan == Vec2::ZERO && self.rotation == Vec2::ZERO && self.zoom == 0
    }
}
