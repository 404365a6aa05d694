use glam::Vec2;

use super::snapshot::InputSnapshot;
use super::source::InputSource;
use super::types::{
    InputEvent, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent, TouchEvent,
    TouchPhase,
};

/// Whether the host should keep processing an event after the accumulator saw it.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Propagation {
    /// Event may reach the application and the platform default handling.
    Forward,
    /// Event is owned by the camera controls (wheel, context menu, secondary button).
    Suppress,
}

/// Collects pointer and wheel input between frames.
///
/// Events are applied in O(1) as they arrive. [`drain_and_reset`](Self::drain_and_reset)
/// is the single point where accumulated deltas are handed out and cleared.
///
/// Drag classification per motion event, highest priority first:
/// - primary button (or an active touch): orbit delta
/// - middle button: pan delta, horizontal inverted
/// - secondary button: axis-rotation delta
#[derive(Debug, Default)]
pub struct InputAccumulator {
    pointer: Vec2,
    pan: Vec2,
    rotation: Vec2,
    zoom: i32,

    primary_down: bool,
    middle_down: bool,
    secondary_down: bool,

    /// Last pointer position; `None` until the pointer is seen again.
    last_pos: Option<Vec2>,

    /// Tracked touch contact (id, last position).
    touch: Option<(u64, Vec2)>,
}

impl InputAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one platform-agnostic event.
    pub fn handle(&mut self, ev: &InputEvent) -> Propagation {
        match ev {
            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                let pos = Vec2::new(*x, *y);
                if let Some(last) = self.last_pos {
                    self.accumulate_drag(pos - last);
                }
                self.last_pos = Some(pos);
                Propagation::Forward
            }

            InputEvent::PointerButton(PointerButtonEvent { button, state, pos, .. }) => {
                if let Some((x, y)) = pos {
                    self.last_pos = Some(Vec2::new(*x, *y));
                }
                let down = *state == MouseButtonState::Pressed;
                match button {
                    MouseButton::Left => self.primary_down = down,
                    MouseButton::Middle => self.middle_down = down,
                    MouseButton::Right => {
                        self.secondary_down = down;
                        return Propagation::Suppress;
                    }
                    _ => {}
                }
                Propagation::Forward
            }

            InputEvent::MouseWheel { delta, .. } => {
                self.zoom += wheel_step(delta.vertical());
                Propagation::Suppress
            }

            InputEvent::Touch(touch) => {
                self.apply_touch(touch);
                Propagation::Forward
            }

            InputEvent::ContextMenu => Propagation::Suppress,

            InputEvent::PointerLeft => {
                self.last_pos = None;
                Propagation::Forward
            }

            InputEvent::Focused(false) => {
                // Releases may never arrive once focus is gone.
                self.primary_down = false;
                self.middle_down = false;
                self.secondary_down = false;
                self.last_pos = None;
                self.touch = None;
                Propagation::Forward
            }

            InputEvent::Focused(true) | InputEvent::ModifiersChanged(_) | InputEvent::Key { .. } => {
                Propagation::Forward
            }
        }
    }

    /// Returns the accumulated deltas and zeroes them.
    ///
    /// Held-button state is reported as it is right now and is left untouched.
    pub fn drain_and_reset(&mut self) -> InputSnapshot {
        let snapshot = InputSnapshot {
            pointer: self.pointer,
            pan: self.pan,
            rotation: self.rotation,
            zoom: self.zoom,
            primary_held: self.primary_held(),
        };

        self.pointer = Vec2::ZERO;
        self.pan = Vec2::ZERO;
        self.rotation = Vec2::ZERO;
        self.zoom = 0;

        snapshot
    }

    pub fn primary_held(&self) -> bool {
        self.primary_down || self.touch.is_some()
    }

    fn accumulate_drag(&mut self, delta: Vec2) {
        if self.primary_held() {
            self.pointer += delta;
        } else if self.middle_down {
            self.pan.x -= delta.x;
            self.pan.y += delta.y;
        } else if self.secondary_down {
            self.rotation += delta;
        }
    }

    fn apply_touch(&mut self, touch: &TouchEvent) {
        let pos = Vec2::new(touch.x, touch.y);
        match (touch.phase, self.touch) {
            (TouchPhase::Started, None) => self.touch = Some((touch.id, pos)),
            (TouchPhase::Moved, Some((id, last))) if id == touch.id => {
                self.pointer += pos - last;
                self.touch = Some((id, pos));
            }
            (TouchPhase::Ended, Some((id, _))) if id == touch.id => self.touch = None,
            // Additional fingers are ignored; one contact drives the orbit.
            _ => {}
        }
    }
}

impl InputSource for InputAccumulator {
    fn poll(&mut self) -> InputSnapshot {
        self.drain_and_reset()
    }
}

/// Sign of a wheel delta. Magnitude is discarded because scroll units differ
/// between devices.
fn wheel_step(dy: f32) -> i32 {
    if dy > 0.0 {
        1
    } else if dy < 0.0 {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, KeyState, Modifiers, MouseWheelDelta};

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMoved(PointerMoveEvent { x, y })
    }

    fn button(button: MouseButton, state: MouseButtonState, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button,
            state,
            pos: Some((x, y)),
            modifiers: Modifiers::default(),
        })
    }

    fn wheel(y: f32) -> InputEvent {
        InputEvent::MouseWheel {
            delta: MouseWheelDelta::Pixel { x: 0.0, y },
            modifiers: Modifiers::default(),
        }
    }

    fn drag(acc: &mut InputAccumulator, b: MouseButton, from: (f32, f32), to: (f32, f32)) {
        acc.handle(&button(b, MouseButtonState::Pressed, from.0, from.1));
        acc.handle(&moved(to.0, to.1));
    }

    #[test]
    fn primary_drag_accumulates_pointer_delta() {
        let mut acc = InputAccumulator::new();
        drag(&mut acc, MouseButton::Left, (10.0, 10.0), (15.0, 7.0));
        acc.handle(&moved(16.0, 9.0));

        let snap = acc.drain_and_reset();
        assert_eq!(snap.pointer, Vec2::new(6.0, -1.0));
        assert_eq!(snap.pan, Vec2::ZERO);
        assert!(snap.primary_held);
    }

    #[test]
    fn middle_drag_inverts_horizontal_pan_only() {
        let mut acc = InputAccumulator::new();
        drag(&mut acc, MouseButton::Middle, (0.0, 0.0), (4.0, 3.0));

        let snap = acc.drain_and_reset();
        assert_eq!(snap.pan, Vec2::new(-4.0, 3.0));
        assert_eq!(snap.pointer, Vec2::ZERO);
        assert!(!snap.primary_held);
    }

    #[test]
    fn secondary_drag_accumulates_rotation_without_inversion() {
        let mut acc = InputAccumulator::new();
        drag(&mut acc, MouseButton::Right, (0.0, 0.0), (-2.0, 5.0));

        let snap = acc.drain_and_reset();
        assert_eq!(snap.rotation, Vec2::new(-2.0, 5.0));
    }

    #[test]
    fn primary_drag_takes_priority_over_pan() {
        let mut acc = InputAccumulator::new();
        acc.handle(&button(MouseButton::Middle, MouseButtonState::Pressed, 0.0, 0.0));
        acc.handle(&button(MouseButton::Left, MouseButtonState::Pressed, 0.0, 0.0));
        acc.handle(&moved(3.0, 3.0));

        let snap = acc.drain_and_reset();
        assert_eq!(snap.pointer, Vec2::new(3.0, 3.0));
        assert_eq!(snap.pan, Vec2::ZERO);
    }

    #[test]
    fn press_before_any_move_does_not_invent_an_anchor() {
        let mut acc = InputAccumulator::new();
        acc.handle(&InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state: MouseButtonState::Pressed,
            pos: None,
            modifiers: Modifiers::default(),
        }));
        acc.handle(&moved(640.0, 360.0));
        acc.handle(&moved(641.0, 360.0));

        let snap = acc.drain_and_reset();
        assert_eq!(snap.pointer, Vec2::new(1.0, 0.0));
        assert!(snap.primary_held);
    }

    #[test]
    fn hover_without_buttons_accumulates_nothing() {
        let mut acc = InputAccumulator::new();
        acc.handle(&moved(0.0, 0.0));
        acc.handle(&moved(50.0, 50.0));
        assert!(acc.drain_and_reset().is_idle());
    }

    #[test]
    fn first_position_after_leave_yields_no_delta() {
        let mut acc = InputAccumulator::new();
        drag(&mut acc, MouseButton::Left, (0.0, 0.0), (1.0, 0.0));
        acc.handle(&InputEvent::PointerLeft);
        acc.handle(&moved(100.0, 100.0));

        assert_eq!(acc.drain_and_reset().pointer, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn second_drain_is_all_zero() {
        let mut acc = InputAccumulator::new();
        drag(&mut acc, MouseButton::Left, (0.0, 0.0), (8.0, 8.0));
        acc.handle(&wheel(1.0));

        let first = acc.drain_and_reset();
        assert!(!first.is_idle());

        let second = acc.drain_and_reset();
        assert!(second.is_idle());
        assert_eq!(second.pointer, Vec2::ZERO);
        assert_eq!(second.zoom, 0);
    }

    #[test]
    fn held_state_survives_drain() {
        let mut acc = InputAccumulator::new();
        acc.handle(&button(MouseButton::Left, MouseButtonState::Pressed, 0.0, 0.0));
        assert!(acc.drain_and_reset().primary_held);
        assert!(acc.drain_and_reset().primary_held);

        acc.handle(&button(MouseButton::Left, MouseButtonState::Released, 0.0, 0.0));
        assert!(!acc.drain_and_reset().primary_held);
    }

    #[test]
    fn wheel_accumulates_sign_only() {
        let mut acc = InputAccumulator::new();
        acc.handle(&wheel(5.3));
        assert_eq!(acc.drain_and_reset().zoom, 1);

        acc.handle(&wheel(0.2));
        assert_eq!(acc.drain_and_reset().zoom, 1);

        acc.handle(&wheel(-3.0));
        assert_eq!(acc.drain_and_reset().zoom, -1);

        acc.handle(&wheel(0.0));
        acc.handle(&wheel(f32::NAN));
        assert_eq!(acc.drain_and_reset().zoom, 0);
    }

    #[test]
    fn wheel_steps_sum_between_drains() {
        let mut acc = InputAccumulator::new();
        for dy in [120.0, 3.0, -1.0, 0.5] {
            acc.handle(&wheel(dy));
        }
        assert_eq!(acc.drain_and_reset().zoom, 2);
    }

    #[test]
    fn camera_owned_events_are_suppressed() {
        let mut acc = InputAccumulator::new();
        assert_eq!(acc.handle(&wheel(1.0)), Propagation::Suppress);
        assert_eq!(acc.handle(&InputEvent::ContextMenu), Propagation::Suppress);
        assert_eq!(
            acc.handle(&button(MouseButton::Right, MouseButtonState::Pressed, 0.0, 0.0)),
            Propagation::Suppress
        );
        assert_eq!(acc.handle(&moved(1.0, 1.0)), Propagation::Forward);
        assert_eq!(
            acc.handle(&InputEvent::Key {
                key: Key::R,
                state: KeyState::Pressed,
                modifiers: Modifiers::default(),
                repeat: false,
            }),
            Propagation::Forward
        );
    }

    #[test]
    fn focus_loss_releases_buttons() {
        let mut acc = InputAccumulator::new();
        acc.handle(&button(MouseButton::Left, MouseButtonState::Pressed, 0.0, 0.0));
        acc.handle(&InputEvent::Focused(false));
        acc.handle(&moved(5.0, 5.0));
        acc.handle(&moved(9.0, 9.0));

        let snap = acc.drain_and_reset();
        assert!(!snap.primary_held);
        assert_eq!(snap.pointer, Vec2::ZERO);
    }

    #[test]
    fn touch_drag_acts_as_primary() {
        let mut acc = InputAccumulator::new();
        let touch = |phase, x, y| InputEvent::Touch(TouchEvent { id: 7, phase, x, y });

        acc.handle(&touch(TouchPhase::Started, 0.0, 0.0));
        acc.handle(&touch(TouchPhase::Moved, 2.0, 3.0));
        // A second finger does not hijack the drag.
        acc.handle(&InputEvent::Touch(TouchEvent { id: 8, phase: TouchPhase::Moved, x: 90.0, y: 90.0 }));

        let snap = acc.drain_and_reset();
        assert_eq!(snap.pointer, Vec2::new(2.0, 3.0));
        assert!(snap.primary_held);

        acc.handle(&touch(TouchPhase::Ended, 2.0, 3.0));
        assert!(!acc.drain_and_reset().primary_held);
    }

    #[test]
    fn poll_drains() {
        let mut acc = InputAccumulator::new();
        acc.handle(&wheel(-2.0));
        let source: &mut dyn InputSource = &mut acc;
        assert_eq!(source.poll().zoom, -1);
        assert_eq!(source.poll().zoom, 0);
    }
}
