use std::f32::consts::FRAC_PI_2;

use glam::{Vec2, Vec3};

use crate::input::InputSnapshot;

pub const MIN_RADIUS: f32 = 1.0;
pub const MAX_RADIUS: f32 = 100.0;
pub const DEFAULT_RADIUS: f32 = 20.0;

/// Largest absolute pitch, just inside the poles so the spherical conversion
/// never degenerates.
pub const PITCH_LIMIT: f32 = FRAC_PI_2 / 1.02;

const ORBIT_SCALE: f32 = 2.0;
const PAN_SCALE: f32 = 7.0;
const AXIS_ROTATION_SCALE: f32 = 30.0;

/// User preferences for camera response.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraConfig {
    /// Scales every drag delta.
    pub sensitivity: f32,
    /// Radius change per wheel step.
    pub zoom_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.0001,
            zoom_speed: 1.0,
        }
    }
}

/// Camera pose.
///
/// Invariants after every [`ArcballCamera::integrate`]:
/// - `pitch` in `[-PITCH_LIMIT, PITCH_LIMIT]`
/// - `radius` in `[MIN_RADIUS, MAX_RADIUS]`
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraState {
    /// Radians.
    pub pitch: f32,
    /// Radians.
    pub yaw: f32,
    pub radius: f32,
    pub pan: Vec2,
    /// Accumulated in degrees.
    pub axis_rotation_deg: Vec2,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            pitch: 0.0,
            yaw: 0.0,
            radius: DEFAULT_RADIUS,
            pan: Vec2::ZERO,
            axis_rotation_deg: Vec2::ZERO,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ArcballCamera {
    state: CameraState,
    config: CameraConfig,
}

impl ArcballCamera {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            state: CameraState::default(),
            config,
        }
    }

    /// Applies one frame of input to the pose.
    ///
    /// Drag responses scale with the radius so that apparent motion stays
    /// proportionate at every zoom level.
    pub fn integrate(&mut self, input: &InputSnapshot) {
        let CameraConfig { sensitivity, zoom_speed } = self.config;
        let s = &mut self.state;

        let orbit = input.pointer * sensitivity * s.radius * ORBIT_SCALE;
        s.yaw += orbit.x;
        s.pitch = (s.pitch + orbit.y).clamp(-PITCH_LIMIT, PITCH_LIMIT);

        s.radius = (s.radius + input.zoom as f32 * zoom_speed).clamp(MIN_RADIUS, MAX_RADIUS);

        s.pan += input.pan * sensitivity * s.radius * PAN_SCALE;

        // Vertical drag turns about the x axis, horizontal drag about y.
        let turn = input.rotation * sensitivity * s.radius * AXIS_ROTATION_SCALE;
        s.axis_rotation_deg.x += turn.y;
        s.axis_rotation_deg.y -= turn.x;
    }

    /// Restores the default pose. Sensitivity and zoom speed are kept.
    pub fn reset(&mut self) {
        self.state = CameraState::default();
    }

    /// Eye position from the spherical pose.
    pub fn ray_origin(&self) -> Vec3 {
        let CameraState { pitch, yaw, radius, .. } = self.state;
        Vec3::new(
            radius * yaw.sin() * pitch.cos(),
            radius * pitch.sin(),
            radius * yaw.cos() * pitch.cos(),
        )
    }

    /// Pan offset; `z` is always zero.
    pub fn pan_offset(&self) -> Vec3 {
        self.state.pan.extend(0.0)
    }

    /// Axis-rotation offset in radians; `z` is always zero.
    pub fn rotation_offset(&self) -> Vec3 {
        let r = self.state.axis_rotation_deg;
        Vec3::new(r.x.to_radians(), r.y.to_radians(), 0.0)
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    /// Replaces the pose. Pitch and radius are clamped into range.
    pub fn set_state(&mut self, state: CameraState) {
        self.state = CameraState {
            pitch: state.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            radius: state.radius.clamp(MIN_RADIUS, MAX_RADIUS),
            ..state
        };
    }

    pub fn config(&self) -> CameraConfig {
        self.config
    }

    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.config.sensitivity = sensitivity;
    }

    pub fn set_zoom_speed(&mut self, zoom_speed: f32) {
        self.config.zoom_speed = zoom_speed;
    }
}
