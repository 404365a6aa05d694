use bytemuck::{Pod, Zeroable};

use crate::camera::ArcballCamera;
use crate::time::FrameTime;

/// Binding 0: `[delta_ms, total_ms, width, height]`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub delta_time_ms: f32,
    pub total_time_ms: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl FrameUniforms {
    pub fn new(time: &FrameTime, viewport: (u32, u32)) -> Self {
        Self {
            delta_time_ms: time.delta_ms,
            total_time_ms: time.total_ms,
            viewport_width: viewport.0 as f32,
            viewport_height: viewport.1 as f32,
        }
    }
}

/// Binding 1: three vec3s, each padded to four scalars.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct CameraUniforms {
    pub ray_origin: [f32; 4],
    pub pan_offset: [f32; 4],
    /// Radians.
    pub rotation_offset: [f32; 4],
}

impl CameraUniforms {
    pub fn from_camera(camera: &ArcballCamera) -> Self {
        Self {
            ray_origin: camera.ray_origin().extend(0.0).to_array(),
            pan_offset: camera.pan_offset().extend(0.0).to_array(),
            rotation_offset: camera.rotation_offset().extend(0.0).to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use glam::Vec2;

    use super::*;
    use crate::camera::{CameraConfig, CameraState};

    #[test]
    fn sizes_match_shader_layout() {
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 16);
        assert_eq!(std::mem::size_of::<CameraUniforms>(), 48);
    }

    #[test]
    fn frame_uniforms_are_ordered() {
        let time = FrameTime {
            delta_ms: 16.5,
            total_ms: 1000.0,
            now: Instant::now(),
            frame_index: 60,
        };
        let u = FrameUniforms::new(&time, (1920, 1080));
        let raw: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&u));
        assert_eq!(raw, &[16.5, 1000.0, 1920.0, 1080.0]);
    }

    #[test]
    fn camera_uniforms_pad_each_vector() {
        let mut cam = ArcballCamera::new(CameraConfig::default());
        cam.set_state(CameraState {
            pan: Vec2::new(1.0, 2.0),
            axis_rotation_deg: Vec2::new(180.0, 90.0),
            ..CameraState::default()
        });

        let u = CameraUniforms::from_camera(&cam);
        let raw: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&u));
        assert_eq!(raw.len(), 12);

        assert_eq!(&raw[0..2], &[0.0, 0.0]);
        assert!((raw[2] - 20.0).abs() < 1e-5);
        assert_eq!(raw[3], 0.0);

        assert_eq!(&raw[4..8], &[1.0, 2.0, 0.0, 0.0]);

        assert!((raw[8] - std::f32::consts::PI).abs() < 1e-6);
        assert!((raw[9] - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(&raw[10..12], &[0.0, 0.0]);
    }
}
