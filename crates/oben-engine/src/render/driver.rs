use std::time::Instant;

use crate::camera::{ArcballCamera, CameraConfig};
use crate::input::InputSource;
use crate::time::{FrameClock, FrameTime};

use super::error::RenderError;
use super::uniforms::{CameraUniforms, FrameUniforms};

/// Lifecycle of a renderer.
///
/// `Uninitialized -> DeviceReady -> PipelinesRegistered -> Running`. Re-registering
/// pipelines is allowed from `PipelinesRegistered` and `Running`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RendererPhase {
    Uninitialized,
    DeviceReady,
    PipelinesRegistered,
    Running,
}

/// Everything the GPU side needs to draw one frame.
#[derive(Debug)]
pub struct PreparedFrame<'a, P> {
    pub index: usize,
    pub pipeline: &'a P,
    pub time: FrameTime,
    pub frame: FrameUniforms,
    pub camera: CameraUniforms,
}

/// GPU-free half of the render loop.
///
/// Owns the phase, the camera, the clock and the registered pipelines. `P` is the
/// pipeline payload: compiled wgpu pipelines in [`Renderer`](super::Renderer), plain
/// markers in tests.
#[derive(Debug)]
pub struct FrameDriver<P> {
    phase: RendererPhase,
    camera: ArcballCamera,
    clock: FrameClock,
    pipelines: Vec<P>,
    active: usize,
}

impl<P> FrameDriver<P> {
    pub fn new(camera: CameraConfig) -> Self {
        Self {
            phase: RendererPhase::Uninitialized,
            camera: ArcballCamera::new(camera),
            clock: FrameClock::new(),
            pipelines: Vec::new(),
            active: 0,
        }
    }

    pub fn phase(&self) -> RendererPhase {
        self.phase
    }

    pub fn camera(&self) -> &ArcballCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut ArcballCamera {
        &mut self.camera
    }

    pub fn pipeline_count(&self) -> usize {
        self.pipelines.len()
    }

    /// Index of the active pipeline. Meaningless until pipelines are registered.
    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_pipeline(&self) -> Option<&P> {
        self.pipelines.get(self.active)
    }

    pub fn pipeline(&self, index: usize) -> Option<&P> {
        self.pipelines.get(index)
    }

    pub fn pipeline_mut(&mut self, index: usize) -> Option<&mut P> {
        self.pipelines.get_mut(index)
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    pub fn device_ready(&mut self) -> Result<(), RenderError> {
        self.expect_phase("attach a device", &[RendererPhase::Uninitialized])?;
        self.phase = RendererPhase::DeviceReady;
        Ok(())
    }

    /// Replaces the pipeline set. The first pipeline becomes active.
    ///
    /// A running driver stays running; the camera is reset as on a switch.
    pub fn register(&mut self, pipelines: Vec<P>) -> Result<(), RenderError> {
        self.expect_phase(
            "register pipelines",
            &[
                RendererPhase::DeviceReady,
                RendererPhase::PipelinesRegistered,
                RendererPhase::Running,
            ],
        )?;
        if pipelines.is_empty() {
            return Err(RenderError::NoPipelines);
        }

        self.pipelines = pipelines;
        self.active = 0;
        self.camera.reset();
        if self.phase != RendererPhase::Running {
            self.phase = RendererPhase::PipelinesRegistered;
        }
        Ok(())
    }

    /// Enters the running phase and captures the clock origin.
    pub fn start(&mut self) -> Result<(), RenderError> {
        self.start_at(Instant::now())
    }

    pub fn start_at(&mut self, now: Instant) -> Result<(), RenderError> {
        self.expect_phase("start", &[RendererPhase::PipelinesRegistered])?;
        self.clock = FrameClock::starting_at(now);
        self.phase = RendererPhase::Running;
        Ok(())
    }

    /// Makes `index` the active pipeline and resets the camera.
    ///
    /// Switching to the already-active index still resets the camera. On error
    /// nothing changes.
    pub fn switch(&mut self, index: usize) -> Result<(), RenderError> {
        self.expect_phase(
            "switch pipelines",
            &[RendererPhase::PipelinesRegistered, RendererPhase::Running],
        )?;
        let count = self.pipelines.len();
        if index >= count {
            return Err(RenderError::PipelineIndex { index, count });
        }

        log::info!("switching to pipeline {index}");
        self.active = index;
        self.camera.reset();
        Ok(())
    }

    // ── per frame ─────────────────────────────────────────────────────────

    /// Runs the CPU half of a frame: tick the clock, drain input into the camera and
    /// build the uniform blocks for the active pipeline.
    ///
    /// Returns `None` outside [`RendererPhase::Running`]; input is left untouched then.
    pub fn prepare<I>(
        &mut self,
        input: &mut I,
        now: Instant,
        viewport: (u32, u32),
    ) -> Option<PreparedFrame<'_, P>>
    where
        I: InputSource + ?Sized,
    {
        if self.phase != RendererPhase::Running {
            return None;
        }
        let pipeline = self.pipelines.get(self.active)?;

        let time = self.clock.tick_at(now);
        let snapshot = input.poll();
        self.camera.integrate(&snapshot);

        Some(PreparedFrame {
            index: self.active,
            pipeline,
            time,
            frame: FrameUniforms::new(&time, viewport),
            camera: CameraUniforms::from_camera(&self.camera),
        })
    }

    fn expect_phase(
        &self,
        operation: &'static str,
        allowed: &[RendererPhase],
    ) -> Result<(), RenderError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(RenderError::InvalidPhase {
                operation,
                phase: self.phase,
            })
        }
    }
}
