use wgpu::util::DeviceExt;

use crate::camera::{ArcballCamera, CameraConfig};
use crate::core::{AppControl, FrameCtx};
use crate::device::Gpu;
use crate::geometry::{FULLSCREEN_QUAD, QUAD_VERTEX_COUNT};
use crate::params::ParameterBuffer;

use super::driver::{FrameDriver, RendererPhase};
use super::error::RenderError;
use super::pipeline::{CompiledPipeline, PipelineDescriptor, SharedBindings};
use super::uniforms::{CameraUniforms, FrameUniforms};

const VERTEX_SHADER: &str = include_str!("shaders/fullscreen.wgsl");

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RendererConfig {
    pub clear_color: wgpu::Color,
    pub camera: CameraConfig,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            clear_color: wgpu::Color {
                r: 0.1,
                g: 0.1,
                b: 0.1,
                a: 1.0,
            },
            camera: CameraConfig::default(),
        }
    }
}

/// GPU objects shared by every pipeline.
struct SharedResources {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_format: wgpu::TextureFormat,
    vertex_shader: wgpu::ShaderModule,
    frame_ubo: wgpu::Buffer,
    camera_ubo: wgpu::Buffer,
    quad_vbo: wgpu::Buffer,
}

impl SharedResources {
    fn new(gpu: &Gpu<'_>) -> Self {
        let device = gpu.device().clone();
        let queue = gpu.queue().clone();

        let vertex_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("oben fullscreen vs"),
            source: wgpu::ShaderSource::Wgsl(VERTEX_SHADER.into()),
        });

        let frame_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("oben frame ubo"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let camera_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("oben camera ubo"),
            size: std::mem::size_of::<CameraUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let quad_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("oben quad vbo"),
            contents: bytemuck::cast_slice(&FULLSCREEN_QUAD),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            device,
            queue,
            surface_format: gpu.surface_format(),
            vertex_shader,
            frame_ubo,
            camera_ubo,
            quad_vbo,
        }
    }

    fn bindings(&self) -> SharedBindings<'_> {
        SharedBindings {
            device: &self.device,
            queue: &self.queue,
            surface_format: self.surface_format,
            vertex_shader: &self.vertex_shader,
            frame_ubo: &self.frame_ubo,
            camera_ubo: &self.camera_ubo,
        }
    }
}

/// Multi-pipeline fullscreen renderer.
///
/// Lifecycle: [`attach_device`](Self::attach_device), then
/// [`setup_pipelines`](Self::setup_pipelines), then [`start`](Self::start). Call
/// [`render_frame`](Self::render_frame) from `App::on_frame`; it does nothing until
/// the renderer is running.
pub struct Renderer {
    config: RendererConfig,
    driver: FrameDriver<CompiledPipeline>,
    shared: Option<SharedResources>,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        Self {
            driver: FrameDriver::new(config.camera),
            config,
            shared: None,
        }
    }

    pub fn phase(&self) -> RendererPhase {
        self.driver.phase()
    }

    pub fn pipeline_count(&self) -> usize {
        self.driver.pipeline_count()
    }

    /// Index of the pipeline drawn each frame.
    pub fn active_pipeline(&self) -> usize {
        self.driver.active_index()
    }

    pub fn pipeline(&self, index: usize) -> Option<&CompiledPipeline> {
        self.driver.pipeline(index)
    }

    pub fn camera(&self) -> &ArcballCamera {
        self.driver.camera()
    }

    pub fn clear_color(&self) -> wgpu::Color {
        self.config.clear_color
    }

    pub fn set_clear_color(&mut self, color: wgpu::Color) {
        self.config.clear_color = color;
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    /// Creates the shared uniform buffers, quad and vertex shader on `gpu`.
    pub fn attach_device(&mut self, gpu: &Gpu<'_>) -> Result<(), RenderError> {
        self.driver.device_ready()?;
        self.shared = Some(SharedResources::new(gpu));
        log::info!("renderer attached ({:?})", gpu.surface_format());
        Ok(())
    }

    /// Compiles `descriptors` and replaces the registered pipeline set.
    ///
    /// Index `i` of `descriptors` becomes pipeline `i`; pipeline 0 is active.
    pub fn setup_pipelines(
        &mut self,
        descriptors: Vec<PipelineDescriptor>,
    ) -> Result<(), RenderError> {
        let Some(shared) = self.shared.as_ref() else {
            return Err(RenderError::InvalidPhase {
                operation: "register pipelines",
                phase: self.driver.phase(),
            });
        };
        if descriptors.is_empty() {
            return Err(RenderError::NoPipelines);
        }

        let bindings = shared.bindings();
        let compiled = descriptors
            .into_iter()
            .map(|desc| CompiledPipeline::compile(&bindings, desc))
            .collect::<Result<Vec<_>, _>>()?;

        log::info!("registered {} pipeline(s)", compiled.len());
        self.driver.register(compiled)
    }

    pub fn start(&mut self) -> Result<(), RenderError> {
        self.driver.start()?;
        log::info!("renderer running");
        Ok(())
    }

    // ── control ───────────────────────────────────────────────────────────

    /// Activates pipeline `index` and resets the camera.
    pub fn switch_pipeline(&mut self, index: usize) -> Result<(), RenderError> {
        self.driver.switch(index)
    }

    pub fn set_camera_sensitivity(&mut self, sensitivity: f32) {
        self.driver.camera_mut().set_sensitivity(sensitivity);
    }

    /// Radius change per wheel step.
    pub fn set_camera_zoom_amount(&mut self, zoom_amount: f32) {
        self.driver.camera_mut().set_zoom_speed(zoom_amount);
    }

    pub fn reset_camera(&mut self) {
        self.driver.camera_mut().reset();
    }

    // ── parameters ────────────────────────────────────────────────────────

    pub fn parameters(&self, pipeline: usize) -> Option<&ParameterBuffer> {
        self.driver.pipeline(pipeline)?.parameters()
    }

    /// Writes one scalar into a pipeline's parameter block and uploads the block.
    pub fn write_parameter(
        &mut self,
        pipeline: usize,
        value: f32,
        offset: usize,
    ) -> Result<(), RenderError> {
        self.write_parameter_range(pipeline, &[value], offset)
    }

    /// Writes `values` starting at `offset` and uploads the block.
    pub fn write_parameter_range(
        &mut self,
        pipeline: usize,
        values: &[f32],
        offset: usize,
    ) -> Result<(), RenderError> {
        let count = self.driver.pipeline_count();
        let compiled = self
            .driver
            .pipeline_mut(pipeline)
            .ok_or(RenderError::PipelineIndex {
                index: pipeline,
                count,
            })?;
        let params = compiled
            .parameters_mut()
            .ok_or(RenderError::NoParameters { index: pipeline })?;

        params.write_range(values, offset)?;
        if let Some(shared) = self.shared.as_ref() {
            params.upload(&shared.queue);
        }
        Ok(())
    }

    // ── frame ─────────────────────────────────────────────────────────────

    /// Draws the active pipeline into the window surface.
    ///
    /// Outside the running phase this returns immediately without touching input.
    pub fn render_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(shared) = self.shared.as_ref() else {
            return AppControl::Continue;
        };

        let size = ctx.gpu.size();
        let Some(prepared) =
            self.driver
                .prepare(&mut *ctx.input, ctx.time.now, (size.width, size.height))
        else {
            return AppControl::Continue;
        };

        shared
            .queue
            .write_buffer(&shared.frame_ubo, 0, bytemuck::bytes_of(&prepared.frame));
        shared
            .queue
            .write_buffer(&shared.camera_ubo, 0, bytemuck::bytes_of(&prepared.camera));

        let clear = self.config.clear_color;
        let pipeline = prepared.pipeline;

        ctx.render(|target| {
            let mut rpass = target.begin_clear_pass("oben fullscreen pass", clear);

            rpass.set_pipeline(pipeline.pipeline());
            rpass.set_bind_group(0, pipeline.bind_group(), &[]);
            rpass.set_vertex_buffer(0, shared.quad_vbo.slice(..));
            rpass.draw(0..QUAD_VERTEX_COUNT, 0..1);
        })
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RendererConfig::default())
    }
}
