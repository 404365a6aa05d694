use std::fmt;

use crate::geometry::Vertex;
use crate::params::ParameterBuffer;

use super::error::RenderError;

pub const FRAME_BINDING: u32 = 0;
pub const CAMERA_BINDING: u32 = 1;

/// A fragment shader plus its optional parameter block.
///
/// The vertex stage is shared; `fragment_source` must be WGSL with exactly one
/// `@fragment` entry point.
pub struct PipelineDescriptor {
    pub label: String,
    pub fragment_source: String,
    pub parameters: Option<ParameterBuffer>,
}

impl PipelineDescriptor {
    pub fn new(label: impl Into<String>, fragment_source: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            fragment_source: fragment_source.into(),
            parameters: None,
        }
    }

    pub fn with_parameters(mut self, parameters: ParameterBuffer) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

impl fmt::Debug for PipelineDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineDescriptor")
            .field("label", &self.label)
            .field("fragment_source_len", &self.fragment_source.len())
            .field("parameters", &self.parameters)
            .finish()
    }
}

/// Resources every pipeline binds to.
pub(super) struct SharedBindings<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    pub vertex_shader: &'a wgpu::ShaderModule,
    pub frame_ubo: &'a wgpu::Buffer,
    pub camera_ubo: &'a wgpu::Buffer,
}

/// A pipeline ready to draw: render pipeline, its bind group and the parameter
/// block the bind group references.
pub struct CompiledPipeline {
    label: String,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    parameters: Option<ParameterBuffer>,
}

impl CompiledPipeline {
    pub(super) fn compile(
        shared: &SharedBindings<'_>,
        desc: PipelineDescriptor,
    ) -> Result<Self, RenderError> {
        let PipelineDescriptor {
            label,
            fragment_source,
            mut parameters,
        } = desc;

        if let Some(params) = parameters.as_mut() {
            params.ensure_gpu(shared.device)?;
            params.upload(shared.queue);
        }

        // Shader and layout errors surface here instead of the uncaptured handler.
        let scope = shared.device.push_error_scope(wgpu::ErrorFilter::Validation);

        let mut layout_entries = vec![
            uniform_layout_entry(FRAME_BINDING, std::mem::size_of::<super::FrameUniforms>()),
            uniform_layout_entry(CAMERA_BINDING, std::mem::size_of::<super::CameraUniforms>()),
        ];
        layout_entries.extend(parameters.as_ref().and_then(ParameterBuffer::layout_entry));

        let bind_group_layout =
            shared
                .device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some(label.as_str()),
                    entries: &layout_entries,
                });

        let mut bind_entries = vec![
            wgpu::BindGroupEntry {
                binding: FRAME_BINDING,
                resource: shared.frame_ubo.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: CAMERA_BINDING,
                resource: shared.camera_ubo.as_entire_binding(),
            },
        ];
        bind_entries.extend(parameters.as_ref().and_then(ParameterBuffer::bind_group_entry));

        let bind_group = shared.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label.as_str()),
            layout: &bind_group_layout,
            entries: &bind_entries,
        });

        let fragment_shader = shared
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(label.as_str()),
                source: wgpu::ShaderSource::Wgsl(fragment_source.into()),
            });

        let pipeline_layout = shared
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some(label.as_str()),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = shared
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label.as_str()),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: shared.vertex_shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[Vertex::layout()],
                },
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    ..Default::default()
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                fragment: Some(wgpu::FragmentState {
                    module: &fragment_shader,
                    entry_point: None,
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: shared.surface_format,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                multiview_mask: None,
                cache: None,
            });

        check_compilation(&label, pollster::block_on(scope.pop()))?;

        log::debug!(
            "compiled pipeline {label:?} (parameters: {})",
            parameters.as_ref().map_or(0, ParameterBuffer::len)
        );

        Ok(Self {
            label,
            pipeline,
            bind_group,
            parameters,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn parameters(&self) -> Option<&ParameterBuffer> {
        self.parameters.as_ref()
    }

    pub(super) fn parameters_mut(&mut self) -> Option<&mut ParameterBuffer> {
        self.parameters.as_mut()
    }

    pub(super) fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    pub(super) fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

impl fmt::Debug for CompiledPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledPipeline")
            .field("label", &self.label)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// Maps an error captured while building a pipeline to [`RenderError::Compilation`].
fn check_compilation(label: &str, captured: Option<wgpu::Error>) -> Result<(), RenderError> {
    match captured {
        None => Ok(()),
        Some(err) => {
            log::error!("pipeline {label:?} rejected by the device: {err}");
            Err(RenderError::Compilation {
                label: label.to_owned(),
                message: err.to_string(),
            })
        }
    }
}

fn uniform_layout_entry(binding: u32, size: usize) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: wgpu::BufferSize::new(size as u64),
        },
        count: None,
    }
}
