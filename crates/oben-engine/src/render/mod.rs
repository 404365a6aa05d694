//! Fullscreen shader rendering.
//!
//! Every registered pipeline draws the same fullscreen quad with its own
//! fragment shader. Bindings in group 0:
//! - 0: [`FrameUniforms`] (time, viewport)
//! - 1: [`CameraUniforms`] (ray origin, pan, axis rotation)
//! - 2+: optional [`ParameterBuffer`](crate::params::ParameterBuffer)
//!
//! [`FrameDriver`] holds the GPU-free part of the loop (phase, camera, active
//! pipeline, uniform values); [`Renderer`] wraps it with wgpu resources.

mod driver;
mod error;
mod pipeline;
mod renderer;
mod target;
mod uniforms;

pub use driver::{FrameDriver, PreparedFrame, RendererPhase};
pub use error::RenderError;
pub use pipeline::{CompiledPipeline, PipelineDescriptor, CAMERA_BINDING, FRAME_BINDING};
pub use renderer::{Renderer, RendererConfig};
pub use target::RenderTarget;
pub use uniforms::{CameraUniforms, FrameUniforms};
