use thiserror::Error;

/// Failure to bring up the GPU for a window.
///
/// All variants are terminal for the session; there is no retry.
#[derive(Error, Debug)]
pub enum GpuError {
    #[error("window has zero size")]
    ZeroSize,

    #[error("failed to create surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible GPU adapter: {0}")]
    AdapterUnavailable(#[from] wgpu::RequestAdapterError),

    #[error("failed to create GPU device: {0}")]
    DeviceUnavailable(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}

impl GpuError {
    /// True for the adapter/device class reported to the host as `device_unavailable`.
    pub fn is_device_unavailable(&self) -> bool {
        matches!(self, GpuError::AdapterUnavailable(_) | GpuError::DeviceUnavailable(_))
    }
}

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}
