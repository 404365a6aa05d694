use thiserror::Error;

/// Misuse of a [`ParameterBuffer`](super::ParameterBuffer).
///
/// These are programming errors on the caller side; nothing here is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParameterError {
    #[error("parameter buffer '{0}' used before initialization")]
    NotInitialized(String),

    #[error("parameter buffer '{0}' is already initialized")]
    AlreadyInitialized(String),

    #[error("write of {len} scalar(s) at offset {offset} exceeds capacity {capacity}")]
    OutOfBounds {
        offset: usize,
        len: usize,
        capacity: usize,
    },

    #[error("binding {0} is reserved for frame/camera uniforms")]
    ReservedBinding(u32),
}
