//! Caller-defined uniform blocks.
//!
//! A `ParameterBuffer` holds shader-specific constants that are independent of
//! the frame and camera uniforms. It is spliced into a pipeline's bind group at
//! binding 2 or later.

mod buffer;
mod error;

pub use buffer::{ParameterBuffer, FIRST_PARAMETER_BINDING};
pub use error::ParameterError;
