//! Static geometry shared by every pipeline.

mod quad;
mod vertex;

pub use quad::{FULLSCREEN_QUAD, QUAD_VERTEX_COUNT};
pub use vertex::Vertex;
