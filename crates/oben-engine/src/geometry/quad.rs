use super::vertex::Vertex;

pub const QUAD_VERTEX_COUNT: u32 = 6;

/// Two triangles covering clip space. UV (0, 0) is bottom-left, (1, 1) top-right.
pub const FULLSCREEN_QUAD: [Vertex; QUAD_VERTEX_COUNT as usize] = [
    Vertex::new(-1.0, -1.0, 0.0, 0.0, 0.0),
    Vertex::new(1.0, -1.0, 0.0, 1.0, 0.0),
    Vertex::new(1.0, 1.0, 0.0, 1.0, 1.0),
    Vertex::new(-1.0, -1.0, 0.0, 0.0, 0.0),
    Vertex::new(1.0, 1.0, 0.0, 1.0, 1.0),
    Vertex::new(-1.0, 1.0, 0.0, 0.0, 1.0),
];
