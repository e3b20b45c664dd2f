use prism_engine::Vertex;

/// Two triangles covering all of NDC: red, green and blue corners at half alpha.
pub const CANVAS: [Vertex; 6] = [
    // First triangle
    Vertex::new([-1.0, -1.0, 0.0], [1.0, 0.0, 0.0, 0.5]),
    Vertex::new([1.0, -1.0, 0.0], [0.0, 1.0, 0.0, 0.5]),
    Vertex::new([-1.0, 1.0, 0.0], [0.0, 0.0, 1.0, 0.5]),
    // Second triangle
    Vertex::new([-1.0, 1.0, 0.0], [1.0, 0.0, 0.0, 0.5]),
    Vertex::new([1.0, -1.0, 0.0], [0.0, 1.0, 0.0, 0.5]),
    Vertex::new([1.0, 1.0, 0.0], [0.0, 0.0, 1.0, 0.5]),
];
