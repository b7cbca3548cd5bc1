use std::fmt;

/// Size of one `vec3<f32>` vertex attribute in bytes.
pub const VEC3_STRIDE: u64 = 3 * std::mem::size_of::<f32>() as u64;

/// Size of one `u32` index in bytes.
pub const INDEX_SIZE: u64 = std::mem::size_of::<u32>() as u64;

/// Geometry contract violations caught at construction time.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MeshError {
    /// An attribute array length is not a multiple of 3 floats.
    PartialVertex { stream: &'static str, len: usize },
    /// Position and color streams describe different vertex counts.
    VertexCountMismatch { positions: usize, colors: usize },
    /// No vertices or no indices.
    Empty,
    /// Index count is not a whole number of triangles.
    PartialTriangle { len: usize },
    /// An index points past the last vertex.
    IndexOutOfBounds { index: u32, vertex_count: usize },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::PartialVertex { stream, len } => {
                write!(f, "{stream} stream has {len} floats, not a multiple of 3")
            }
            MeshError::VertexCountMismatch { positions, colors } => write!(
                f,
                "{positions} positions but {colors} colors; every vertex needs both"
            ),
            MeshError::Empty => f.write_str("mesh has no vertices or no indices"),
            MeshError::PartialTriangle { len } => {
                write!(f, "{len} indices do not form whole triangles")
            }
            MeshError::IndexOutOfBounds {
                index,
                vertex_count,
            } => write!(f, "index {index} out of bounds for {vertex_count} vertices"),
        }
    }
}

impl std::error::Error for MeshError {}

/// Validated vertex and index data for a triangle-list mesh.
///
/// Positions and colors are separate streams of tightly packed `vec3<f32>`.
/// Indices are `u32`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mesh<'a> {
    positions: &'a [f32],
    colors: &'a [f32],
    indices: &'a [u32],
}

/// Triangle in normalized device coordinates.
const TRIANGLE_POSITIONS: [f32; 9] = [
    1.0, -1.0, 0.0, //
    -1.0, -1.0, 0.0, //
    0.0, 1.0, 0.0,
];

/// Pure red, green, blue; one per vertex.
const TRIANGLE_COLORS: [f32; 9] = [
    1.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, //
    0.0, 0.0, 1.0,
];

const TRIANGLE_INDICES: [u32; 3] = [0, 1, 2];

impl Mesh<'static> {
    /// The canonical red/green/blue triangle covering the lower half and the
    /// top-center of the screen.
    pub const TRIANGLE: Mesh<'static> = Mesh {
        positions: &TRIANGLE_POSITIONS,
        colors: &TRIANGLE_COLORS,
        indices: &TRIANGLE_INDICES,
    };
}

impl<'a> Mesh<'a> {
    pub fn new(
        positions: &'a [f32],
        colors: &'a [f32],
        indices: &'a [u32],
    ) -> Result<Self, MeshError> {
        if positions.len() % 3 != 0 {
            return Err(MeshError::PartialVertex {
                stream: "position",
                len: positions.len(),
            });
        }
        if colors.len() % 3 != 0 {
            return Err(MeshError::PartialVertex {
                stream: "color",
                len: colors.len(),
            });
        }
        if positions.len() != colors.len() {
            return Err(MeshError::VertexCountMismatch {
                positions: positions.len() / 3,
                colors: colors.len() / 3,
            });
        }
        if positions.is_empty() || indices.is_empty() {
            return Err(MeshError::Empty);
        }
        if indices.len() % 3 != 0 {
            return Err(MeshError::PartialTriangle { len: indices.len() });
        }

        let vertex_count = positions.len() / 3;
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(MeshError::IndexOutOfBounds {
                index,
                vertex_count,
            });
        }

        Ok(Self {
            positions,
            colors,
            indices,
        })
    }

    pub fn positions(&self) -> &'a [f32] {
        self.positions
    }

    pub fn colors(&self) -> &'a [f32] {
        self.colors
    }

    pub fn indices(&self) -> &'a [u32] {
        self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Byte size of the position stream (`stride * vertex_count`).
    pub fn position_bytes(&self) -> u64 {
        VEC3_STRIDE * self.vertex_count() as u64
    }

    /// Byte size of the color stream (`stride * vertex_count`).
    pub fn color_bytes(&self) -> u64 {
        VEC3_STRIDE * self.vertex_count() as u64
    }

    /// Byte size of the index list (`4 * index_count`).
    pub fn index_bytes(&self) -> u64 {
        INDEX_SIZE * self.indices.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_triangle_is_valid() {
        let mesh = Mesh::TRIANGLE;
        assert_eq!(
            Mesh::new(mesh.positions(), mesh.colors(), mesh.indices()),
            Ok(mesh)
        );
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.index_count(), 3);
    }

    #[test]
    fn canonical_triangle_byte_sizes() {
        let mesh = Mesh::TRIANGLE;
        assert_eq!(mesh.position_bytes(), 36);
        assert_eq!(mesh.color_bytes(), 36);
        assert_eq!(mesh.index_bytes(), 12);

        // Same as the raw array byte lengths.
        assert_eq!(mesh.position_bytes() as usize, mesh.positions().len() * 4);
        assert_eq!(mesh.color_bytes() as usize, mesh.colors().len() * 4);
        assert_eq!(mesh.index_bytes() as usize, mesh.indices().len() * 4);
    }

    #[test]
    fn canonical_indices_are_in_bounds() {
        let mesh = Mesh::TRIANGLE;
        assert_eq!(mesh.indices(), &[0, 1, 2]);
        assert!(mesh.indices().iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn canonical_colors_are_pure_primaries() {
        assert_eq!(
            Mesh::TRIANGLE.colors(),
            &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]
        );
    }

    #[test]
    fn rejects_partial_vertex() {
        let err = Mesh::new(&[0.0; 8], &[0.0; 9], &[0, 1, 2]).unwrap_err();
        assert_eq!(
            err,
            MeshError::PartialVertex {
                stream: "position",
                len: 8
            }
        );
    }

    #[test]
    fn rejects_mismatched_streams() {
        let err = Mesh::new(&[0.0; 9], &[0.0; 6], &[0, 1, 2]).unwrap_err();
        assert_eq!(
            err,
            MeshError::VertexCountMismatch {
                positions: 3,
                colors: 2
            }
        );
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(Mesh::new(&[], &[], &[]).unwrap_err(), MeshError::Empty);
        assert_eq!(
            Mesh::new(&[0.0; 9], &[0.0; 9], &[]).unwrap_err(),
            MeshError::Empty
        );
    }

    #[test]
    fn rejects_partial_triangle() {
        let err = Mesh::new(&[0.0; 9], &[0.0; 9], &[0, 1]).unwrap_err();
        assert_eq!(err, MeshError::PartialTriangle { len: 2 });
    }

    #[test]
    fn rejects_out_of_bounds_index() {
        let err = Mesh::new(&[0.0; 9], &[0.0; 9], &[0, 1, 3]).unwrap_err();
        assert_eq!(
            err,
            MeshError::IndexOutOfBounds {
                index: 3,
                vertex_count: 3
            }
        );
    }
}
