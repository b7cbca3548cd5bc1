use crate::geometry::VEC3_STRIDE;

/// Vertex buffer slot the position stream is bound to.
pub const POSITION_SLOT: u32 = 0;

/// Vertex buffer slot the color stream is bound to.
pub const COLOR_SLOT: u32 = 1;

/// Two independent vertex streams: position at slot/location 0, color at 1.
///
/// Each stream carries one `Float32x3` attribute with a 12 byte stride.
pub struct VertexStreams;

impl VertexStreams {
    const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
    const COLOR_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];

    pub fn layouts() -> [wgpu::VertexBufferLayout<'static>; 2] {
        [
            wgpu::VertexBufferLayout {
                array_stride: VEC3_STRIDE,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &Self::POSITION_ATTRS,
            },
            wgpu::VertexBufferLayout {
                array_stride: VEC3_STRIDE,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &Self::COLOR_ATTRS,
            },
        ]
    }
}

/// Fixed-function primitive assembly and rasterization settings.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PrimitiveConfig {
    pub topology: wgpu::PrimitiveTopology,
    pub front_face: wgpu::FrontFace,
    pub cull_mode: Option<wgpu::Face>,
}

impl Default for PrimitiveConfig {
    /// Independent triangles, clockwise front faces, nothing culled so either
    /// winding order is visible.
    fn default() -> Self {
        Self {
            topology: wgpu::PrimitiveTopology::TriangleList,
            front_face: wgpu::FrontFace::Cw,
            cull_mode: None,
        }
    }
}

impl PrimitiveConfig {
    pub fn state(self) -> wgpu::PrimitiveState {
        wgpu::PrimitiveState {
            topology: self.topology,
            strip_index_format: None,
            front_face: self.front_face,
            cull_mode: self.cull_mode,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_streams_of_one_vec3_each() {
        let [position, color] = VertexStreams::layouts();

        assert_eq!(
            position,
            wgpu::VertexBufferLayout {
                array_stride: 12,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                }],
            }
        );
        assert_eq!(
            color,
            wgpu::VertexBufferLayout {
                array_stride: 12,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 1,
                }],
            }
        );
    }

    #[test]
    fn default_primitive_state() {
        let state = PrimitiveConfig::default().state();
        assert_eq!(state.topology, wgpu::PrimitiveTopology::TriangleList);
        assert_eq!(state.front_face, wgpu::FrontFace::Cw);
        assert_eq!(state.cull_mode, None);
        assert_eq!(state.strip_index_format, None);
    }
}
