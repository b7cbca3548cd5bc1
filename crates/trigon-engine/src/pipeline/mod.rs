//! Render pipeline construction.
//!
//! Shader sources are WGSL. Both stages are validated with naga before any
//! device object is created, so malformed source surfaces as
//! [`RenderError::ShaderCompile`](crate::device::RenderError::ShaderCompile)
//! instead of a device error.

mod builder;
mod layout;
mod shader;

pub use builder::{PipelineBuilder, TrianglePipeline};
pub use layout::{COLOR_SLOT, POSITION_SLOT, PrimitiveConfig, VertexStreams};
pub use shader::{ShaderProgram, ShaderStageDesc, TRIANGLE_FRAGMENT_WGSL, TRIANGLE_VERTEX_WGSL};
