//! Immutable vertex/index geometry.
//!
//! A [`Mesh`] is validated CPU-side data; [`GeometryStore`] owns the
//! device buffers uploaded from it.

mod mesh;
mod store;

pub use mesh::{INDEX_SIZE, Mesh, MeshError, VEC3_STRIDE};
pub use store::{BufferRole, BufferSpec, GeometryStore};
