//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface in the preferred format
//! - acquiring frames and providing encoders/views for rendering

mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use error::{RenderError, ShaderStage, SurfaceErrorAction};
pub use frame::GpuFrame;
pub use gpu::{Gpu, GpuDevice};
pub use init::GpuInit;
