/// A single acquired surface frame.
///
/// This object is short-lived and must be finalized within the tick that
/// acquired it. Holding the surface texture prevents acquisition of the next one.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
