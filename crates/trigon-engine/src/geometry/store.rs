use crate::device::RenderError;

use super::Mesh;

/// What a buffer is bound as during a draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BufferRole {
    Position,
    Color,
    Index,
}

impl BufferRole {
    pub fn usage(self) -> wgpu::BufferUsages {
        match self {
            BufferRole::Position | BufferRole::Color => wgpu::BufferUsages::VERTEX,
            BufferRole::Index => wgpu::BufferUsages::INDEX,
        }
    }
}

/// Creation parameters for one device buffer.
///
/// Every buffer is mapped at creation, filled and unmapped; there is no
/// separate upload step.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BufferSpec {
    pub label: &'static str,
    pub role: BufferRole,
    /// Exact byte size; must match the contents written at creation.
    pub size: u64,
}

impl BufferSpec {
    pub fn usage(&self) -> wgpu::BufferUsages {
        self.role.usage()
    }

    /// Creates the buffer and fills it with `contents` through the creation
    /// mapping.
    pub(crate) fn create(
        &self,
        device: &wgpu::Device,
        contents: &[u8],
    ) -> Result<wgpu::Buffer, RenderError> {
        debug_assert_eq!(
            contents.len() as u64,
            self.size,
            "{} contents do not match the declared buffer size",
            self.label
        );

        let max = device.limits().max_buffer_size;
        if self.size > max {
            return Err(RenderError::OutOfDeviceMemory(format!(
                "{} needs {} bytes, device allows {max}",
                self.label, self.size
            )));
        }

        let scope = device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(self.label),
            size: self.size,
            usage: self.usage(),
            mapped_at_creation: true,
        });
        if let Some(err) = pollster::block_on(scope.pop()) {
            return Err(RenderError::OutOfDeviceMemory(format!("{}: {err}", self.label)));
        }

        buffer.get_mapped_range_mut(..).copy_from_slice(contents);
        buffer.unmap();

        Ok(buffer)
    }
}

/// Device-resident, immutable copies of a mesh's streams.
///
/// Buffers are written once on upload and only read afterwards.
pub struct GeometryStore {
    position_buffer: wgpu::Buffer,
    color_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    vertex_count: u32,
    index_count: u32,
}

impl GeometryStore {
    /// Buffer specs for `mesh`, in position/color/index order.
    pub fn specs(mesh: &Mesh<'_>) -> [BufferSpec; 3] {
        [
            BufferSpec {
                label: "trigon position vbo",
                role: BufferRole::Position,
                size: mesh.position_bytes(),
            },
            BufferSpec {
                label: "trigon color vbo",
                role: BufferRole::Color,
                size: mesh.color_bytes(),
            },
            BufferSpec {
                label: "trigon ibo",
                role: BufferRole::Index,
                size: mesh.index_bytes(),
            },
        ]
    }

    pub fn upload(device: &wgpu::Device, mesh: &Mesh<'_>) -> Result<Self, RenderError> {
        let [position_spec, color_spec, index_spec] = Self::specs(mesh);

        let position_buffer =
            position_spec.create(device, bytemuck::cast_slice(mesh.positions()))?;
        let color_buffer = color_spec.create(device, bytemuck::cast_slice(mesh.colors()))?;
        let index_buffer = index_spec.create(device, bytemuck::cast_slice(mesh.indices()))?;

        log::debug!(
            "uploaded mesh: {} vertices, {} indices",
            mesh.vertex_count(),
            mesh.index_count()
        );

        Ok(Self {
            position_buffer,
            color_buffer,
            index_buffer,
            vertex_count: mesh.vertex_count() as u32,
            index_count: mesh.index_count(),
        })
    }

    pub fn position_buffer(&self) -> &wgpu::Buffer {
        &self.position_buffer
    }

    pub fn color_buffer(&self) -> &wgpu::Buffer {
        &self.color_buffer
    }

    pub fn index_buffer(&self) -> &wgpu::Buffer {
        &self.index_buffer
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }
}
