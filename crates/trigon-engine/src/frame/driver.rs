use winit::dpi::PhysicalSize;

use crate::device::{Gpu, RenderError, SurfaceErrorAction};
use crate::geometry::{BufferRole, GeometryStore, Mesh};
use crate::pipeline::{
    PipelineBuilder, TRIANGLE_FRAGMENT_WGSL, TRIANGLE_VERTEX_WGSL, TrianglePipeline,
};

use super::plan::{FramePlan, PassCommand};

/// Everything a frame reads: uploaded geometry and the linked pipeline.
///
/// Created once after the device is ready and never modified.
pub struct RenderSetup {
    pub geometry: GeometryStore,
    pub pipeline: TrianglePipeline,
}

impl RenderSetup {
    /// Uploads the built-in triangle and links the built-in programs for
    /// `format`.
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Result<Self, RenderError> {
        let pipeline = PipelineBuilder::build_with(
            device,
            TRIANGLE_VERTEX_WGSL,
            TRIANGLE_FRAGMENT_WGSL,
            format,
        )?;
        let geometry = GeometryStore::upload(device, &Mesh::TRIANGLE)?;

        Ok(Self { geometry, pipeline })
    }

    /// Same as [`RenderSetup::new`], for a window's configured surface.
    pub fn for_surface(gpu: &Gpu<'_>) -> Result<Self, RenderError> {
        Self::new(gpu.device(), gpu.surface_format())
    }

    fn buffer(&self, role: BufferRole) -> &wgpu::Buffer {
        match role {
            BufferRole::Position => self.geometry.position_buffer(),
            BufferRole::Color => self.geometry.color_buffer(),
            BufferRole::Index => self.geometry.index_buffer(),
        }
    }
}

/// What happened on one tick.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TickOutcome {
    Presented,
    /// The surface had no texture to hand out this time; nothing was drawn.
    Skipped,
}

/// Records, submits and presents one frame per tick.
pub struct FrameDriver {
    setup: RenderSetup,
    frames: u64,
}

impl FrameDriver {
    pub fn new(setup: RenderSetup) -> Self {
        Self { setup, frames: 0 }
    }

    /// Frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn plan(&self, size: PhysicalSize<u32>) -> FramePlan {
        FramePlan::new(self.setup.geometry.index_count(), size)
    }

    /// Records the frame's render pass into `encoder`, targeting `view`.
    pub fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        size: PhysicalSize<u32>,
    ) {
        let plan = self.plan(size);

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("trigon frame pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: plan.ops,
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        for command in &plan.commands {
            match command {
                PassCommand::SetPipeline => pass.set_pipeline(self.setup.pipeline.raw()),
                PassCommand::SetViewport {
                    x,
                    y,
                    width,
                    height,
                    min_depth,
                    max_depth,
                } => pass.set_viewport(*x, *y, *width, *height, *min_depth, *max_depth),
                PassCommand::SetScissorRect {
                    x,
                    y,
                    width,
                    height,
                } => pass.set_scissor_rect(*x, *y, *width, *height),
                PassCommand::SetVertexBuffer { slot, stream } => {
                    pass.set_vertex_buffer(*slot, self.setup.buffer(*stream).slice(..))
                }
                PassCommand::SetIndexBuffer { format } => {
                    pass.set_index_buffer(self.setup.buffer(BufferRole::Index).slice(..), *format)
                }
                PassCommand::DrawIndexed {
                    indices,
                    base_vertex,
                    instances,
                } => pass.draw_indexed(indices.clone(), *base_vertex, instances.clone()),
            }
        }
    }

    /// Draws and presents one frame on `gpu`'s surface.
    ///
    /// `pre_present` runs after recording and right before submission.
    /// A transient surface failure skips the frame; anything else is fatal.
    pub fn tick(
        &mut self,
        gpu: &Gpu<'_>,
        pre_present: impl FnOnce(),
    ) -> Result<TickOutcome, RenderError> {
        let Some(mut frame) = accept_frame(gpu.begin_frame(), self.frames)? else {
            return Ok(TickOutcome::Skipped);
        };

        self.encode(&mut frame.encoder, &frame.view, gpu.size());

        pre_present();
        gpu.submit(frame);

        self.frames += 1;
        log::trace!("presented frame {}", self.frames);

        Ok(TickOutcome::Presented)
    }
}

/// Sorts a surface acquisition result into a frame to draw, a skipped tick
/// (`Ok(None)`) or a fatal error.
fn accept_frame<F>(
    acquired: Result<F, SurfaceErrorAction>,
    frame: u64,
) -> Result<Option<F>, RenderError> {
    match acquired {
        Ok(f) => Ok(Some(f)),
        Err(SurfaceErrorAction::SkipFrame) => {
            log::warn!("surface texture unavailable, skipping frame {frame}");
            Ok(None)
        }
        Err(SurfaceErrorAction::Fatal(e)) => Err(e),
    }
}
