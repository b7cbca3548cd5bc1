use std::ops::Range;

use winit::dpi::PhysicalSize;

use crate::geometry::BufferRole;
use crate::pipeline::{COLOR_SLOT, POSITION_SLOT};

/// Opaque black.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// One command recorded inside the frame's render pass.
#[derive(Debug, Clone, PartialEq)]
pub enum PassCommand {
    SetPipeline,
    SetViewport {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        min_depth: f32,
        max_depth: f32,
    },
    SetScissorRect {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    SetVertexBuffer {
        slot: u32,
        stream: BufferRole,
    },
    SetIndexBuffer {
        format: wgpu::IndexFormat,
    },
    DrawIndexed {
        indices: Range<u32>,
        base_vertex: i32,
        instances: Range<u32>,
    },
}

/// The render pass a single tick records, as data.
///
/// Depends only on the index count and the surface size, so every tick on an
/// unchanged surface produces the same plan. The texture view it targets is
/// supplied at replay time.
#[derive(Debug, Clone, PartialEq)]
pub struct FramePlan {
    pub ops: wgpu::Operations<wgpu::Color>,
    pub commands: Vec<PassCommand>,
}

impl FramePlan {
    pub fn new(index_count: u32, size: PhysicalSize<u32>) -> Self {
        debug_assert!(size.width > 0 && size.height > 0, "empty surface");

        let commands = vec![
            PassCommand::SetPipeline,
            PassCommand::SetViewport {
                x: 0.0,
                y: 0.0,
                width: size.width as f32,
                height: size.height as f32,
                min_depth: 0.0,
                max_depth: 1.0,
            },
            PassCommand::SetScissorRect {
                x: 0,
                y: 0,
                width: size.width,
                height: size.height,
            },
            PassCommand::SetVertexBuffer {
                slot: POSITION_SLOT,
                stream: BufferRole::Position,
            },
            PassCommand::SetVertexBuffer {
                slot: COLOR_SLOT,
                stream: BufferRole::Color,
            },
            PassCommand::SetIndexBuffer {
                format: wgpu::IndexFormat::Uint32,
            },
            PassCommand::DrawIndexed {
                indices: 0..index_count,
                base_vertex: 0,
                instances: 0..1,
            },
        ];

        Self {
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                store: wgpu::StoreOp::Store,
            },
            commands,
        }
    }

    /// Draw commands in recording order.
    pub fn draws(&self) -> impl Iterator<Item = &PassCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, PassCommand::DrawIndexed { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(w: u32, h: u32) -> FramePlan {
        FramePlan::new(3, PhysicalSize::new(w, h))
    }

    #[test]
    fn clears_to_opaque_black_and_stores() {
        let p = plan(640, 480);
        assert_eq!(
            p.ops.load,
            wgpu::LoadOp::Clear(wgpu::Color {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                a: 1.0
            })
        );
        assert_eq!(p.ops.store, wgpu::StoreOp::Store);
    }

    #[test]
    fn exactly_one_indexed_draw() {
        let p = plan(640, 480);
        let draws: Vec<_> = p.draws().collect();
        assert_eq!(
            draws,
            vec![&PassCommand::DrawIndexed {
                indices: 0..3,
                base_vertex: 0,
                instances: 0..1,
            }]
        );
    }

    #[test]
    fn binds_before_drawing() {
        let p = plan(640, 480);
        assert_eq!(p.commands.first(), Some(&PassCommand::SetPipeline));
        assert!(matches!(
            p.commands.last(),
            Some(PassCommand::DrawIndexed { .. })
        ));
        assert!(p.commands.contains(&PassCommand::SetVertexBuffer {
            slot: 0,
            stream: BufferRole::Position
        }));
        assert!(p.commands.contains(&PassCommand::SetVertexBuffer {
            slot: 1,
            stream: BufferRole::Color
        }));
        assert!(p.commands.contains(&PassCommand::SetIndexBuffer {
            format: wgpu::IndexFormat::Uint32
        }));
    }

    #[test]
    fn viewport_and_scissor_follow_surface_size() {
        let p = plan(800, 600);
        assert!(p.commands.contains(&PassCommand::SetViewport {
            x: 0.0,
            y: 0.0,
            width: 800.0,
            height: 600.0,
            min_depth: 0.0,
            max_depth: 1.0,
        }));
        assert!(p.commands.contains(&PassCommand::SetScissorRect {
            x: 0,
            y: 0,
            width: 800,
            height: 600,
        }));
    }

    #[test]
    fn single_pixel_surface_still_gets_a_viewport() {
        let p = plan(1, 1);
        assert!(p.commands.contains(&PassCommand::SetViewport {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
            min_depth: 0.0,
            max_depth: 1.0,
        }));
        assert!(p.commands.contains(&PassCommand::SetScissorRect {
            x: 0,
            y: 0,
            width: 1,
            height: 1,
        }));
    }

    #[test]
    fn repeated_ticks_record_the_same_plan() {
        assert_eq!(plan(320, 240), plan(320, 240));
    }
}
