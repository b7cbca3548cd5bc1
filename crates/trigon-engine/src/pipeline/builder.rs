use crate::device::{RenderError, ShaderStage};

use super::layout::{PrimitiveConfig, VertexStreams};
use super::shader::{ShaderProgram, ShaderStageDesc};

/// The immutable render pipeline every frame binds.
pub struct TrianglePipeline {
    pipeline: wgpu::RenderPipeline,
    format: wgpu::TextureFormat,
}

impl TrianglePipeline {
    pub fn raw(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    /// Color target format the pipeline was built for.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }
}

/// Links a vertex and a fragment program into a [`TrianglePipeline`].
///
/// Built once; there is no cache and no variant handling.
pub struct PipelineBuilder<'a> {
    vertex: ShaderStageDesc<'a>,
    fragment: ShaderStageDesc<'a>,
    format: wgpu::TextureFormat,
}

impl<'a> PipelineBuilder<'a> {
    const LABEL: &'static str = "trigon pipeline";

    pub fn new(
        vertex_source: &'a str,
        fragment_source: &'a str,
        format: wgpu::TextureFormat,
    ) -> Self {
        Self {
            vertex: ShaderStageDesc::vertex(vertex_source),
            fragment: ShaderStageDesc::fragment(fragment_source),
            format,
        }
    }

    /// Shorthand for `PipelineBuilder::new(..).build(device)`.
    pub fn build_with(
        device: &wgpu::Device,
        vertex_source: &'a str,
        fragment_source: &'a str,
        format: wgpu::TextureFormat,
    ) -> Result<TrianglePipeline, RenderError> {
        Self::new(vertex_source, fragment_source, format).build(device)
    }

    /// Compiles both programs and creates the pipeline.
    ///
    /// A program failing validation on its own, or the two failing to link,
    /// is reported as [`RenderError::ShaderCompile`].
    pub fn build(&self, device: &wgpu::Device) -> Result<TrianglePipeline, RenderError> {
        let vertex = ShaderProgram::compile(device, self.vertex)?;
        let fragment = ShaderProgram::compile(device, self.fragment)?;

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("trigon pipeline layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let buffers = VertexStreams::layouts();

        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(Self::LABEL),
            layout: Some(&layout),

            vertex: wgpu::VertexState {
                module: &vertex.module,
                entry_point: Some(vertex.desc.entry_point),
                compilation_options: Default::default(),
                buffers: &buffers,
            },

            fragment: Some(wgpu::FragmentState {
                module: &fragment.module,
                entry_point: Some(fragment.desc.entry_point),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: PrimitiveConfig::default().state(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });
        if let Some(err) = pollster::block_on(scope.pop()) {
            return Err(link_error(&err.to_string()));
        }

        log::info!("built {} for {:?}", Self::LABEL, self.format);

        Ok(TrianglePipeline {
            pipeline,
            format: self.format,
        })
    }
}

/// Attributes a pipeline validation failure to the stage wgpu names in it.
///
/// Interface mismatches are reported against the consuming stage, so anything
/// that does not name the vertex stage is charged to the fragment stage.
fn link_error(message: &str) -> RenderError {
    let stage = if message.contains("ShaderStages(VERTEX)") {
        ShaderStage::Vertex
    } else {
        ShaderStage::Fragment
    };
    RenderError::ShaderCompile {
        stage,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_errors_name_the_failing_stage() {
        let err = link_error(
            "Validation Error\n\nCaused by:\n  Error matching ShaderStages(FRAGMENT) shader \
             requirements against the pipeline",
        );
        assert!(matches!(
            err,
            RenderError::ShaderCompile {
                stage: ShaderStage::Fragment,
                ..
            }
        ));

        let err = link_error("Error matching ShaderStages(VERTEX) shader requirements");
        assert!(matches!(
            err,
            RenderError::ShaderCompile {
                stage: ShaderStage::Vertex,
                ..
            }
        ));
    }
}
