use crate::device::{RenderError, ShaderStage};

/// Built-in vertex program: position to clip space, color passed through.
pub const TRIANGLE_VERTEX_WGSL: &str = include_str!("shaders/triangle.vert.wgsl");

/// Built-in fragment program: interpolated color, fully opaque.
pub const TRIANGLE_FRAGMENT_WGSL: &str = include_str!("shaders/triangle.frag.wgsl");

/// WGSL source plus the entry point to run for one pipeline stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ShaderStageDesc<'a> {
    pub stage: ShaderStage,
    pub source: &'a str,
    pub entry_point: &'a str,
}

impl<'a> ShaderStageDesc<'a> {
    pub const DEFAULT_ENTRY_POINT: &'static str = "main";

    pub fn vertex(source: &'a str) -> Self {
        Self {
            stage: ShaderStage::Vertex,
            source,
            entry_point: Self::DEFAULT_ENTRY_POINT,
        }
    }

    pub fn fragment(source: &'a str) -> Self {
        Self {
            stage: ShaderStage::Fragment,
            source,
            entry_point: Self::DEFAULT_ENTRY_POINT,
        }
    }

    /// Parses and validates the source without touching a device.
    ///
    /// Checks that the entry point exists and targets this stage.
    pub fn validate(&self) -> Result<(), RenderError> {
        let module = naga::front::wgsl::parse_str(self.source)
            .map_err(|e| self.error(e.emit_to_string(self.source)))?;

        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::empty(),
        );
        validator
            .validate(&module)
            .map_err(|e| self.error(e.emit_to_string(self.source)))?;

        let stage = self.stage.as_naga();
        let found = module
            .entry_points
            .iter()
            .any(|ep| ep.name == self.entry_point && ep.stage == stage);
        if !found {
            return Err(self.error(format!(
                "no {} entry point named `{}`",
                self.stage, self.entry_point
            )));
        }

        Ok(())
    }

    fn error(&self, message: String) -> RenderError {
        RenderError::ShaderCompile {
            stage: self.stage,
            message,
        }
    }
}

/// A compiled shader module for one stage.
///
/// Only needed while the pipeline is being created.
pub struct ShaderProgram<'a> {
    pub desc: ShaderStageDesc<'a>,
    pub module: wgpu::ShaderModule,
}

impl<'a> ShaderProgram<'a> {
    /// Validates `desc` and creates the device shader module.
    ///
    /// Invalid source never reaches the device. Anything the device still
    /// rejects is reported the same way.
    pub fn compile(device: &wgpu::Device, desc: ShaderStageDesc<'a>) -> Result<Self, RenderError> {
        desc.validate()?;

        let label = format!("trigon {} shader", desc.stage);
        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label.as_str()),
            source: wgpu::ShaderSource::Wgsl(desc.source.into()),
        });
        if let Some(err) = pollster::block_on(scope.pop()) {
            return Err(desc.error(err.to_string()));
        }

        Ok(Self { desc, module })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_programs_validate() {
        ShaderStageDesc::vertex(TRIANGLE_VERTEX_WGSL)
            .validate()
            .unwrap();
        ShaderStageDesc::fragment(TRIANGLE_FRAGMENT_WGSL)
            .validate()
            .unwrap();
    }

    #[test]
    fn malformed_source_is_a_compile_error() {
        let err = ShaderStageDesc::vertex("@vertex fn main( -> {")
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            RenderError::ShaderCompile {
                stage: ShaderStage::Vertex,
                ..
            }
        ));
    }

    #[test]
    fn type_errors_are_compile_errors() {
        // Parses, but returns a vec3 where a vec4 is declared.
        let src = r#"
@fragment
fn main(@location(0) c: vec3<f32>) -> @location(0) vec4<f32> {
    return c;
}
"#;
        let err = ShaderStageDesc::fragment(src).validate().unwrap_err();
        assert!(matches!(
            err,
            RenderError::ShaderCompile {
                stage: ShaderStage::Fragment,
                ..
            }
        ));
    }

    #[test]
    fn missing_entry_point_is_a_compile_error() {
        let desc = ShaderStageDesc {
            entry_point: "vs_main",
            ..ShaderStageDesc::vertex(TRIANGLE_VERTEX_WGSL)
        };
        let err = desc.validate().unwrap_err();
        assert_eq!(
            err,
            RenderError::ShaderCompile {
                stage: ShaderStage::Vertex,
                message: "no vertex entry point named `vs_main`".to_string(),
            }
        );
    }

    #[test]
    fn stage_mismatch_is_a_compile_error() {
        // A fragment program handed in as the vertex stage.
        let err = ShaderStageDesc::vertex(TRIANGLE_FRAGMENT_WGSL)
            .validate()
            .unwrap_err();
        assert!(matches!(err, RenderError::ShaderCompile { .. }));
    }
}
