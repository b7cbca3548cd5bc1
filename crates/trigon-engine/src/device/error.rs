use std::fmt;

/// Pipeline stage a shader program targets.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub(crate) fn as_naga(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Fatal rendering failures.
///
/// None of these are retried. Setup either succeeds completely or the program
/// reports the error and stops.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// No usable graphics backend, adapter, device or surface.
    UnsupportedPlatform(String),
    /// Shader source failed to parse or validate.
    ShaderCompile { stage: ShaderStage, message: String },
    /// A buffer or texture allocation could not be satisfied.
    OutOfDeviceMemory(String),
    /// The presentation target was invalidated.
    SurfaceLost,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::UnsupportedPlatform(msg) => write!(f, "unsupported platform: {msg}"),
            RenderError::ShaderCompile { stage, message } => {
                write!(f, "{stage} shader failed to compile: {message}")
            }
            RenderError::OutOfDeviceMemory(msg) => write!(f, "out of device memory: {msg}"),
            RenderError::SurfaceLost => f.write_str("presentation surface lost"),
        }
    }
}

impl std::error::Error for RenderError {}

/// Response to a failed surface texture acquisition.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceErrorAction {
    /// Transient error; skip the current tick.
    SkipFrame,
    /// Unrecoverable; stop the render loop.
    Fatal(RenderError),
}
