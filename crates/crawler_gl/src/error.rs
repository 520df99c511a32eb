use crate::ShaderStage;

/// Failure of the compile/link unit.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ShaderError {
    #[error("could not create program object: {0}")]
    CreateProgram(String),

    #[error("could not create {stage} shader object: {reason}")]
    CreateShader { stage: ShaderStage, reason: String },

    /// `log` is the driver's info log for the shader.
    #[error("could not compile {stage} shader:\n{log}")]
    Compile { stage: ShaderStage, log: String },

    /// `log` is the driver's info log for the program.
    #[error("could not link program:\n{log}")]
    Link { log: String },
}

impl ShaderError {
    /// The diagnostic text reported by the driver, if any.
    pub fn driver_log(&self) -> Option<&str> {
        match self {
            Self::Compile { log, .. } | Self::Link { log } => Some(log),
            Self::CreateProgram(_) | Self::CreateShader { .. } => None,
        }
    }
}

/// Failure of [`crate::TriangleRenderer::initialize`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RendererError {
    #[error("no {0} shader source has been loaded")]
    MissingSource(ShaderStage),

    #[error(transparent)]
    Shader(#[from] ShaderError),

    #[error("could not create vertex buffer: {0}")]
    CreateBuffer(String),

    #[error("renderer is already initialized; call shutdown() first")]
    AlreadyInitialized,
}

#[test]
fn test_error_messages() {
    let err = ShaderError::Compile {
        stage: ShaderStage::Fragment,
        log: "0:1: syntax error".to_owned(),
    };
    assert_eq!(err.to_string(), "could not compile fragment shader:\n0:1: syntax error");
    assert_eq!(err.driver_log(), Some("0:1: syntax error"));

    let err = RendererError::from(ShaderError::Link {
        log: "missing main".to_owned(),
    });
    assert_eq!(err.to_string(), "could not link program:\nmissing main");

    assert_eq!(
        RendererError::MissingSource(ShaderStage::Vertex).to_string(),
        "no vertex shader source has been loaded"
    );
}
