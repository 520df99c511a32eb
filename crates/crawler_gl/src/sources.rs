/// A programmable pipeline stage.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,

    /// Called "pixel shader" by the Java host.
    Fragment,
}

impl ShaderStage {
    /// The `GL_*_SHADER` enum for this stage.
    pub fn gl_enum(self) -> u32 {
        match self {
            Self::Vertex => glow::VERTEX_SHADER,
            Self::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        })
    }
}

/// Shader text handed over by the host, one list per stage.
///
/// Append-only: nothing is validated here, malformed GLSL only fails once it is compiled.
/// Only the first source of each stage is used by [`crate::TriangleRenderer`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShaderSources {
    vertex: Vec<String>,
    fragment: Vec<String>,
}

impl ShaderSources {
    pub const fn new() -> Self {
        Self {
            vertex: Vec::new(),
            fragment: Vec::new(),
        }
    }

    pub fn add_vertex_source(&mut self, source: impl Into<String>) {
        self.add_source(ShaderStage::Vertex, source);
    }

    pub fn add_fragment_source(&mut self, source: impl Into<String>) {
        self.add_source(ShaderStage::Fragment, source);
    }

    pub fn add_source(&mut self, stage: ShaderStage, source: impl Into<String>) {
        let source = source.into();
        log::debug!("Adding {stage} shader source #{} ({} bytes)", self.count(stage), source.len());
        self.list_mut(stage).push(source);
    }

    pub fn vertex_source(&self, index: usize) -> Option<&str> {
        self.source(ShaderStage::Vertex, index)
    }

    pub fn fragment_source(&self, index: usize) -> Option<&str> {
        self.source(ShaderStage::Fragment, index)
    }

    pub fn source(&self, stage: ShaderStage, index: usize) -> Option<&str> {
        self.list(stage).get(index).map(String::as_str)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex.len()
    }

    pub fn fragment_count(&self) -> usize {
        self.fragment.len()
    }

    pub fn count(&self, stage: ShaderStage) -> usize {
        self.list(stage).len()
    }

    fn list(&self, stage: ShaderStage) -> &Vec<String> {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        }
    }

    fn list_mut(&mut self, stage: ShaderStage) -> &mut Vec<String> {
        match stage {
            ShaderStage::Vertex => &mut self.vertex,
            ShaderStage::Fragment => &mut self.fragment,
        }
    }
}
