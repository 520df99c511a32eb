use crate::{
    GlApi, RendererError, ShaderProgram, ShaderSources, ShaderStage, ShaderVersion,
    check_for_gl_error,
};

/// Three 2D positions in normalized device coordinates.
pub const TRIANGLE_VERTICES: [f32; 6] = [0.0, 0.5, -0.5, -0.5, 0.5, -0.5];

const COMPONENTS_PER_VERTEX: i32 = 2;
const VERTEX_COUNT: i32 = 3;

/// Options for [`TriangleRenderer`].
#[derive(Clone, Debug, PartialEq)]
pub struct RendererOptions {
    /// Linear RGBA color the framebuffer is cleared to every frame.
    ///
    /// Default: a very dark grey.
    pub clear_color: [f32; 4],

    /// Name of the `vec2`/`vec4` attribute the triangle positions are bound to.
    ///
    /// Default: `"vPosition"`.
    pub position_attribute: String,
}

impl Default for RendererOptions {
    fn default() -> Self {
        let grey = 0.01;
        Self {
            clear_color: [grey, grey, grey, 1.0],
            position_attribute: "vPosition".to_owned(),
        }
    }
}

/// Identification strings reported by the driver.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DriverInfo {
    pub version: String,
    pub vendor: String,
    pub renderer: String,
    pub shading_language_version: String,
    pub extensions: String,
}

impl DriverInfo {
    /// Query and log the driver strings.
    pub fn query<G: GlApi>(gl: &G) -> Self {
        let get = |name: &str, parameter: u32| {
            let value = gl.get_parameter_string(parameter);
            log::info!("GL {name} = {value}");
            value
        };
        let info = Self {
            version: get("Version", glow::VERSION),
            vendor: get("Vendor", glow::VENDOR),
            renderer: get("Renderer", glow::RENDERER),
            shading_language_version: get("Shading language", glow::SHADING_LANGUAGE_VERSION),
            extensions: get("Extensions", glow::EXTENSIONS),
        };
        check_for_gl_error!(gl, "get_parameter_string");
        info
    }

    /// The parsed [`Self::shading_language_version`].
    pub fn shader_version(&self) -> Option<ShaderVersion> {
        ShaderVersion::parse(&self.shading_language_version)
    }
}

/// GL objects that only exist while initialized.
#[derive(Debug)]
struct Pipeline<G: GlApi> {
    program: G::Program,

    /// `None` if the linked program has no active position attribute.
    position_location: Option<u32>,
    vertex_buffer: G::Buffer,
}

/// Compiles the host's shaders once, then draws the same triangle every frame.
///
/// Lifecycle: [`Self::initialize`] once, [`Self::render_frame`] every frame,
/// [`Self::shutdown`] to release the GL objects. `render_frame` before a successful
/// `initialize` only clears the screen.
#[derive(Debug)]
pub struct TriangleRenderer<G: GlApi> {
    gl: G,
    options: RendererOptions,
    shader_program: ShaderProgram<G>,
    pipeline: Option<Pipeline<G>>,
    driver_info: Option<DriverInfo>,
}

impl<G: GlApi> TriangleRenderer<G> {
    pub fn new(gl: G, options: RendererOptions) -> Self {
        Self {
            gl,
            options,
            shader_program: ShaderProgram::new(),
            pipeline: None,
            driver_info: None,
        }
    }

    pub fn gl(&self) -> &G {
        &self.gl
    }

    pub fn options(&self) -> &RendererOptions {
        &self.options
    }

    pub fn is_initialized(&self) -> bool {
        self.pipeline.is_some()
    }

    /// Driver strings logged by the last [`Self::initialize`].
    pub fn driver_info(&self) -> Option<&DriverInfo> {
        self.driver_info.as_ref()
    }

    /// Where the triangle positions are bound in the linked program.
    ///
    /// `None` before initialization, or if the program has no active position attribute.
    pub fn attribute_location(&self) -> Option<u32> {
        self.pipeline.as_ref().and_then(|p| p.position_location)
    }

    /// Compile and link the first vertex and fragment source, resolve the position attribute,
    /// upload the triangle and set the viewport to `width` x `height`.
    ///
    /// Stops at the first failure: after a failed link no attribute lookup happens and the
    /// renderer stays uninitialized. The program object is kept until [`Self::shutdown`]
    /// or the next attempt, so a failed `initialize` may be retried.
    ///
    /// A linked program without an active position attribute is not an error: it is logged,
    /// and [`Self::render_frame`] then only clears.
    ///
    /// # Errors
    /// Fails if a source is missing, a shader does not compile, the program does not link,
    /// or the vertex buffer cannot be created.
    pub fn initialize(
        &mut self,
        sources: &ShaderSources,
        width: i32,
        height: i32,
    ) -> Result<(), RendererError> {
        if self.pipeline.is_some() {
            return Err(RendererError::AlreadyInitialized);
        }

        let gl = &self.gl;

        // Leftovers of an earlier failed attempt.
        self.shader_program.destroy(gl);

        let driver_info = DriverInfo::query(gl);
        match driver_info.shader_version() {
            Some(version) if !version.is_embedded() => {
                log::warn!("Not an OpenGL ES driver ({version:?}); shaders may not compile");
            }
            Some(version) => log::debug!("Shader version: {version:?}"),
            None => log::warn!(
                "Could not parse shading language version {:?}",
                driver_info.shading_language_version
            ),
        }
        self.driver_info = Some(driver_info);

        for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
            let source = sources
                .source(stage, 0)
                .ok_or(RendererError::MissingSource(stage))?;
            if let Err(err) = self.shader_program.create_program(gl, stage, source) {
                log::error!("Could not create program.");
                return Err(err.into());
            }
        }
        let program = self.shader_program.link(gl)?;

        let name = self.options.position_attribute.as_str();
        let position_location = gl.get_attrib_location(program, name);
        check_for_gl_error!(gl, "get_attrib_location");
        log::info!("get_attrib_location({name:?}) = {position_location:?}");
        if position_location.is_none() {
            log::warn!("The linked program has no active attribute {name:?}; nothing will be drawn");
        }

        let vertex_buffer = gl.create_buffer().map_err(RendererError::CreateBuffer)?;
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vertex_buffer));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(&TRIANGLE_VERTICES[..]),
            glow::STATIC_DRAW,
        );
        gl.bind_buffer(glow::ARRAY_BUFFER, None);
        check_for_gl_error!(gl, "buffer_data_u8_slice");

        gl.viewport(0, 0, width, height);
        check_for_gl_error!(gl, "viewport");

        self.pipeline = Some(Pipeline {
            program,
            position_location,
            vertex_buffer,
        });
        Ok(())
    }

    /// Clear the screen and, if initialized, draw the triangle.
    pub fn render_frame(&self) {
        let gl = &self.gl;

        let [r, g, b, a] = self.options.clear_color;
        gl.clear_color(r, g, b, a);
        check_for_gl_error!(gl, "clear_color");
        gl.clear(glow::DEPTH_BUFFER_BIT | glow::COLOR_BUFFER_BIT);
        check_for_gl_error!(gl, "clear");

        let Some(pipeline) = &self.pipeline else {
            log::debug!("render_frame called before a successful initialize; only clearing");
            return;
        };

        gl.use_program(Some(pipeline.program));
        check_for_gl_error!(gl, "use_program");

        let Some(position_location) = pipeline.position_location else {
            return;
        };

        gl.bind_buffer(glow::ARRAY_BUFFER, Some(pipeline.vertex_buffer));
        gl.vertex_attrib_pointer_f32(
            position_location,
            COMPONENTS_PER_VERTEX,
            glow::FLOAT,
            false,
            0,
            0,
        );
        check_for_gl_error!(gl, "vertex_attrib_pointer_f32");
        gl.enable_vertex_attrib_array(position_location);
        check_for_gl_error!(gl, "enable_vertex_attrib_array");

        gl.draw_arrays(glow::TRIANGLES, 0, VERTEX_COUNT);
        check_for_gl_error!(gl, "draw_arrays");
    }

    /// Release the program and vertex buffer. Calling this again is a no-op.
    pub fn shutdown(&mut self) {
        let gl = &self.gl;
        if let Some(pipeline) = self.pipeline.take() {
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.delete_buffer(pipeline.vertex_buffer);
            gl.use_program(None);
            check_for_gl_error!(gl, "delete_buffer");
        }
        self.shader_program.destroy(gl);
    }
}

impl<G: GlApi> Drop for TriangleRenderer<G> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
