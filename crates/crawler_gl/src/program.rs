use crate::{GlApi, ShaderError, ShaderStage, check_for_gl_error};

/// The compile/link unit: one program object and the shaders attached to it.
///
/// The program object is created lazily by the first [`Self::create_program`] call and is
/// reused by every later call, so compiling a vertex and then a fragment shader yields one
/// program with both attached.
///
/// This struct must be destroyed with [`Self::destroy`] before dropping, to ensure the
/// program object is deleted and not leaked.
#[derive(Debug)]
pub struct ShaderProgram<G: GlApi> {
    program: Option<G::Program>,
}

impl<G: GlApi> Default for ShaderProgram<G> {
    fn default() -> Self {
        Self { program: None }
    }
}

impl<G: GlApi> ShaderProgram<G> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The program object, if one has been created.
    ///
    /// This is set even when the last link failed.
    pub fn program(&self) -> Option<G::Program> {
        self.program
    }

    /// Compile `source` as a `stage` shader and attach it to the program, then request a link.
    ///
    /// The link result is not checked here; call [`Self::link`] once all stages are attached.
    ///
    /// # Errors
    /// Returns [`ShaderError::Compile`] with the driver's info log if the shader does not
    /// compile, in which case the shader object is deleted again.
    /// Also fails if the driver refuses to create the program or shader object.
    pub fn create_program(
        &mut self,
        gl: &G,
        stage: ShaderStage,
        source: &str,
    ) -> Result<(), ShaderError> {
        let program = self.get_or_create_program(gl)?;

        let shader = match compile_shader(gl, stage, source) {
            Ok(shader) => shader,
            Err(err) => {
                log::error!("{err}");
                check_for_gl_error!(gl, "compile_shader");
                return Err(err);
            }
        };

        gl.attach_shader(program, shader);
        check_for_gl_error!(gl, "attach_shader");
        // Only flagged while attached; the driver frees it together with the program.
        gl.delete_shader(shader);
        gl.link_program(program);
        check_for_gl_error!(gl, "link_program");
        Ok(())
    }

    /// Check the result of the last link request.
    ///
    /// # Errors
    /// Returns [`ShaderError::Link`] with the driver's info log if linking failed.
    /// The failed program is kept, so [`Self::destroy`] still releases it.
    /// Fails with [`ShaderError::CreateProgram`] if no shader has been attached yet.
    pub fn link(&self, gl: &G) -> Result<G::Program, ShaderError> {
        let Some(program) = self.program else {
            return Err(ShaderError::CreateProgram(
                "no shader has been attached".to_owned(),
            ));
        };

        if gl.get_program_link_status(program) {
            Ok(program)
        } else {
            let err = ShaderError::Link {
                log: gl.get_program_info_log(program),
            };
            log::error!("{err}");
            check_for_gl_error!(gl, "get_program_link_status");
            Err(err)
        }
    }

    /// Delete the program object. Calling this again is a no-op.
    pub fn destroy(&mut self, gl: &G) {
        if let Some(program) = self.program.take() {
            gl.delete_program(program);
            check_for_gl_error!(gl, "delete_program");
        }
    }

    fn get_or_create_program(&mut self, gl: &G) -> Result<G::Program, ShaderError> {
        if let Some(program) = self.program {
            return Ok(program);
        }
        match gl.create_program() {
            Ok(program) => {
                self.program = Some(program);
                Ok(program)
            }
            Err(reason) => {
                log::error!("Could not create program: {reason}");
                check_for_gl_error!(gl, "create_program");
                Err(ShaderError::CreateProgram(reason))
            }
        }
    }
}

impl<G: GlApi> Drop for ShaderProgram<G> {
    fn drop(&mut self) {
        if let Some(program) = self.program {
            log::error!(
                "ShaderProgram dropped without calling destroy(); leaking GL program {program:?}"
            );
        }
    }
}

fn compile_shader<G: GlApi>(
    gl: &G,
    stage: ShaderStage,
    source: &str,
) -> Result<G::Shader, ShaderError> {
    let shader = gl
        .create_shader(stage.gl_enum())
        .map_err(|reason| ShaderError::CreateShader { stage, reason })?;

    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if gl.get_shader_compile_status(shader) {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(shader);
        gl.delete_shader(shader);
        Err(ShaderError::Compile { stage, log })
    }
}
