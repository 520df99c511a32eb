#![allow(unsafe_code)]
#![expect(clippy::undocumented_unsafe_blocks)]

use glow::HasContext as _;

/// The subset of OpenGL ES 2.0 the pipeline needs.
///
/// Method names and signatures follow [`glow::HasContext`].
/// Every call must happen on the thread where the context is current.
pub trait GlApi {
    type Shader: Copy + std::fmt::Debug;
    type Program: Copy + std::fmt::Debug;
    type Buffer: Copy + std::fmt::Debug;

    fn get_error(&self) -> u32;

    fn get_parameter_string(&self, parameter: u32) -> String;

    fn create_shader(&self, shader_type: u32) -> Result<Self::Shader, String>;

    fn shader_source(&self, shader: Self::Shader, source: &str);

    fn compile_shader(&self, shader: Self::Shader);

    fn get_shader_compile_status(&self, shader: Self::Shader) -> bool;

    fn get_shader_info_log(&self, shader: Self::Shader) -> String;

    fn delete_shader(&self, shader: Self::Shader);

    fn create_program(&self) -> Result<Self::Program, String>;

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);

    fn link_program(&self, program: Self::Program);

    fn get_program_link_status(&self, program: Self::Program) -> bool;

    fn get_program_info_log(&self, program: Self::Program) -> String;

    fn delete_program(&self, program: Self::Program);

    fn use_program(&self, program: Option<Self::Program>);

    fn get_attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;

    fn create_buffer(&self) -> Result<Self::Buffer, String>;

    fn bind_buffer(&self, target: u32, buffer: Option<Self::Buffer>);

    fn buffer_data_u8_slice(&self, target: u32, data: &[u8], usage: u32);

    fn delete_buffer(&self, buffer: Self::Buffer);

    fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    );

    fn enable_vertex_attrib_array(&self, index: u32);

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);

    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32);

    fn clear(&self, mask: u32);

    fn draw_arrays(&self, mode: u32, first: i32, count: i32);
}

/// [`GlApi`] backed by a real driver through [`glow`].
pub struct GlowApi {
    gl: glow::Context,
}

impl GlowApi {
    /// Wrap an existing context.
    ///
    /// # Safety
    /// The GL context `gl` was loaded for must stay current on the calling thread
    /// for as long as this value is used, and this value must not be used from any other thread.
    pub unsafe fn new(gl: glow::Context) -> Self {
        Self { gl }
    }

    /// Load all GL entry points through `loader`, e.g. `eglGetProcAddress` or `dlsym`.
    ///
    /// # Safety
    /// A GL context must be current on the calling thread, `loader` must return valid
    /// function pointers (or null) for that context, and the requirements of [`Self::new`] apply.
    pub unsafe fn from_loader_function_cstr<F>(loader: F) -> Self
    where
        F: FnMut(&std::ffi::CStr) -> *const std::ffi::c_void,
    {
        // SAFETY: forwarded to the caller.
        unsafe { Self::new(glow::Context::from_loader_function_cstr(loader)) }
    }
}

impl std::fmt::Debug for GlowApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlowApi").finish_non_exhaustive()
    }
}

// SAFETY (for every block below): `GlowApi::new` requires the context to be current on the
// calling thread, which is all glow needs for these calls.
impl GlApi for GlowApi {
    type Shader = glow::Shader;
    type Program = glow::Program;
    type Buffer = glow::Buffer;

    fn get_error(&self) -> u32 {
        unsafe { self.gl.get_error() }
    }

    fn get_parameter_string(&self, parameter: u32) -> String {
        unsafe { self.gl.get_parameter_string(parameter) }
    }

    fn create_shader(&self, shader_type: u32) -> Result<Self::Shader, String> {
        unsafe { self.gl.create_shader(shader_type) }
    }

    fn shader_source(&self, shader: Self::Shader, source: &str) {
        unsafe { self.gl.shader_source(shader, source) }
    }

    fn compile_shader(&self, shader: Self::Shader) {
        unsafe { self.gl.compile_shader(shader) }
    }

    fn get_shader_compile_status(&self, shader: Self::Shader) -> bool {
        unsafe { self.gl.get_shader_compile_status(shader) }
    }

    fn get_shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { self.gl.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { self.gl.delete_shader(shader) }
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { self.gl.create_program() }
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { self.gl.attach_shader(program, shader) }
    }

    fn link_program(&self, program: Self::Program) {
        unsafe { self.gl.link_program(program) }
    }

    fn get_program_link_status(&self, program: Self::Program) -> bool {
        unsafe { self.gl.get_program_link_status(program) }
    }

    fn get_program_info_log(&self, program: Self::Program) -> String {
        unsafe { self.gl.get_program_info_log(program) }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { self.gl.delete_program(program) }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { self.gl.use_program(program) }
    }

    fn get_attrib_location(&self, program: Self::Program, name: &str) -> Option<u32> {
        unsafe { self.gl.get_attrib_location(program, name) }
    }

    fn create_buffer(&self) -> Result<Self::Buffer, String> {
        unsafe { self.gl.create_buffer() }
    }

    fn bind_buffer(&self, target: u32, buffer: Option<Self::Buffer>) {
        unsafe { self.gl.bind_buffer(target, buffer) }
    }

    fn buffer_data_u8_slice(&self, target: u32, data: &[u8], usage: u32) {
        unsafe { self.gl.buffer_data_u8_slice(target, data, usage) }
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        unsafe { self.gl.delete_buffer(buffer) }
    }

    fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        unsafe {
            self.gl
                .vertex_attrib_pointer_f32(index, size, data_type, normalized, stride, offset);
        }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(index) }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.viewport(x, y, width, height) }
    }

    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        unsafe { self.gl.clear_color(red, green, blue, alpha) }
    }

    fn clear(&self, mask: u32) {
        unsafe { self.gl.clear(mask) }
    }

    fn draw_arrays(&self, mode: u32, first: i32, count: i32) {
        unsafe { self.gl.draw_arrays(mode, first, count) }
    }
}
