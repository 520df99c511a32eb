//! A fake GLES2 driver that records every call.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use crawler_gl::{GlApi, glow};

pub const VALID_VERTEX_SHADER: &str = "attribute vec4 vPosition;
void main() {
  gl_Position = vPosition;
}
";

pub const VALID_FRAGMENT_SHADER: &str = "precision mediump float;
void main() {
  gl_FragColor = vec4(0.0, 1.0, 0.0, 1.0);
}
";

/// Missing the closing brace.
pub const BROKEN_FRAGMENT_SHADER: &str = "precision mediump float;
void main() {
  gl_FragColor = vec4(0.0, 1.0, 0.0, 1.0);
";

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    CreateShader { shader: u32, shader_type: u32 },
    ShaderSource { shader: u32, source: String },
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader { program: u32, shader: u32 },
    LinkProgram(u32),
    DeleteProgram(u32),
    UseProgram(Option<u32>),
    GetAttribLocation { program: u32, name: String },
    CreateBuffer(u32),
    BindBuffer { target: u32, buffer: Option<u32> },
    BufferData { target: u32, data: Vec<f32>, usage: u32 },
    DeleteBuffer(u32),
    VertexAttribPointer {
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    },
    EnableVertexAttribArray(u32),
    Viewport { x: i32, y: i32, width: i32, height: i32 },
    ClearColor([f32; 4]),
    Clear(u32),
    DrawArrays { mode: u32, first: i32, count: i32 },
}

#[derive(Debug)]
struct FakeShader {
    shader_type: u32,
    source: String,
    compiled: bool,
    info_log: String,
    delete_pending: bool,
}

#[derive(Debug, Default)]
struct FakeProgram {
    attached: Vec<u32>,
    linked: bool,
    info_log: String,
}

#[derive(Debug, Default)]
struct Driver {
    calls: RefCell<Vec<Call>>,
    last_id: Cell<u32>,
    shaders: RefCell<HashMap<u32, FakeShader>>,
    programs: RefCell<HashMap<u32, FakeProgram>>,
    pending_errors: RefCell<VecDeque<u32>>,
}

/// Compiles anything containing `main` with balanced braces.
/// Links when exactly one compiled vertex and one compiled fragment shader are attached.
///
/// Clones share the same driver state, so a test can keep a handle after handing one to a
/// renderer that is later dropped.
#[derive(Clone, Debug)]
pub struct FakeGl {
    driver: Rc<Driver>,

    /// Reported for every active attribute.
    pub attribute_location: u32,

    /// Make every link fail even with valid shaders.
    pub fail_link: bool,

    /// `get_error` never returns `GL_NO_ERROR`.
    pub always_error: bool,

    pub fail_create_program: bool,
}

impl Default for FakeGl {
    fn default() -> Self {
        Self {
            driver: Rc::default(),
            attribute_location: 3,
            fail_link: false,
            always_error: false,
            fail_create_program: false,
        }
    }
}

impl FakeGl {
    pub fn failing_link() -> Self {
        let mut gl = Self::default();
        gl.fail_link = true;
        gl
    }

    pub fn always_erroring() -> Self {
        let mut gl = Self::default();
        gl.always_error = true;
        gl
    }

    pub fn failing_program_creation() -> Self {
        let mut gl = Self::default();
        gl.fail_create_program = true;
        gl
    }

    pub fn calls(&self) -> Vec<Call> {
        self.driver.calls.borrow().clone()
    }

    pub fn take_calls(&self) -> Vec<Call> {
        std::mem::take(&mut *self.driver.calls.borrow_mut())
    }

    pub fn push_error(&self, error: u32) {
        self.driver.pending_errors.borrow_mut().push_back(error);
    }

    pub fn pending_error_count(&self) -> usize {
        self.driver.pending_errors.borrow().len()
    }

    pub fn live_shaders(&self) -> usize {
        self.driver.shaders.borrow().len()
    }

    pub fn live_programs(&self) -> usize {
        self.driver.programs.borrow().len()
    }

    pub fn attached_shaders(&self, program: u32) -> Vec<u32> {
        self.driver
            .programs
            .borrow()
            .get(&program)
            .map(|p| p.attached.clone())
            .unwrap_or_default()
    }

    fn record(&self, call: Call) {
        self.driver.calls.borrow_mut().push(call);
    }

    fn allocate(&self) -> u32 {
        let id = self.driver.last_id.get() + 1;
        self.driver.last_id.set(id);
        id
    }
}

impl GlApi for FakeGl {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;

    fn get_error(&self) -> u32 {
        if self.always_error {
            return glow::CONTEXT_LOST;
        }
        self.driver
            .pending_errors
            .borrow_mut()
            .pop_front()
            .unwrap_or(glow::NO_ERROR)
    }

    fn get_parameter_string(&self, parameter: u32) -> String {
        match parameter {
            glow::VERSION => "OpenGL ES 2.0 FakeGL",
            glow::VENDOR => "Crawler",
            glow::RENDERER => "FakeGL renderer",
            glow::SHADING_LANGUAGE_VERSION => "OpenGL ES GLSL ES 1.00",
            glow::EXTENSIONS => "GL_OES_vertex_array_object GL_OES_depth24",
            _ => "",
        }
        .to_owned()
    }

    fn create_shader(&self, shader_type: u32) -> Result<u32, String> {
        let shader = self.allocate();
        self.driver.shaders.borrow_mut().insert(
            shader,
            FakeShader {
                shader_type,
                source: String::new(),
                compiled: false,
                info_log: String::new(),
                delete_pending: false,
            },
        );
        self.record(Call::CreateShader {
            shader,
            shader_type,
        });
        Ok(shader)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        if let Some(s) = self.driver.shaders.borrow_mut().get_mut(&shader) {
            s.source = source.to_owned();
        }
        self.record(Call::ShaderSource {
            shader,
            source: source.to_owned(),
        });
    }

    fn compile_shader(&self, shader: u32) {
        if let Some(s) = self.driver.shaders.borrow_mut().get_mut(&shader) {
            let opened = s.source.matches('{').count();
            let closed = s.source.matches('}').count();
            s.compiled = s.source.contains("main") && opened == closed;
            s.info_log = if s.compiled {
                String::new()
            } else if opened != closed {
                "ERROR: 0:4: '' : syntax error: unexpected end of file".to_owned()
            } else {
                "ERROR: no main() function found".to_owned()
            };
        }
        self.record(Call::CompileShader(shader));
    }

    fn get_shader_compile_status(&self, shader: u32) -> bool {
        self.driver
            .shaders
            .borrow()
            .get(&shader)
            .is_some_and(|s| s.compiled)
    }

    fn get_shader_info_log(&self, shader: u32) -> String {
        self.driver
            .shaders
            .borrow()
            .get(&shader)
            .map(|s| s.info_log.clone())
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: u32) {
        let attached = self
            .driver
            .programs
            .borrow()
            .values()
            .any(|p| p.attached.contains(&shader));
        let mut shaders = self.driver.shaders.borrow_mut();
        if attached {
            if let Some(s) = shaders.get_mut(&shader) {
                s.delete_pending = true;
            }
        } else {
            shaders.remove(&shader);
        }
        self.record(Call::DeleteShader(shader));
    }

    fn create_program(&self) -> Result<u32, String> {
        if self.fail_create_program {
            return Err("out of program objects".to_owned());
        }
        let program = self.allocate();
        self.driver
            .programs
            .borrow_mut()
            .insert(program, FakeProgram::default());
        self.record(Call::CreateProgram(program));
        Ok(program)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        if let Some(p) = self.driver.programs.borrow_mut().get_mut(&program) {
            p.attached.push(shader);
        }
        self.record(Call::AttachShader { program, shader });
    }

    fn link_program(&self, program: u32) {
        let shaders = self.driver.shaders.borrow();
        if let Some(p) = self.driver.programs.borrow_mut().get_mut(&program) {
            let count = |shader_type| {
                p.attached
                    .iter()
                    .filter_map(|id| shaders.get(id))
                    .filter(|s| s.compiled && s.shader_type == shader_type)
                    .count()
            };
            let vertex = count(glow::VERTEX_SHADER);
            let fragment = count(glow::FRAGMENT_SHADER);
            p.linked = !self.fail_link && vertex == 1 && fragment == 1;
            p.info_log = if p.linked {
                String::new()
            } else if self.fail_link {
                "error: varying vColor has no matching output".to_owned()
            } else {
                format!("error: {vertex} vertex and {fragment} fragment shaders attached")
            };
        }
        self.record(Call::LinkProgram(program));
    }

    fn get_program_link_status(&self, program: u32) -> bool {
        self.driver
            .programs
            .borrow()
            .get(&program)
            .is_some_and(|p| p.linked)
    }

    fn get_program_info_log(&self, program: u32) -> String {
        self.driver
            .programs
            .borrow()
            .get(&program)
            .map(|p| p.info_log.clone())
            .unwrap_or_default()
    }

    fn delete_program(&self, program: u32) {
        if let Some(p) = self.driver.programs.borrow_mut().remove(&program) {
            let mut shaders = self.driver.shaders.borrow_mut();
            for id in p.attached {
                if shaders.get(&id).is_some_and(|s| s.delete_pending) {
                    shaders.remove(&id);
                }
            }
        }
        self.record(Call::DeleteProgram(program));
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn get_attrib_location(&self, program: u32, name: &str) -> Option<u32> {
        self.record(Call::GetAttribLocation {
            program,
            name: name.to_owned(),
        });
        let programs = self.driver.programs.borrow();
        let shaders = self.driver.shaders.borrow();
        let p = programs.get(&program).filter(|p| p.linked)?;
        let declared = p
            .attached
            .iter()
            .filter_map(|id| shaders.get(id))
            .any(|s| s.shader_type == glow::VERTEX_SHADER && s.source.contains(name));
        declared.then_some(self.attribute_location)
    }

    fn create_buffer(&self) -> Result<u32, String> {
        let buffer = self.allocate();
        self.record(Call::CreateBuffer(buffer));
        Ok(buffer)
    }

    fn bind_buffer(&self, target: u32, buffer: Option<u32>) {
        self.record(Call::BindBuffer { target, buffer });
    }

    fn buffer_data_u8_slice(&self, target: u32, data: &[u8], usage: u32) {
        let data = data
            .chunks_exact(4)
            .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        self.record(Call::BufferData {
            target,
            data,
            usage,
        });
    }

    fn delete_buffer(&self, buffer: u32) {
        self.record(Call::DeleteBuffer(buffer));
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
        self.record(Call::VertexAttribPointer {
            index,
            size,
            data_type,
            normalized,
            stride,
            offset,
        });
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableVertexAttribArray(index));
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport {
            x,
            y,
            width,
            height,
        });
    }

    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        self.record(Call::ClearColor([red, green, blue, alpha]));
    }

    fn clear(&self, mask: u32) {
        self.record(Call::Clear(mask));
    }

    fn draw_arrays(&self, mode: u32, first: i32, count: i32) {
        self.record(Call::DrawArrays { mode, first, count });
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
