//! A tiny OpenGL ES 2.0 pipeline that compiles host-supplied GLSL and draws one triangle.
//!
//! The main types you want to look at are [`TriangleRenderer`], which owns the whole pipeline,
//! and [`ShaderSources`], which collects the shader text handed over by the host.
//!
//! All GL access goes through the [`GlApi`] trait. [`GlowApi`] implements it on top of
//! [`glow`], and tests can implement it with a fake driver.
//!
//! ```no_run
//! # fn demo(gl: crawler_gl::GlowApi) -> Result<(), crawler_gl::RendererError> {
//! use crawler_gl::{RendererOptions, ShaderSources, TriangleRenderer};
//!
//! let mut sources = ShaderSources::default();
//! sources.add_vertex_source("attribute vec4 vPosition; void main() { gl_Position = vPosition; }");
//! sources.add_fragment_source("void main() { gl_FragColor = vec4(0.0, 1.0, 0.0, 1.0); }");
//!
//! let mut renderer = TriangleRenderer::new(gl, RendererOptions::default());
//! renderer.initialize(&sources, 1280, 720)?;
//! renderer.render_frame();
//! renderer.shutdown();
//! # Ok(()) }
//! ```

mod error;
mod gl_api;
mod program;
mod renderer;
mod shader_version;
mod sources;

pub use glow;

pub use error::{RendererError, ShaderError};
pub use gl_api::{GlApi, GlowApi};
pub use program::ShaderProgram;
pub use renderer::{DriverInfo, RendererOptions, TRIANGLE_VERTICES, TriangleRenderer};
pub use shader_version::ShaderVersion;
pub use sources::{ShaderSources, ShaderStage};

/// Drain the GL error queue and report every error using `log::error`.
///
/// Always active, also in release builds.
///
/// ``` no_run
/// # fn demo(gl: &crawler_gl::GlowApi) {
/// use crawler_gl::check_for_gl_error;
/// check_for_gl_error!(gl);
/// check_for_gl_error!(gl, "glDrawArrays");
/// # }
/// ```
#[macro_export]
macro_rules! check_for_gl_error {
    ($gl: expr) => {{ $crate::check_for_gl_error_impl($gl, file!(), line!(), "") }};
    ($gl: expr, $context: literal) => {{ $crate::check_for_gl_error_impl($gl, file!(), line!(), $context) }};
}

/// A lost context may report the same error forever.
const MAX_ERRORS_PER_CHECK: usize = 16;

/// Returns the number of errors that were pending.
#[doc(hidden)]
pub fn check_for_gl_error_impl<G: GlApi + ?Sized>(
    gl: &G,
    file: &str,
    line: u32,
    context: &str,
) -> usize {
    let mut count = 0;
    while count < MAX_ERRORS_PER_CHECK {
        let error_code = gl.get_error();
        if error_code == glow::NO_ERROR {
            break;
        }
        count += 1;

        let error_str = gl_error_name(error_code);
        if context.is_empty() {
            log::error!("GL error, at {file}:{line}: {error_str} (0x{error_code:X})");
        } else {
            log::error!("GL error, at {file}:{line} after {context}(): {error_str} (0x{error_code:X})");
        }
    }
    count
}

/// Symbolic name of a `glGetError` code.
pub fn gl_error_name(error_code: u32) -> &'static str {
    match error_code {
        glow::NO_ERROR => "GL_NO_ERROR",
        glow::INVALID_ENUM => "GL_INVALID_ENUM",
        glow::INVALID_VALUE => "GL_INVALID_VALUE",
        glow::INVALID_OPERATION => "GL_INVALID_OPERATION",
        glow::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        glow::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        glow::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        glow::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        glow::CONTEXT_LOST => "GL_CONTEXT_LOST",
        _ => "<unknown>",
    }
}

#[test]
fn test_gl_error_name() {
    assert_eq!(gl_error_name(0x0500), "GL_INVALID_ENUM");
    assert_eq!(gl_error_name(0x0502), "GL_INVALID_OPERATION");
    assert_eq!(gl_error_name(0x0505), "GL_OUT_OF_MEMORY");
    assert_eq!(gl_error_name(0x1234), "<unknown>");
}
