//! The `native` methods of `com.games.Crawler.CrawlerLib`.
//!
//! Nothing here ever throws into Java: failures are logged and the call returns.

#![allow(unsafe_code)] // `#[unsafe(no_mangle)]`

use std::cell::RefCell;

use crawler_gl::{GlowApi, ShaderSources, ShaderStage};
use jni::{
    JNIEnv,
    objects::{JClass, JString},
    sys::jint,
};

use crate::{AndroidConfig, GlLibrary, GlSlot, GlThread, LoadError, host, logging};

/// Sources pushed by `LoadVertexShaders` / `LoadPixelShaders`, from any thread.
static SHADER_SOURCES: parking_lot::Mutex<ShaderSources> =
    parking_lot::const_mutex(ShaderSources::new());

thread_local! {
    /// The GL context is only current on the `GLSurfaceView` render thread.
    static GL_THREAD: RefCell<GlSlot<GlowApi, GlLibrary>> = const { RefCell::new(GlSlot::new()) };
}

fn config() -> AndroidConfig {
    let config = AndroidConfig::default();
    logging::init(&config);
    config
}

fn load_gl(config: &AndroidConfig) -> Result<GlThread<GlowApi, GlLibrary>, LoadError> {
    let library = GlLibrary::open(config)?;
    // SAFETY: only called from the render thread, where `GLSurfaceView` keeps its context
    // current. `GlThread` keeps `library` alive as long as the function pointers.
    let gl = unsafe { library.load_gl() };
    Ok(GlThread::new(gl, library, config.renderer.clone()))
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_games_Crawler_CrawlerLib_Initialize(
    _env: JNIEnv<'_>,
    _class: JClass<'_>,
    width: jint,
    height: jint,
) {
    let config = config();
    let sources = SHADER_SOURCES.lock().clone();
    GL_THREAD.with_borrow_mut(|slot| {
        if let Err(err) = host::initialize(slot, &sources, width, height, || load_gl(&config)) {
            log::error!("Initialize failed: {err}");
        }
    });
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_games_Crawler_CrawlerLib_Render(
    _env: JNIEnv<'_>,
    _class: JClass<'_>,
) {
    let config = config();
    GL_THREAD.with_borrow_mut(|slot| {
        if let Err(err) = host::render(slot, || load_gl(&config)) {
            log::error!("Render failed: {err}");
        }
    });
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_games_Crawler_CrawlerLib_LoadVertexShaders(
    mut env: JNIEnv<'_>,
    _class: JClass<'_>,
    source: JString<'_>,
) {
    load_shader(&mut env, &source, ShaderStage::Vertex);
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_games_Crawler_CrawlerLib_LoadPixelShaders(
    mut env: JNIEnv<'_>,
    _class: JClass<'_>,
    source: JString<'_>,
) {
    load_shader(&mut env, &source, ShaderStage::Fragment);
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_games_Crawler_CrawlerLib_Shutdown(
    _env: JNIEnv<'_>,
    _class: JClass<'_>,
) {
    config();
    GL_THREAD.with_borrow_mut(host::shutdown);
}

fn load_shader(env: &mut JNIEnv<'_>, source: &JString<'_>, stage: ShaderStage) {
    config();
    match env.get_string(source) {
        Ok(source) => {
            let source = String::from(source);
            SHADER_SOURCES.lock().add_source(stage, source);
        }
        Err(err) => log::error!("Could not read the {stage} shader source: {err}"),
    }
}
