//! What the JNI entry points do, independent of JNI and of where the GL functions come from.

use crawler_gl::{GlApi, RendererError, RendererOptions, ShaderSources, TriangleRenderer};

use crate::LoadError;

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Renderer(#[from] RendererError),
}

/// Everything that lives on the GL thread.
///
/// `K` is whatever must stay alive while the renderer issues GL calls (the loaded library).
#[derive(Debug)]
pub struct GlThread<G: GlApi, K> {
    // Field order matters: the renderer releases its GL objects on drop, before `K` goes away.
    renderer: TriangleRenderer<G>,
    _keep_alive: K,
}

impl<G: GlApi, K> GlThread<G, K> {
    pub fn new(gl: G, keep_alive: K, options: RendererOptions) -> Self {
        Self {
            renderer: TriangleRenderer::new(gl, options),
            _keep_alive: keep_alive,
        }
    }

    pub fn renderer(&self) -> &TriangleRenderer<G> {
        &self.renderer
    }
}

/// Per-thread state behind the entry points.
#[derive(Debug)]
pub struct GlSlot<G: GlApi, K> {
    thread: Option<GlThread<G, K>>,

    /// Loading GL failed; [`render`] stops retrying until the next [`initialize`].
    load_failed: bool,
}

impl<G: GlApi, K> GlSlot<G, K> {
    pub const fn new() -> Self {
        Self {
            thread: None,
            load_failed: false,
        }
    }

    pub fn thread(&self) -> Option<&GlThread<G, K>> {
        self.thread.as_ref()
    }

    fn get_or_load(
        &mut self,
        load: impl FnOnce() -> Result<GlThread<G, K>, LoadError>,
    ) -> Result<&mut GlThread<G, K>, LoadError> {
        let thread = match self.thread.take() {
            Some(thread) => thread,
            None => load().inspect_err(|_| self.load_failed = true)?,
        };
        self.load_failed = false;
        Ok(self.thread.insert(thread))
    }
}

impl<G: GlApi, K> Default for GlSlot<G, K> {
    fn default() -> Self {
        Self::new()
    }
}

/// `Initialize(width, height)`.
///
/// Loads GL on first use, also retrying after an earlier failure. An already initialized
/// renderer is shut down and built again, since the host calls this whenever its surface
/// is (re)created.
///
/// # Errors
/// Fails if GL cannot be loaded or the renderer does not initialize; the renderer then only
/// clears the screen on [`render`].
pub fn initialize<G: GlApi, K>(
    slot: &mut GlSlot<G, K>,
    sources: &ShaderSources,
    width: i32,
    height: i32,
    load: impl FnOnce() -> Result<GlThread<G, K>, LoadError>,
) -> Result<(), HostError> {
    log::info!("Initialize({width}, {height})");
    let thread = slot.get_or_load(load)?;
    if thread.renderer.is_initialized() {
        log::info!("Already initialized; rebuilding the pipeline");
        thread.renderer.shutdown();
    }
    thread.renderer.initialize(sources, width, height)?;
    Ok(())
}

/// `Render()`.
///
/// Does nothing once loading GL has failed, until the next [`initialize`].
///
/// # Errors
/// Fails only if GL cannot be loaded.
pub fn render<G: GlApi, K>(
    slot: &mut GlSlot<G, K>,
    load: impl FnOnce() -> Result<GlThread<G, K>, LoadError>,
) -> Result<(), HostError> {
    if slot.load_failed {
        return Ok(());
    }
    slot.get_or_load(load)?.renderer.render_frame();
    Ok(())
}

/// `Shutdown()`: release the GL objects and forget the loaded GL functions.
pub fn shutdown<G: GlApi, K>(slot: &mut GlSlot<G, K>) {
    slot.load_failed = false;
    if let Some(mut thread) = slot.thread.take() {
        log::info!("Shutdown");
        thread.renderer.shutdown();
    }
}
