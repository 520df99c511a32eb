use crawler_gl::RendererOptions;

/// Settings for the Android integration.
#[derive(Clone, Debug, PartialEq)]
pub struct AndroidConfig {
    /// Logcat tag.
    pub log_tag: &'static str,

    /// Messages below this level are dropped.
    pub max_log_level: log::LevelFilter,

    /// Shared object the GLES 2.0 entry points are resolved from.
    pub gles_library: &'static str,

    /// Used for `eglGetProcAddress`, for anything [`Self::gles_library`] does not export.
    pub egl_library: &'static str,

    pub renderer: RendererOptions,
}

impl Default for AndroidConfig {
    fn default() -> Self {
        Self {
            log_tag: "libCrawler",
            max_log_level: if cfg!(debug_assertions) {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Info
            },
            gles_library: "libGLESv2.so",
            egl_library: "libEGL.so",
            renderer: RendererOptions::default(),
        }
    }
}

#[test]
fn test_default_config() {
    let config = AndroidConfig::default();
    assert_eq!(config.log_tag, "libCrawler");
    assert_eq!(config.gles_library, "libGLESv2.so");
    assert_eq!(config.renderer.position_attribute, "vPosition");
}
