//! `libCrawler.so`: the native half of `com.games.Crawler.CrawlerLib`.
//!
//! The Java side pushes GLSL source with `LoadVertexShaders` / `LoadPixelShaders`,
//! then calls `Initialize(width, height)` once and `Render()` every frame from its
//! `GLSurfaceView.Renderer`. `Shutdown()` releases the GL objects.
//!
//! The drawing itself lives in [`crawler_gl`]; this crate only adapts it to JNI:
//! it owns the per-process shader sources, the per-GL-thread renderer, loads the
//! GLES entry points and routes [`log`] output to logcat.

#![allow(non_snake_case)] // `Crawler`, and the JNI symbol names

mod config;
mod gl_loader;
mod host;
mod jni_exports;
mod logging;

pub use config::AndroidConfig;
pub use gl_loader::{GlLibrary, LoadError};
pub use host::{GlSlot, GlThread, HostError};
