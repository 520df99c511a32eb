#![allow(unsafe_code)]

use std::ffi::{CStr, c_char, c_void};

use crawler_gl::GlowApi;

use crate::AndroidConfig;

type EglGetProcAddress = unsafe extern "C" fn(*const c_char) -> *const c_void;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("could not open {name}: {source}")]
    Library {
        name: &'static str,
        source: libloading::Error,
    },
}

/// The shared objects GL function pointers are resolved from.
///
/// Must outlive every [`GlowApi`] created by [`Self::load_gl`].
#[derive(Debug)]
pub struct GlLibrary {
    gles: libloading::Library,

    /// Keeps `egl_get_proc_address` valid.
    _egl: Option<libloading::Library>,
    egl_get_proc_address: Option<EglGetProcAddress>,
}

impl GlLibrary {
    /// Open the GLES library, and the EGL library if present.
    ///
    /// # Errors
    /// Fails if the GLES library cannot be opened.
    pub fn open(config: &AndroidConfig) -> Result<Self, LoadError> {
        // SAFETY: system GL libraries have no initialization routines with preconditions.
        let gles = unsafe { libloading::Library::new(config.gles_library) }.map_err(|source| {
            LoadError::Library {
                name: config.gles_library,
                source,
            }
        })?;

        // SAFETY: as above.
        let egl = match unsafe { libloading::Library::new(config.egl_library) } {
            Ok(egl) => Some(egl),
            Err(err) => {
                log::warn!("Could not open {}: {err}; using {} only", config.egl_library, config.gles_library);
                None
            }
        };
        let egl_get_proc_address = egl.as_ref().and_then(|egl| {
            // SAFETY: `eglGetProcAddress` has exactly this signature.
            unsafe { egl.get::<EglGetProcAddress>(b"eglGetProcAddress\0") }
                .ok()
                .map(|symbol| *symbol)
        });

        Ok(Self {
            gles,
            _egl: egl,
            egl_get_proc_address,
        })
    }

    /// Resolve every GL entry point for the context current on this thread.
    ///
    /// # Safety
    /// A GLES context must be current on the calling thread, and the returned value must only be
    /// used on this thread, while that context is current, and while `self` is alive.
    pub unsafe fn load_gl(&self) -> GlowApi {
        // SAFETY: forwarded to the caller.
        unsafe { GlowApi::from_loader_function_cstr(|name| self.get_proc_address(name)) }
    }

    fn get_proc_address(&self, name: &CStr) -> *const c_void {
        // SAFETY: the symbol is only used as an opaque address.
        let exported = unsafe { self.gles.get::<*const c_void>(name.to_bytes_with_nul()) }
            .map(|symbol| *symbol)
            .unwrap_or(std::ptr::null());
        if !exported.is_null() {
            return exported;
        }
        match self.egl_get_proc_address {
            // SAFETY: `name` is NUL-terminated and outlives the call.
            Some(get_proc_address) => unsafe { get_proc_address(name.as_ptr()) },
            None => std::ptr::null(),
        }
    }
}
