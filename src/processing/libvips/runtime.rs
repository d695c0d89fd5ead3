// src/processing/libvips/runtime.rs

//! Process-wide libvips lifecycle.
//!
//! The host calls [`init_codec`] once before the first conversion. The runtime
//! is never shut down: `VipsApp` lives in a static for the rest of the process.

use std::sync::Mutex;
use lazy_static::lazy_static;
use tracing::debug;

use crate::utils::{ConverterError, ConverterResult};

/// Owner of the libvips `VipsApp`.
///
/// # Safety
/// libvips is designed for concurrent multi-threaded use. Operations on
/// separate `VipsImage` instances from different threads are safe.
struct VipsAppGuard {
    app: libvips::VipsApp,
    version: String,
}

// libvips is designed for concurrent use; individual VipsImage instances must
// not be shared between threads, but concurrent creation on separate threads is safe.
unsafe impl Send for VipsAppGuard {}

lazy_static! {
    static ref VIPS: Mutex<Option<VipsAppGuard>> = Mutex::new(None);
}

/// Initializes libvips (and with it the HEIF loader). Safe to call repeatedly.
pub fn init_codec() -> ConverterResult<()> {
    let mut slot = VIPS
        .lock()
        .map_err(|_| ConverterError::Init("codec runtime lock poisoned".to_string()))?;

    if slot.is_some() {
        return Ok(());
    }

    let app = libvips::VipsApp::default("heic-converter")
        .map_err(|e| ConverterError::Init(format!("{e}")))?;
    // 0 = let libvips decide based on available CPU cores
    app.concurrency_set(0);
    let version = app.version_string().unwrap_or("unknown").to_string();
    debug!("libvips {} initialized (concurrency: {})", version, app.concurency_get());

    *slot = Some(VipsAppGuard { app, version });
    Ok(())
}

/// Whether [`init_codec`] has completed successfully.
pub fn is_initialized() -> bool {
    VIPS.lock().map(|slot| slot.is_some()).unwrap_or(false)
}

/// libvips version string, once initialized.
pub fn codec_version() -> Option<String> {
    VIPS.lock()
        .ok()
        .and_then(|slot| slot.as_ref().map(|guard| guard.version.clone()))
}

/// Takes the pending libvips error message, clearing the buffer.
///
/// The bindings only return a generic error per operation; the codec's own
/// text is kept in this buffer.
pub fn take_error() -> Option<String> {
    let slot = VIPS.lock().ok()?;
    let guard = slot.as_ref()?;

    let message = guard
        .app
        .error_buffer()
        .ok()
        .map(|buf| buf.trim().to_string())
        .filter(|buf| !buf.is_empty());
    guard.app.error_clear();
    message
}
