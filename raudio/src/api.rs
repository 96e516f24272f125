// SPDX-FileCopyrightText: 2025 Contributors to the raudio project.
// SPDX-License-Identifier: Apache-2.0

//! Loading of the raylib shared library.

use std::{ffi::OsStr, sync::Arc};

use crate::{
    Result,
    bridge::{AudioHooks, RawAudioCallback},
};

/// Function table of the loaded raylib library.
pub type RaylibApi = raudio_sys::libraylib;

/// Shared handle to the loaded library, held by the device and every resource.
pub type RaylibApiHandle = Arc<RaylibApi>;

/// Loads the raylib shared library and resolves the audio functions.
///
/// # Errors
///
/// Returns [`crate::Error::LibLoading`] if the library cannot be opened or a
/// symbol is missing.
///
/// # Examples
///
/// ```no_run
/// use raudio::{config::get_raylib_so_path, load_api};
///
/// # fn main() -> Result<(), raudio::Error> {
/// let api = load_api(get_raylib_so_path())?;
/// # Ok(())
/// # }
/// ```
pub fn load_api(path: impl AsRef<OsStr>) -> Result<RaylibApiHandle> {
    let api = unsafe { RaylibApi::new(path) }?;
    Ok(Arc::new(api))
}

impl AudioHooks for RaylibApi {
    fn attach_mixed_processor(&self, hook: RawAudioCallback) {
        unsafe { self.attach_audio_mixed_processor(Some(hook)) }
    }

    fn detach_mixed_processor(&self, hook: RawAudioCallback) {
        unsafe { self.detach_audio_mixed_processor(Some(hook)) }
    }

    fn set_stream_callback(
        &self,
        stream: raudio_sys::AudioStream,
        hook: Option<RawAudioCallback>,
    ) {
        unsafe { self.set_audio_stream_callback(stream, hook) }
    }

    fn unload_stream(&self, stream: raudio_sys::AudioStream) {
        unsafe { self.unload_audio_stream(stream) }
    }

    fn close_device(&self) {
        unsafe { self.close_audio_device() }
    }
}
