// SPDX-FileCopyrightText: 2025 Contributors to the raudio project.
// SPDX-License-Identifier: Apache-2.0

//! Audio device management.
//!
//! This module provides [`AudioDevice`], the main entry point of the crate. The
//! device owns the engine's audio context; every resource loaded through it
//! keeps the context alive, and the context is closed when the last reference
//! is dropped.

use std::{
    ffi::CString,
    os::raw::c_int,
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use crate::{
    AudioCallback, AudioStream, Error, Music, ProcessorId, Result, Sound, StreamFormat, Wave,
    api::RaylibApiHandle, bridge::AudioBridge,
};

/// raylib keeps a single audio context per process.
static DEVICE_OPEN: AtomicBool = AtomicBool::new(false);

/// Internal shared context for an open audio device.
///
/// Separated from [`AudioDevice`] so resources can hold the device open after
/// the device handle itself has been dropped.
pub(crate) struct DeviceContext {
    pub(crate) api: RaylibApiHandle,
}

impl Drop for DeviceContext {
    /// Detaches every bridge hook, then closes the engine's audio device.
    fn drop(&mut self) {
        AudioBridge::global().close_device(&*self.api);
        DEVICE_OPEN.store(false, Ordering::Release);
        tracing::debug!("Closed audio device");
    }
}

/// Converts a file path to a C string for the engine.
pub(crate) fn path_to_cstring(path: &Path) -> Result<CString> {
    let path = path
        .to_str()
        .ok_or_else(|| Error::Other(format!("Path is not valid UTF-8: {}", path.display())))?;
    Ok(CString::new(path)?)
}

/// Converts a byte length to the engine's `int` size argument.
pub(crate) fn c_len(len: usize) -> Result<c_int> {
    c_int::try_from(len).map_err(|_| Error::Other(format!("Length {len} exceeds the C int range")))
}

/// An open audio device.
///
/// Opening the device initializes raylib's audio context (miniaudio device,
/// mixer and audio thread). The handle is cheaply cloneable; the context is
/// closed when the last clone and the last resource loaded through it are
/// dropped. Before closing, every mixed processor and stream callback is
/// detached so no trampoline runs against a closing device.
///
/// # Examples
///
/// ```no_run
/// use raudio::{AudioDevice, audio_callback, config::get_raylib_so_path, load_api};
///
/// # fn main() -> Result<(), raudio::Error> {
/// let device = AudioDevice::open(load_api(get_raylib_so_path())?)?;
///
/// // Halve the volume of everything the engine mixes
/// let attenuate = audio_callback(|samples, _frames| {
///     samples.iter_mut().for_each(|s| *s *= 0.5);
/// });
/// device.attach_mixed_processor(attenuate.clone());
///
/// let music = device.load_music_stream("resources/country.mp3")?;
/// music.play();
///
/// device.detach_mixed_processor(&attenuate);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AudioDevice {
    context: Arc<DeviceContext>,
}

impl AudioDevice {
    /// Initializes the audio device.
    ///
    /// # Errors
    ///
    /// - [`Error::DeviceAlreadyOpen`] if a device is already open in this process
    /// - [`Error::DeviceInitFailed`] if the engine does not report the device ready
    pub fn open(api: RaylibApiHandle) -> Result<Self> {
        if DEVICE_OPEN
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(Error::DeviceAlreadyOpen);
        }

        unsafe { api.init_audio_device() };
        if !unsafe { api.is_audio_device_ready() } {
            DEVICE_OPEN.store(false, Ordering::Release);
            return Err(Error::DeviceInitFailed);
        }
        tracing::debug!("Opened audio device");

        Ok(Self {
            context: Arc::new(DeviceContext { api }),
        })
    }

    /// Checks if the audio device is initialized.
    pub fn is_ready(&self) -> bool {
        unsafe { self.context.api.is_audio_device_ready() }
    }

    /// Sets the master volume (listener), 1.0 is max level.
    pub fn set_master_volume(&self, volume: f32) {
        unsafe { self.context.api.set_master_volume(volume) }
    }

    /// Returns the master volume (listener).
    pub fn master_volume(&self) -> f32 {
        unsafe { self.context.api.get_master_volume() }
    }

    /// Sets the buffer size, in frames, of audio streams loaded afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if `frames` does not fit the engine's `int` argument.
    pub fn set_stream_buffer_size_default(&self, frames: usize) -> Result<()> {
        let frames = c_len(frames)?;
        unsafe { self.context.api.set_audio_stream_buffer_size_default(frames) };
        Ok(())
    }

    /// Appends `callback` to the processors run over the final mix.
    ///
    /// Processors run in attachment order on the audio thread, each over the
    /// output of the previous one. The buffer holds
    /// [`crate::config::DEVICE_CHANNELS`] interleaved channels.
    pub fn attach_mixed_processor(&self, callback: AudioCallback) -> ProcessorId {
        AudioBridge::global().attach_mixed_processor(&*self.context.api, callback)
    }

    /// Removes the most recently attached processor that is `callback`.
    ///
    /// Returns `false` if `callback` is not attached.
    pub fn detach_mixed_processor(&self, callback: &AudioCallback) -> bool {
        AudioBridge::global().detach_mixed_processor(&*self.context.api, callback)
    }

    /// Removes the processor registered under `id`.
    pub fn remove_mixed_processor(&self, id: ProcessorId) -> bool {
        AudioBridge::global().remove_mixed_processor(&*self.context.api, id)
    }

    /// Loads wave data from a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidResource`] if the file cannot be decoded.
    pub fn load_wave(&self, file_name: impl AsRef<Path>) -> Result<Wave> {
        let file_name = path_to_cstring(file_name.as_ref())?;
        let raw = unsafe { self.context.api.load_wave(file_name.as_ptr()) };
        Wave::new(self.context.clone(), raw)
    }

    /// Loads wave data from an encoded buffer.
    ///
    /// `file_type` is the file extension the data would have, i.e. `".wav"`.
    pub fn load_wave_from_memory(&self, file_type: &str, data: &[u8]) -> Result<Wave> {
        let file_type = CString::new(file_type)?;
        let size = c_len(data.len())?;
        let raw = unsafe {
            self.context
                .api
                .load_wave_from_memory(file_type.as_ptr(), data.as_ptr(), size)
        };
        Wave::new(self.context.clone(), raw)
    }

    /// Loads a sound from a file.
    pub fn load_sound(&self, file_name: impl AsRef<Path>) -> Result<Sound> {
        let file_name = path_to_cstring(file_name.as_ref())?;
        let raw = unsafe { self.context.api.load_sound(file_name.as_ptr()) };
        Sound::new(self.context.clone(), raw)
    }

    /// Loads a sound from wave data. The wave can be dropped afterwards.
    pub fn load_sound_from_wave(&self, wave: &Wave) -> Result<Sound> {
        let raw = unsafe { self.context.api.load_sound_from_wave(wave.raw()) };
        Sound::new(self.context.clone(), raw)
    }

    /// Opens a music stream from a file.
    pub fn load_music_stream(&self, file_name: impl AsRef<Path>) -> Result<Music> {
        let file_name = path_to_cstring(file_name.as_ref())?;
        let raw = unsafe { self.context.api.load_music_stream(file_name.as_ptr()) };
        Music::new(self.context.clone(), raw, None)
    }

    /// Opens a music stream from an encoded buffer.
    ///
    /// The engine decodes lazily from the buffer, so the returned [`Music`]
    /// keeps its own copy of `data`.
    pub fn load_music_stream_from_memory(&self, file_type: &str, data: &[u8]) -> Result<Music> {
        let file_type = CString::new(file_type)?;
        let data: Box<[u8]> = data.into();
        let size = c_len(data.len())?;
        let raw = unsafe {
            self.context
                .api
                .load_music_stream_from_memory(file_type.as_ptr(), data.as_ptr(), size)
        };
        Music::new(self.context.clone(), raw, Some(data))
    }

    /// Creates a raw audio stream fed by [`AudioStream::update`] or a callback.
    pub fn load_audio_stream(&self, format: StreamFormat) -> Result<AudioStream> {
        let raw = unsafe {
            self.context.api.load_audio_stream(
                format.sample_rate,
                format.sample_size,
                format.channels,
            )
        };
        AudioStream::new(self.context.clone(), raw)
    }

    /// Closes the device explicitly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceInUse`] while clones of this handle or loaded
    /// resources still reference the device.
    pub fn close(self) -> Result<()> {
        let context = Arc::into_inner(self.context).ok_or(Error::DeviceInUse)?;
        drop(context);
        Ok(())
    }
}
