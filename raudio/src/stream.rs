// SPDX-FileCopyrightText: 2025 Contributors to the raudio project.
// SPDX-License-Identifier: Apache-2.0

//! Raw PCM audio streams.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    AudioCallback, Error, Result,
    bridge::AudioBridge,
    device::{DeviceContext, c_len},
};

/// Sample layout of a raw audio stream.
///
/// Missing fields deserialize to the defaults: 44100 Hz, 32-bit float, stereo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamFormat {
    /// Frequency in samples per second.
    pub sample_rate: u32,
    /// Bits per sample: 8, 16 or 32 (32 is float).
    pub sample_size: u32,
    /// Number of interleaved channels.
    pub channels: u32,
}

impl Default for StreamFormat {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            sample_size: 32,
            channels: 2,
        }
    }
}

/// Sample types accepted by [`AudioStream::update`].
pub trait StreamSample: Copy {
    /// Bit depth the stream must be created with.
    const BITS: u32;
}

impl StreamSample for u8 {
    const BITS: u32 = 8;
}

impl StreamSample for i16 {
    const BITS: u32 = 16;
}

impl StreamSample for f32 {
    const BITS: u32 = 32;
}

/// Number of whole frames in `len` interleaved samples.
///
/// # Errors
///
/// - [`Error::InvalidResource`] if `channels` is zero
/// - [`Error::Other`] if `len` ends with a partial frame
pub(crate) fn whole_frames(len: usize, channels: u32) -> Result<usize> {
    let channels = channels as usize;
    if channels == 0 {
        return Err(Error::InvalidResource("audio stream"));
    }
    if len % channels != 0 {
        return Err(Error::Other(format!(
            "{len} samples do not divide into frames of {channels} channels"
        )));
    }
    Ok(len / channels)
}

/// A raw audio stream.
///
/// Fed either by pushing samples with [`AudioStream::update`] whenever
/// [`AudioStream::is_processed`] reports a drained buffer, or by a callback
/// bound with [`AudioStream::set_callback`] that the engine calls from its
/// audio thread.
pub struct AudioStream {
    context: Arc<DeviceContext>,
    raw: raudio_sys::AudioStream,
}

// Safety: stream calls are serialized by the engine's audio lock.
unsafe impl Send for AudioStream {}

impl AudioStream {
    /// Wraps a freshly loaded stream, rejecting it if the engine reports it invalid.
    pub(crate) fn new(context: Arc<DeviceContext>, raw: raudio_sys::AudioStream) -> Result<Self> {
        if !unsafe { context.api.is_audio_stream_valid(raw) } {
            return Err(Error::InvalidResource("audio stream"));
        }
        Ok(Self { context, raw })
    }

    /// The stream's sample layout.
    pub fn format(&self) -> StreamFormat {
        StreamFormat {
            sample_rate: self.raw.sampleRate,
            sample_size: self.raw.sampleSize,
            channels: self.raw.channels,
        }
    }

    /// Checks if the stream buffers are initialized.
    pub fn is_valid(&self) -> bool {
        unsafe { self.context.api.is_audio_stream_valid(self.raw) }
    }

    /// Pushes interleaved samples into the stream's free buffer.
    ///
    /// The number of frames is `data.len() / channels`.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedSampleSize`] if `S` does not match the stream's
    ///   sample size
    /// - [`Error::Other`] if `data` ends with a partial frame
    pub fn update<S: StreamSample>(&self, data: &[S]) -> Result<()> {
        if S::BITS != self.raw.sampleSize {
            return Err(Error::UnsupportedSampleSize(S::BITS));
        }
        let frames = c_len(whole_frames(data.len(), self.raw.channels)?)?;
        unsafe {
            self.context
                .api
                .update_audio_stream(self.raw, data.as_ptr().cast(), frames)
        };
        Ok(())
    }

    /// Checks if any stream buffer needs a refill.
    pub fn is_processed(&self) -> bool {
        unsafe { self.context.api.is_audio_stream_processed(self.raw) }
    }

    /// Starts playing.
    pub fn play(&self) {
        unsafe { self.context.api.play_audio_stream(self.raw) }
    }

    /// Pauses playing.
    pub fn pause(&self) {
        unsafe { self.context.api.pause_audio_stream(self.raw) }
    }

    /// Resumes a paused stream.
    pub fn resume(&self) {
        unsafe { self.context.api.resume_audio_stream(self.raw) }
    }

    /// Checks if the stream is playing.
    pub fn is_playing(&self) -> bool {
        unsafe { self.context.api.is_audio_stream_playing(self.raw) }
    }

    /// Stops playing.
    pub fn stop(&self) {
        unsafe { self.context.api.stop_audio_stream(self.raw) }
    }

    /// Sets the volume, 1.0 is max level.
    pub fn set_volume(&self, volume: f32) {
        unsafe { self.context.api.set_audio_stream_volume(self.raw, volume) }
    }

    /// Sets the pitch, 1.0 is base level.
    pub fn set_pitch(&self, pitch: f32) {
        unsafe { self.context.api.set_audio_stream_pitch(self.raw, pitch) }
    }

    /// Sets the pan, 0.5 is centered.
    pub fn set_pan(&self, pan: f32) {
        unsafe { self.context.api.set_audio_stream_pan(self.raw, pan) }
    }

    /// Binds `callback` as the stream's data source, or clears it with `None`.
    ///
    /// The callback is called on the audio thread with the buffer to fill and
    /// the number of frames requested. Binding again replaces the previous
    /// callback; the audio thread never sees a partially replaced one.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedSampleSize`] if the stream is not 32-bit float
    /// - [`Error::InvalidResource`] if the stream has no channels
    /// - [`Error::StreamSlotsExhausted`] if too many streams have callbacks
    pub fn set_callback(&self, callback: Option<AudioCallback>) -> Result<()> {
        AudioBridge::global().set_stream_callback(&*self.context.api, self.raw, callback)
    }
}

impl Drop for AudioStream {
    /// Releases the callback slot, then the stream buffers.
    fn drop(&mut self) {
        AudioBridge::global().unload_stream(&*self.context.api, self.raw);
    }
}
