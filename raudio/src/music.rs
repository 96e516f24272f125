// SPDX-FileCopyrightText: 2025 Contributors to the raudio project.
// SPDX-License-Identifier: Apache-2.0

//! Streamed music.

use std::sync::Arc;

use crate::{Error, Result, device::DeviceContext};

/// A music stream decoded incrementally while it plays.
///
/// The engine does not refill music buffers by itself: call [`Music::update`]
/// regularly (once per frame of the application loop) while the music plays.
pub struct Music {
    context: Arc<DeviceContext>,
    raw: raudio_sys::Music,
    /// Encoded data the decoder reads from, for music loaded from memory.
    _data: Option<Box<[u8]>>,
}

// Safety: playback calls are serialized by the engine's audio lock.
unsafe impl Send for Music {}

impl Music {
    /// Wraps a freshly loaded stream, rejecting it if the engine reports it invalid.
    pub(crate) fn new(
        context: Arc<DeviceContext>,
        raw: raudio_sys::Music,
        data: Option<Box<[u8]>>,
    ) -> Result<Self> {
        if !unsafe { context.api.is_music_valid(raw) } {
            return Err(Error::InvalidResource("music stream"));
        }
        Ok(Self {
            context,
            raw,
            _data: data,
        })
    }

    /// Checks if the music stream is valid.
    pub fn is_valid(&self) -> bool {
        unsafe { self.context.api.is_music_valid(self.raw) }
    }

    /// Starts playing.
    pub fn play(&self) {
        unsafe { self.context.api.play_music_stream(self.raw) }
    }

    /// Checks if the music is playing.
    pub fn is_playing(&self) -> bool {
        unsafe { self.context.api.is_music_stream_playing(self.raw) }
    }

    /// Decodes the next chunk into the stream buffers that were consumed.
    pub fn update(&self) {
        unsafe { self.context.api.update_music_stream(self.raw) }
    }

    /// Stops playing and rewinds.
    pub fn stop(&self) {
        unsafe { self.context.api.stop_music_stream(self.raw) }
    }

    /// Pauses playing.
    pub fn pause(&self) {
        unsafe { self.context.api.pause_music_stream(self.raw) }
    }

    /// Resumes paused music.
    pub fn resume(&self) {
        unsafe { self.context.api.resume_music_stream(self.raw) }
    }

    /// Seeks to a position, in seconds.
    pub fn seek(&self, position: f32) {
        unsafe { self.context.api.seek_music_stream(self.raw, position) }
    }

    /// Sets the volume, 1.0 is max level.
    pub fn set_volume(&self, volume: f32) {
        unsafe { self.context.api.set_music_volume(self.raw, volume) }
    }

    /// Sets the pitch, 1.0 is base level.
    pub fn set_pitch(&self, pitch: f32) {
        unsafe { self.context.api.set_music_pitch(self.raw, pitch) }
    }

    /// Sets the pan, 0.5 is center.
    pub fn set_pan(&self, pan: f32) {
        unsafe { self.context.api.set_music_pan(self.raw, pan) }
    }

    /// Total length, in seconds.
    pub fn time_length(&self) -> f32 {
        unsafe { self.context.api.get_music_time_length(self.raw) }
    }

    /// Time played so far, in seconds.
    pub fn time_played(&self) -> f32 {
        unsafe { self.context.api.get_music_time_played(self.raw) }
    }

    /// Whether the music restarts when it reaches the end.
    pub fn looping(&self) -> bool {
        self.raw.looping
    }

    /// Enables or disables looping; read by the engine on every update.
    pub fn set_looping(&mut self, looping: bool) {
        self.raw.looping = looping;
    }

    /// Total number of frames.
    pub fn frame_count(&self) -> u32 {
        self.raw.frameCount
    }
}

impl Drop for Music {
    /// Closes the decoder and releases the stream buffers.
    fn drop(&mut self) {
        unsafe { self.context.api.unload_music_stream(self.raw) };
    }
}
