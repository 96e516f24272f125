// SPDX-FileCopyrightText: 2025 Contributors to the raudio project.
// SPDX-License-Identifier: Apache-2.0

//! Fully loaded sounds and sound aliases.

use std::{marker::PhantomData, sync::Arc};

use crate::{
    Error, Result,
    device::{DeviceContext, c_len},
    stream::whole_frames,
};

/// Playback controls shared by [`Sound`] and [`SoundAlias`].
macro_rules! sound_playback {
    () => {
        /// Plays the sound from the start.
        pub fn play(&self) {
            unsafe { self.context.api.play_sound(self.raw) }
        }

        /// Stops playing the sound.
        pub fn stop(&self) {
            unsafe { self.context.api.stop_sound(self.raw) }
        }

        /// Pauses the sound.
        pub fn pause(&self) {
            unsafe { self.context.api.pause_sound(self.raw) }
        }

        /// Resumes a paused sound.
        pub fn resume(&self) {
            unsafe { self.context.api.resume_sound(self.raw) }
        }

        /// Checks if the sound is currently playing.
        pub fn is_playing(&self) -> bool {
            unsafe { self.context.api.is_sound_playing(self.raw) }
        }

        /// Sets the volume, 1.0 is max level.
        pub fn set_volume(&self, volume: f32) {
            unsafe { self.context.api.set_sound_volume(self.raw, volume) }
        }

        /// Sets the pitch, 1.0 is base level.
        pub fn set_pitch(&self, pitch: f32) {
            unsafe { self.context.api.set_sound_pitch(self.raw, pitch) }
        }

        /// Sets the pan, 0.5 is center.
        pub fn set_pan(&self, pan: f32) {
            unsafe { self.context.api.set_sound_pan(self.raw, pan) }
        }

        /// Total number of frames.
        pub fn frame_count(&self) -> u32 {
            self.raw.frameCount
        }

        /// Checks if the sound is valid.
        pub fn is_valid(&self) -> bool {
            unsafe { self.context.api.is_sound_valid(self.raw) }
        }
    };
}

/// A sound fully loaded into an engine buffer.
///
/// Sounds are converted to the device format on load (32-bit float,
/// [`crate::config::DEVICE_CHANNELS`] channels). The buffer is released on drop.
pub struct Sound {
    context: Arc<DeviceContext>,
    raw: raudio_sys::Sound,
}

// Safety: playback calls are serialized by the engine's audio lock.
unsafe impl Send for Sound {}

impl Sound {
    /// Wraps a freshly loaded sound, rejecting it if the engine reports it invalid.
    pub(crate) fn new(context: Arc<DeviceContext>, raw: raudio_sys::Sound) -> Result<Self> {
        if !unsafe { context.api.is_sound_valid(raw) } {
            return Err(Error::InvalidResource("sound"));
        }
        Ok(Self { context, raw })
    }

    sound_playback!();

    /// Creates an alias sharing this sound's sample data.
    ///
    /// Aliases play independently (own volume, pitch and position) but do not
    /// own the samples, so they borrow the source sound.
    pub fn alias(&self) -> Result<SoundAlias<'_>> {
        let raw = unsafe { self.context.api.load_sound_alias(self.raw) };
        if !unsafe { self.context.api.is_sound_valid(raw) } {
            return Err(Error::InvalidResource("sound alias"));
        }
        Ok(SoundAlias {
            context: self.context.clone(),
            raw,
            phantom: PhantomData,
        })
    }

    /// Replaces the start of the sound buffer with `data`.
    ///
    /// `data` holds interleaved 32-bit float samples in the sound's channel
    /// layout; the number of frames written is `data.len() / channels`.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedSampleSize`] if the buffer is not 32-bit float
    /// - [`Error::Other`] if `data` holds more frames than the sound, or ends
    ///   with a partial frame
    pub fn update(&self, data: &[f32]) -> Result<()> {
        let stream = self.raw.stream;
        if stream.sampleSize != 32 {
            return Err(Error::UnsupportedSampleSize(stream.sampleSize));
        }
        let frames = whole_frames(data.len(), stream.channels)?;
        if frames > self.raw.frameCount as usize {
            return Err(Error::Other(format!(
                "Update of {frames} frames exceeds sound length of {} frames",
                self.raw.frameCount
            )));
        }
        let frames = c_len(frames)?;
        unsafe {
            self.context
                .api
                .update_sound(self.raw, data.as_ptr().cast(), frames)
        };
        Ok(())
    }
}

impl Drop for Sound {
    /// Releases the sound buffer.
    fn drop(&mut self) {
        unsafe { self.context.api.unload_sound(self.raw) };
    }
}

/// A sound sharing the sample data of a source [`Sound`].
pub struct SoundAlias<'a> {
    context: Arc<DeviceContext>,
    raw: raudio_sys::Sound,
    phantom: PhantomData<&'a Sound>,
}

impl SoundAlias<'_> {
    sound_playback!();
}

impl Drop for SoundAlias<'_> {
    /// Releases the alias without touching the shared sample data.
    fn drop(&mut self) {
        unsafe { self.context.api.unload_sound_alias(self.raw) };
    }
}
