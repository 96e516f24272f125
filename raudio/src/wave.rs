// SPDX-FileCopyrightText: 2025 Contributors to the raudio project.
// SPDX-License-Identifier: Apache-2.0

//! Wave data held in RAM.

use std::{ops::Range, os::raw::c_int, path::Path, sync::Arc};

use crate::{
    Error, Result,
    device::{DeviceContext, c_len, path_to_cstring},
};

/// Decoded audio samples owned by the engine.
///
/// Waves are not playable by themselves; load a [`crate::Sound`] from one with
/// [`crate::AudioDevice::load_sound_from_wave`]. The native buffer is freed
/// on drop.
pub struct Wave {
    context: Arc<DeviceContext>,
    raw: raudio_sys::Wave,
}

// Safety: the engine does not tie wave data to a thread.
unsafe impl Send for Wave {}

impl Wave {
    /// Wraps a freshly loaded wave, rejecting it if the engine reports it invalid.
    pub(crate) fn new(context: Arc<DeviceContext>, raw: raudio_sys::Wave) -> Result<Self> {
        if !unsafe { context.api.is_wave_valid(raw) } {
            return Err(Error::InvalidResource("wave"));
        }
        Ok(Self { context, raw })
    }

    pub(crate) fn raw(&self) -> raudio_sys::Wave {
        self.raw
    }

    /// Total number of frames.
    pub fn frame_count(&self) -> u32 {
        self.raw.frameCount
    }

    /// Frequency in samples per second.
    pub fn sample_rate(&self) -> u32 {
        self.raw.sampleRate
    }

    /// Bits per sample: 8, 16 or 32.
    pub fn sample_size(&self) -> u32 {
        self.raw.sampleSize
    }

    /// Number of interleaved channels.
    pub fn channels(&self) -> u32 {
        self.raw.channels
    }

    /// Checks if the wave data is valid.
    pub fn is_valid(&self) -> bool {
        unsafe { self.context.api.is_wave_valid(self.raw) }
    }

    /// Exports the wave to a file; the extension selects the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine fails to write the file.
    pub fn export(&self, file_name: impl AsRef<Path>) -> Result<()> {
        let c_file_name = path_to_cstring(file_name.as_ref())?;
        if unsafe { self.context.api.export_wave(self.raw, c_file_name.as_ptr()) } {
            Ok(())
        } else {
            Err(Error::Other(format!(
                "Failed to export wave to \"{}\"",
                file_name.as_ref().display()
            )))
        }
    }

    /// Copies the wave into a new, independently owned wave.
    pub fn try_clone(&self) -> Result<Wave> {
        let raw = unsafe { self.context.api.wave_copy(self.raw) };
        Wave::new(self.context.clone(), raw)
    }

    /// Crops the wave to the given frame range.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is empty or extends past the last frame.
    pub fn crop(&mut self, frames: Range<u32>) -> Result<()> {
        if frames.is_empty() || frames.end > self.raw.frameCount {
            return Err(Error::Other(format!(
                "Invalid crop range {}..{} for a wave of {} frames",
                frames.start, frames.end, self.raw.frameCount
            )));
        }
        let init_frame = c_len(frames.start as usize)?;
        let final_frame = c_len(frames.end as usize)?;
        unsafe {
            self.context
                .api
                .wave_crop(&mut self.raw, init_frame, final_frame)
        };
        Ok(())
    }

    /// Converts the wave to the given sample rate, sample size and channel count.
    pub fn format(&mut self, sample_rate: u32, sample_size: u32, channels: u32) -> Result<()> {
        let to_c = |value: u32| {
            c_int::try_from(value)
                .map_err(|_| Error::Other(format!("Wave format value {value} is out of range")))
        };
        let (sample_rate, sample_size, channels) =
            (to_c(sample_rate)?, to_c(sample_size)?, to_c(channels)?);
        unsafe {
            self.context
                .api
                .wave_format(&mut self.raw, sample_rate, sample_size, channels)
        };
        Ok(())
    }

    /// Returns the samples converted to 32-bit float, interleaved by channel.
    ///
    /// The result holds `frame_count() * channels()` samples.
    pub fn samples(&self) -> Result<Vec<f32>> {
        let samples = unsafe { self.context.api.load_wave_samples(self.raw) };
        if samples.is_null() {
            return Err(Error::Other("Failed to load wave samples".to_string()));
        }
        let len = self.raw.frameCount as usize * self.raw.channels as usize;
        let owned = unsafe { std::slice::from_raw_parts(samples, len) }.to_vec();
        unsafe { self.context.api.unload_wave_samples(samples) };
        Ok(owned)
    }
}

impl Drop for Wave {
    /// Frees the wave's sample data.
    fn drop(&mut self) {
        if !self.raw.data.is_null() {
            unsafe { self.context.api.unload_wave(self.raw) };
        }
    }
}
