// SPDX-FileCopyrightText: 2025 Contributors to the raudio project.
// SPDX-License-Identifier: Apache-2.0

//! # raudio-sys: Raw FFI bindings to the raylib audio module
//!
//! This crate provides low-level, unsafe Rust bindings to the audio half of
//! the raylib C library (`raudio`). The shared library is resolved at runtime
//! with `libloading`, in the same shape `bindgen` emits for dynamic libraries.
//!
//! ## Overview
//!
//! `raudio-sys` exposes:
//! - `#[repr(C)]` mirrors of the raylib audio structs (`Wave`, `AudioStream`,
//!   `Sound`, `Music`) and the opaque `rAudioBuffer`/`rAudioProcessor`
//! - The [`AudioCallback`] function pointer type used by stream callbacks and
//!   audio processors
//! - [`libraylib`], the function table, with one snake_case method per C
//!   function (`InitAudioDevice` → `init_audio_device`)
//!
//! ## Usage
//!
//! **Most users should NOT use this crate directly.** Use the safe [`raudio`]
//! wrapper crate instead, which provides:
//! - RAII types for every native resource
//! - Rust-idiomatic error handling with `Result`
//! - A thread-safe bridge for audio-thread callbacks
//!
//! ## Safety
//!
//! All functions in this crate are `unsafe` and require the caller to uphold
//! raylib's invariants:
//! - The audio device must be initialized before loading sounds, music or streams
//! - Handles passed by value must not have been unloaded
//! - String pointers must be valid, NUL-terminated C strings
//! - Callbacks run on the engine's audio thread and must not unwind
//!
//! [`raudio`]: https://docs.rs/raudio

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(clippy::missing_safety_doc)]

extern crate libloading;

use std::os::raw::{c_char, c_int, c_uchar, c_uint, c_void};

/// Opaque native audio buffer owned by the engine.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct rAudioBuffer {
    _unused: [u8; 0],
}

/// Opaque node of a per-stream processor chain.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct rAudioProcessor {
    _unused: [u8; 0],
}

/// Wave, audio wave data.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct Wave {
    /// Total number of frames (considering channels)
    pub frameCount: c_uint,
    /// Frequency (samples per second)
    pub sampleRate: c_uint,
    /// Bit depth (bits per sample): 8, 16, 32 (24 not supported)
    pub sampleSize: c_uint,
    /// Number of channels (1-mono, 2-stereo, ...)
    pub channels: c_uint,
    /// Buffer data pointer
    pub data: *mut c_void,
}

impl Default for Wave {
    fn default() -> Self {
        let mut s = ::std::mem::MaybeUninit::<Self>::uninit();
        unsafe {
            ::std::ptr::write_bytes(s.as_mut_ptr(), 0, 1);
            s.assume_init()
        }
    }
}

/// AudioStream, custom audio stream.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct AudioStream {
    /// Pointer to internal data used by the audio system
    pub buffer: *mut rAudioBuffer,
    /// Pointer to internal data processor, useful for audio effects
    pub processor: *mut rAudioProcessor,
    /// Frequency (samples per second)
    pub sampleRate: c_uint,
    /// Bit depth (bits per sample): 8, 16, 32 (24 not supported)
    pub sampleSize: c_uint,
    /// Number of channels (1-mono, 2-stereo, ...)
    pub channels: c_uint,
}

impl Default for AudioStream {
    fn default() -> Self {
        let mut s = ::std::mem::MaybeUninit::<Self>::uninit();
        unsafe {
            ::std::ptr::write_bytes(s.as_mut_ptr(), 0, 1);
            s.assume_init()
        }
    }
}

/// Sound.
#[repr(C)]
#[derive(Debug, Default, Copy, Clone)]
pub struct Sound {
    /// Audio stream
    pub stream: AudioStream,
    /// Total number of frames (considering channels)
    pub frameCount: c_uint,
}

/// Music, audio stream, anything longer than ~10 seconds should be streamed.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct Music {
    /// Audio stream
    pub stream: AudioStream,
    /// Total number of frames (considering channels)
    pub frameCount: c_uint,
    /// Music looping enable
    pub looping: bool,
    /// Type of music context (audio filetype)
    pub ctxType: c_int,
    /// Audio context data, depends on type
    pub ctxData: *mut c_void,
}

impl Default for Music {
    fn default() -> Self {
        let mut s = ::std::mem::MaybeUninit::<Self>::uninit();
        unsafe {
            ::std::ptr::write_bytes(s.as_mut_ptr(), 0, 1);
            s.assume_init()
        }
    }
}

/// Raw audio callback: `void (*)(void *bufferData, unsigned int frames)`.
pub type AudioCallback =
    ::std::option::Option<unsafe extern "C" fn(bufferData: *mut c_void, frames: c_uint)>;

/// Emits the dynamic function table.
///
/// Every entry becomes a public field holding the resolved symbol and an
/// unsafe method of the same name forwarding to it.
macro_rules! dynamic_library {
    (
        $(
            $(#[$meta:meta])*
            fn $c_name:ident as $name:ident($($arg:ident: $ty:ty),*) $(-> $ret:ty)?;
        )*
    ) => {
        /// Function table of a loaded raylib shared library.
        pub struct libraylib {
            __library: ::libloading::Library,
            $(pub $name: unsafe extern "C" fn($($ty),*) $(-> $ret)?,)*
        }

        impl libraylib {
            /// Loads the shared library at `path` and resolves every symbol.
            pub unsafe fn new<P>(path: P) -> Result<Self, ::libloading::Error>
            where
                P: AsRef<::std::ffi::OsStr>,
            {
                let library = unsafe { ::libloading::Library::new(path) }?;
                unsafe { Self::from_library(library) }
            }

            /// Resolves every symbol from an already loaded library.
            pub unsafe fn from_library<L>(library: L) -> Result<Self, ::libloading::Error>
            where
                L: Into<::libloading::Library>,
            {
                let __library = library.into();
                $(
                    let $name = unsafe {
                        __library.get::<unsafe extern "C" fn($($ty),*) $(-> $ret)?>(
                            concat!(stringify!($c_name), "\0").as_bytes(),
                        )
                    }
                    .map(|sym| *sym)?;
                )*
                Ok(Self { __library, $($name),* })
            }

            $(
                $(#[$meta])*
                pub unsafe fn $name(&self, $($arg: $ty),*) $(-> $ret)? {
                    unsafe { (self.$name)($($arg),*) }
                }
            )*
        }
    };
}

dynamic_library! {
    /// Initialize audio device and context.
    fn InitAudioDevice as init_audio_device();
    /// Close the audio device and context.
    fn CloseAudioDevice as close_audio_device();
    /// Check if audio device has been initialized successfully.
    fn IsAudioDeviceReady as is_audio_device_ready() -> bool;
    /// Set master volume (listener).
    fn SetMasterVolume as set_master_volume(volume: f32);
    /// Get master volume (listener).
    fn GetMasterVolume as get_master_volume() -> f32;

    /// Load wave data from file.
    fn LoadWave as load_wave(fileName: *const c_char) -> Wave;
    /// Load wave from memory buffer, fileType refers to extension: i.e. '.wav'.
    fn LoadWaveFromMemory as load_wave_from_memory(
        fileType: *const c_char,
        fileData: *const c_uchar,
        dataSize: c_int
    ) -> Wave;
    /// Checks if wave data is valid (data loaded and parameters).
    fn IsWaveValid as is_wave_valid(wave: Wave) -> bool;
    /// Unload wave data.
    fn UnloadWave as unload_wave(wave: Wave);
    /// Export wave data to file, returns true on success.
    fn ExportWave as export_wave(wave: Wave, fileName: *const c_char) -> bool;
    /// Copy a wave to a new wave.
    fn WaveCopy as wave_copy(wave: Wave) -> Wave;
    /// Crop a wave to defined frames range.
    fn WaveCrop as wave_crop(wave: *mut Wave, initFrame: c_int, finalFrame: c_int);
    /// Convert wave data to desired format.
    fn WaveFormat as wave_format(
        wave: *mut Wave,
        sampleRate: c_int,
        sampleSize: c_int,
        channels: c_int
    );
    /// Load samples data from wave as a 32bit float data array.
    fn LoadWaveSamples as load_wave_samples(wave: Wave) -> *mut f32;
    /// Unload samples data loaded with LoadWaveSamples().
    fn UnloadWaveSamples as unload_wave_samples(samples: *mut f32);

    /// Load sound from file.
    fn LoadSound as load_sound(fileName: *const c_char) -> Sound;
    /// Load sound from wave data.
    fn LoadSoundFromWave as load_sound_from_wave(wave: Wave) -> Sound;
    /// Create a new sound that shares the same sample data as the source sound.
    fn LoadSoundAlias as load_sound_alias(source: Sound) -> Sound;
    /// Checks if a sound is valid (data loaded and buffers initialized).
    fn IsSoundValid as is_sound_valid(sound: Sound) -> bool;
    /// Update sound buffer with new data.
    fn UpdateSound as update_sound(sound: Sound, data: *const c_void, sampleCount: c_int);
    /// Unload sound.
    fn UnloadSound as unload_sound(sound: Sound);
    /// Unload a sound alias (does not deallocate sample data).
    fn UnloadSoundAlias as unload_sound_alias(alias: Sound);
    /// Play a sound.
    fn PlaySound as play_sound(sound: Sound);
    /// Stop playing a sound.
    fn StopSound as stop_sound(sound: Sound);
    /// Pause a sound.
    fn PauseSound as pause_sound(sound: Sound);
    /// Resume a paused sound.
    fn ResumeSound as resume_sound(sound: Sound);
    /// Check if a sound is currently playing.
    fn IsSoundPlaying as is_sound_playing(sound: Sound) -> bool;
    /// Set volume for a sound (1.0 is max level).
    fn SetSoundVolume as set_sound_volume(sound: Sound, volume: f32);
    /// Set pitch for a sound (1.0 is base level).
    fn SetSoundPitch as set_sound_pitch(sound: Sound, pitch: f32);
    /// Set pan for a sound (0.5 is center).
    fn SetSoundPan as set_sound_pan(sound: Sound, pan: f32);

    /// Load music stream from file.
    fn LoadMusicStream as load_music_stream(fileName: *const c_char) -> Music;
    /// Load music stream from data.
    fn LoadMusicStreamFromMemory as load_music_stream_from_memory(
        fileType: *const c_char,
        data: *const c_uchar,
        dataSize: c_int
    ) -> Music;
    /// Checks if a music stream is valid (context and buffers initialized).
    fn IsMusicValid as is_music_valid(music: Music) -> bool;
    /// Unload music stream.
    fn UnloadMusicStream as unload_music_stream(music: Music);
    /// Start music playing.
    fn PlayMusicStream as play_music_stream(music: Music);
    /// Check if music is playing.
    fn IsMusicStreamPlaying as is_music_stream_playing(music: Music) -> bool;
    /// Updates buffers for music streaming.
    fn UpdateMusicStream as update_music_stream(music: Music);
    /// Stop music playing.
    fn StopMusicStream as stop_music_stream(music: Music);
    /// Pause music playing.
    fn PauseMusicStream as pause_music_stream(music: Music);
    /// Resume playing paused music.
    fn ResumeMusicStream as resume_music_stream(music: Music);
    /// Seek music to a position (in seconds).
    fn SeekMusicStream as seek_music_stream(music: Music, position: f32);
    /// Set volume for music (1.0 is max level).
    fn SetMusicVolume as set_music_volume(music: Music, volume: f32);
    /// Set pitch for a music (1.0 is base level).
    fn SetMusicPitch as set_music_pitch(music: Music, pitch: f32);
    /// Set pan for a music (0.5 is center).
    fn SetMusicPan as set_music_pan(music: Music, pan: f32);
    /// Get music time length (in seconds).
    fn GetMusicTimeLength as get_music_time_length(music: Music) -> f32;
    /// Get current music time played (in seconds).
    fn GetMusicTimePlayed as get_music_time_played(music: Music) -> f32;

    /// Load audio stream (to stream raw audio pcm data).
    fn LoadAudioStream as load_audio_stream(
        sampleRate: c_uint,
        sampleSize: c_uint,
        channels: c_uint
    ) -> AudioStream;
    /// Checks if an audio stream is valid (buffers initialized).
    fn IsAudioStreamValid as is_audio_stream_valid(stream: AudioStream) -> bool;
    /// Unload audio stream and free memory.
    fn UnloadAudioStream as unload_audio_stream(stream: AudioStream);
    /// Update audio stream buffers with data.
    fn UpdateAudioStream as update_audio_stream(
        stream: AudioStream,
        data: *const c_void,
        frameCount: c_int
    );
    /// Check if any audio stream buffers requires refill.
    fn IsAudioStreamProcessed as is_audio_stream_processed(stream: AudioStream) -> bool;
    /// Play audio stream.
    fn PlayAudioStream as play_audio_stream(stream: AudioStream);
    /// Pause audio stream.
    fn PauseAudioStream as pause_audio_stream(stream: AudioStream);
    /// Resume audio stream.
    fn ResumeAudioStream as resume_audio_stream(stream: AudioStream);
    /// Check if audio stream is playing.
    fn IsAudioStreamPlaying as is_audio_stream_playing(stream: AudioStream) -> bool;
    /// Stop audio stream.
    fn StopAudioStream as stop_audio_stream(stream: AudioStream);
    /// Set volume for audio stream (1.0 is max level).
    fn SetAudioStreamVolume as set_audio_stream_volume(stream: AudioStream, volume: f32);
    /// Set pitch for audio stream (1.0 is base level).
    fn SetAudioStreamPitch as set_audio_stream_pitch(stream: AudioStream, pitch: f32);
    /// Set pan for audio stream (0.5 is centered).
    fn SetAudioStreamPan as set_audio_stream_pan(stream: AudioStream, pan: f32);
    /// Default size for new audio streams.
    fn SetAudioStreamBufferSizeDefault as set_audio_stream_buffer_size_default(size: c_int);
    /// Audio thread callback to request new data.
    fn SetAudioStreamCallback as set_audio_stream_callback(
        stream: AudioStream,
        callback: AudioCallback
    );

    /// Attach audio stream processor to the entire audio pipeline.
    fn AttachAudioMixedProcessor as attach_audio_mixed_processor(processor: AudioCallback);
    /// Detach audio stream processor from the entire audio pipeline.
    fn DetachAudioMixedProcessor as detach_audio_mixed_processor(processor: AudioCallback);
}
