// SPDX-FileCopyrightText: 2025 Contributors to the raudio project.
// SPDX-License-Identifier: Apache-2.0

//! # raudio - raylib audio for Rust
//!
//! Safe, idiomatic Rust bindings for the audio module of the raylib C library:
//! device management, sounds, music streams, raw PCM streams, and callbacks
//! running on the engine's audio thread.
//!
//! ## Overview
//!
//! All decoding, resampling and mixing happens inside raylib. This crate wraps
//! the raw function table ([`raudio_sys`]) with RAII resource types and
//! bridges the engine's audio thread back into Rust closures.
//!
//! ### Key Concepts
//!
//! - **Device**: The engine's audio context ([`AudioDevice`])
//! - **Wave**: Decoded samples in RAM ([`Wave`])
//! - **Sound**: A short clip fully loaded into an engine buffer ([`Sound`], [`SoundAlias`])
//! - **Music**: A long clip decoded while it plays ([`Music`])
//! - **Audio stream**: Raw PCM fed by the application ([`AudioStream`])
//! - **Mixed processor**: A callback run over the final mix ([`AudioDevice::attach_mixed_processor`])
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐
//! │ AudioDevice │  (owns the engine's audio context)
//! └──────┬──────┘
//!        │
//!        ├─► Wave ──► Sound ──► SoundAlias
//!        ├─► Music
//!        ├─► AudioStream ──► stream callback ─┐
//!        │                                    ├─► AudioBridge ◄── audio thread
//!        └─► mixed processors ────────────────┘
//! ```
//!
//! ## Examples
//!
//! ### Producing samples from a stream callback
//!
//! ```no_run
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use raudio::{AudioDevice, StreamFormat, audio_callback, config::get_raylib_so_path, load_api};
//!
//! # fn main() -> Result<(), raudio::Error> {
//! let device = AudioDevice::open(load_api(get_raylib_so_path())?)?;
//! let stream = device.load_audio_stream(StreamFormat { channels: 1, ..Default::default() })?;
//!
//! let phase = AtomicU32::new(0);
//! stream.set_callback(Some(audio_callback(move |samples, _frames| {
//!     for sample in samples.iter_mut() {
//!         let t = phase.fetch_add(1, Ordering::Relaxed) as f32 / 44100.0;
//!         *sample = (t * 440.0 * std::f32::consts::TAU).sin();
//!     }
//! })))?;
//! stream.play();
//! # Ok(())
//! # }
//! ```
//!
//! ## Thread Safety
//!
//! - [`AudioDevice`] is `Send + Sync` and can be shared across threads
//! - Owned resources are `Send` but not `Sync`; a [`SoundAlias`] borrows its source
//! - Callbacks are `Send + Sync` and run on the engine's audio thread; they
//!   must not block, must not register or remove callbacks, and must not
//!   panic (a panic aborts the process)

mod api;
mod device;
mod error;
mod music;
mod sound;
mod stream;
mod wave;

pub mod bridge;
pub mod config;

pub use api::{RaylibApi, RaylibApiHandle, load_api};
pub use bridge::{AudioBridge, AudioCallback, AudioHooks, ProcessorId, audio_callback};
pub use device::AudioDevice;
pub use error::{Error, Result};
pub use music::Music;
pub use sound::{Sound, SoundAlias};
pub use stream::{AudioStream, StreamFormat, StreamSample};
pub use wave::Wave;
