// SPDX-FileCopyrightText: 2025 Contributors to the raudio project.
// SPDX-License-Identifier: Apache-2.0

//! Error types for raudio operations.
//!
//! raylib's audio functions do not report status codes; failures show up as
//! invalid handles. This module maps those conditions, and the Rust-level
//! failures of the binding itself, to an idiomatic error enum.

/// Convenience result type using [`Error`] as the error variant.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur when using the raudio API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An audio device is already open in this process.
    #[error("Audio device already open")]
    DeviceAlreadyOpen,

    /// The engine did not report the audio device as ready after initialization.
    #[error("Audio device failed to initialize")]
    DeviceInitFailed,

    /// The device cannot be closed explicitly while resources still hold it.
    #[error("Audio device is still in use")]
    DeviceInUse,

    /// A load call returned a handle that failed the engine's validity check.
    #[error("Invalid {0}: resource could not be loaded")]
    InvalidResource(&'static str),

    /// Stream callbacks exchange 32-bit float samples only.
    #[error("Unsupported sample size: {0} bits, 32-bit float required")]
    UnsupportedSampleSize(u32),

    /// Every stream callback slot is bound to another stream.
    #[error("No free stream callback slot ({0} in use)")]
    StreamSlotsExhausted(usize),

    /// A generic error for Rust-level failures not covered by other variants.
    #[error("Other error: {0}")]
    Other(String),

    /// Failed to convert a Rust string to a C-compatible null-terminated string.
    #[error("Null string: {0}")]
    NulString(#[from] std::ffi::NulError),

    /// Failed to load or interact with the raylib dynamic library.
    #[error("Loading library: {0}")]
    LibLoading(#[from] libloading::Error),
}
