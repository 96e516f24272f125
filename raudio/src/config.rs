// SPDX-FileCopyrightText: 2025 Contributors to the raudio project.
// SPDX-License-Identifier: Apache-2.0

//! Build-time configuration and path resolution for the raylib library.
//!
//! This module provides helper functions to locate the raylib shared library
//! and the constants that size the callback bridge.

use std::path::PathBuf;

// Build script generates constants.rs with RAYLIB_REPO_ROOT and RAYLIB_LIB_DIR
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

/// Environment variable that overrides the library path at runtime.
pub const RAYLIB_SO_PATH_ENV: &str = "RAYLIB_SO_PATH";

/// Number of interleaved channels in the buffer handed to mixed processors.
///
/// raylib mixes every playing stream into a 32-bit float stereo buffer.
pub const DEVICE_CHANNELS: usize = 2;

/// Number of streams that can have a data callback bound at the same time.
pub const STREAM_SLOT_COUNT: usize = 8;

/// Platform file name of the raylib shared library.
#[cfg(target_os = "windows")]
pub const RAYLIB_LIB_NAME: &str = "raylib.dll";
/// Platform file name of the raylib shared library.
#[cfg(target_os = "macos")]
pub const RAYLIB_LIB_NAME: &str = "libraylib.dylib";
/// Platform file name of the raylib shared library.
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub const RAYLIB_LIB_NAME: &str = "libraylib.so";

/// Returns the path to the raylib shared library.
///
/// Resolution order:
/// 1. `RAYLIB_SO_PATH` in the environment at runtime
/// 2. `RAYLIB_LIB_DIR` at build time, joined with [`RAYLIB_LIB_NAME`]
/// 3. The bare library name, left to the system loader's search path
///
/// # Examples
///
/// ```no_run
/// use raudio::config::get_raylib_so_path;
/// use raudio::load_api;
///
/// # fn main() -> Result<(), raudio::Error> {
/// let api = load_api(get_raylib_so_path())?;
/// # Ok(())
/// # }
/// ```
pub fn get_raylib_so_path() -> PathBuf {
    if let Some(path) = std::env::var_os(RAYLIB_SO_PATH_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    resolve_lib_path(RAYLIB_LIB_DIR)
}

fn resolve_lib_path(lib_dir: &str) -> PathBuf {
    if lib_dir.is_empty() {
        PathBuf::from(RAYLIB_LIB_NAME)
    } else {
        PathBuf::from(lib_dir).join(RAYLIB_LIB_NAME)
    }
}

/// Returns the root directory of the workspace.
///
/// Used by examples and tests to locate resources relative to the repository.
pub fn get_repo_root() -> PathBuf {
    PathBuf::from(RAYLIB_REPO_ROOT)
}
