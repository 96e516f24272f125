// SPDX-FileCopyrightText: 2025 Contributors to the raudio project.
// SPDX-License-Identifier: Apache-2.0

//! Smoke tests for the raw type mirrors.

use std::mem::{align_of, size_of};

/// Verifies the FFI types are accessible and zero-initialize.
#[test]
fn there_are_ffi_types() {
    let sound = raudio_sys::Sound {
        frameCount: 4096,
        ..Default::default()
    };

    assert!(sound.stream.buffer.is_null());
    assert!(sound.stream.processor.is_null());
    assert_eq!(sound.stream.sampleSize, 0);
    println!("sound: {:?}", sound);
}

/// Checks the struct layouts against the C definitions on 64-bit targets.
#[cfg(target_pointer_width = "64")]
#[test]
fn struct_layouts_match_c() {
    assert_eq!(size_of::<raudio_sys::Wave>(), 24);
    assert_eq!(size_of::<raudio_sys::AudioStream>(), 32);
    assert_eq!(size_of::<raudio_sys::Sound>(), 40);
    assert_eq!(size_of::<raudio_sys::Music>(), 56);
    assert_eq!(align_of::<raudio_sys::Music>(), 8);
}

/// A missing library surfaces as a loading error rather than a crash.
#[test]
fn loading_missing_library_fails() {
    let result = unsafe { raudio_sys::libraylib::new("libraylib-does-not-exist.so") };
    assert!(result.is_err());
}
