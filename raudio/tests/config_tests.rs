// SPDX-FileCopyrightText: 2025 Contributors to the raudio project.
// SPDX-License-Identifier: Apache-2.0

//! Configuration: library path resolution and stream format parsing.

use std::path::PathBuf;

use raudio::{
    StreamFormat,
    config::{RAYLIB_LIB_NAME, RAYLIB_SO_PATH_ENV, get_raylib_so_path, get_repo_root},
    load_api,
};

#[test]
fn stream_format_defaults() {
    let format: StreamFormat = serde_json::from_str("{}").unwrap();
    assert_eq!(format, StreamFormat::default());
    assert_eq!(format.sample_rate, 44100);
    assert_eq!(format.sample_size, 32);
    assert_eq!(format.channels, 2);
}

#[test]
fn stream_format_partial_fields() {
    let format: StreamFormat =
        serde_json::from_str(r#"{ "sample_rate": 48000, "channels": 1 }"#).unwrap();
    assert_eq!(
        format,
        StreamFormat {
            sample_rate: 48000,
            sample_size: 32,
            channels: 1,
        }
    );

    let json = serde_json::to_value(format).unwrap();
    assert_eq!(json["sample_size"], 32);
}

#[test]
fn stream_format_rejects_wrong_types() {
    assert!(serde_json::from_str::<StreamFormat>(r#"{ "channels": "stereo" }"#).is_err());
}

// Env manipulation stays in this single test to avoid races between tests.
#[test]
fn library_path_resolution() {
    unsafe { std::env::set_var(RAYLIB_SO_PATH_ENV, "/opt/raylib/lib/libraylib.so.550") };
    assert_eq!(
        get_raylib_so_path(),
        PathBuf::from("/opt/raylib/lib/libraylib.so.550")
    );

    // An empty override falls back to the build-time location.
    unsafe { std::env::set_var(RAYLIB_SO_PATH_ENV, "") };
    assert!(get_raylib_so_path().ends_with(RAYLIB_LIB_NAME));

    unsafe { std::env::remove_var(RAYLIB_SO_PATH_ENV) };
    assert!(get_raylib_so_path().ends_with(RAYLIB_LIB_NAME));
}

#[test]
fn repo_root_contains_the_workspace() {
    assert!(get_repo_root().join("Cargo.toml").is_file());
}

#[test]
fn loading_from_a_missing_path_fails() {
    let result = load_api("/nonexistent/libraylib.so");
    assert!(matches!(result, Err(raudio::Error::LibLoading(_))));
}
