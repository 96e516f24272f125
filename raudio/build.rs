// SPDX-FileCopyrightText: 2025 Contributors to the raudio project.
// SPDX-License-Identifier: Apache-2.0

//! Build script for the `raudio` crate.
//!
//! This script generates `constants.rs` containing the repository root and the
//! directory holding the raylib shared library, if one was given through the
//! `RAYLIB_LIB_DIR` environment variable at build time. These paths are used
//! by the configuration module and tests to locate the library.

use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-env-changed=RAYLIB_LIB_DIR");

    // Repository root is one level up from this crate
    let manifest_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("failed to get current directory"));
    let repo_root = manifest_dir.parent().unwrap_or(manifest_dir.as_path());
    let lib_dir = env::var("RAYLIB_LIB_DIR").unwrap_or_default();

    let out_path = PathBuf::from(env::var("OUT_DIR").expect("failed to get output directory"))
        .join("constants.rs");

    let data = format!(
        "pub const RAYLIB_REPO_ROOT: &str = {:?};\n\
        pub const RAYLIB_LIB_DIR: &str = {:?};\n",
        repo_root.to_string_lossy(),
        lib_dir
    );
    std::fs::write(out_path, data).expect("Unable to write file");
}
