// SPDX-FileCopyrightText: 2025 Contributors to the raudio project.
// SPDX-License-Identifier: Apache-2.0

//! Integration tests against the real raylib library.
//!
//! raylib holds one audio context per process, so the whole device lifecycle
//! is exercised in a single test.
//!
//! # Test Coverage
//!
//! - Device open, double open rejection, explicit close
//! - Waves decoded from memory, conversion, cropping, sounds and aliases
//! - Raw streams fed by push and by callback
//! - Mixed processors running on the audio thread
//!
//! # Requirements
//!
//! - raylib shared library available (via `get_raylib_so_path()`)
//! - An audio output device
//!
//! Run with `cargo test -- --ignored`.

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::{Duration, Instant},
};

use raudio::{
    AudioDevice, Error, StreamFormat, audio_callback,
    config::{DEVICE_CHANNELS, get_raylib_so_path},
};
use tracing::info;

/// Ensures logging is initialized only once across all tests.
static LOG_ONCE: std::sync::Once = std::sync::Once::new();

fn setup_test() -> AudioDevice {
    // Initialize logging once (respects RUST_LOG environment variable)
    LOG_ONCE.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::builder()
                    .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
                    .from_env_lossy(),
            )
            .init();
    });

    let api = raudio::load_api(get_raylib_so_path()).unwrap();
    AudioDevice::open(api).unwrap()
}

/// Builds a mono 16-bit PCM WAV file holding a 440 Hz tone.
fn sine_wav(sample_rate: u32, frames: u32) -> Vec<u8> {
    let data_len = frames * 2;
    let mut wav = Vec::with_capacity(44 + data_len as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVEfmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    for frame in 0..frames {
        let t = frame as f32 / sample_rate as f32;
        let sample = ((t * 440.0 * std::f32::consts::TAU).sin() * 0.5 * i16::MAX as f32) as i16;
        wav.extend_from_slice(&sample.to_le_bytes());
    }
    wav
}

/// Polls `condition` for up to two seconds.
fn wait_for(condition: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    false
}

#[test]
#[ignore = "requires the raylib shared library and an audio output device"]
fn device_lifecycle() {
    let device = setup_test();
    assert!(device.is_ready());

    let second = AudioDevice::open(raudio::load_api(get_raylib_so_path()).unwrap());
    assert!(matches!(second, Err(Error::DeviceAlreadyOpen)));

    device.set_master_volume(0.25);
    assert!((device.master_volume() - 0.25).abs() < f32::EPSILON);

    // Waves and sounds
    let mut wave = device
        .load_wave_from_memory(".wav", &sine_wav(22050, 22050))
        .unwrap();
    assert_eq!(wave.frame_count(), 22050);
    assert_eq!(wave.sample_size(), 16);
    assert_eq!(wave.channels(), 1);

    let copy = wave.try_clone().unwrap();
    wave.crop(0..11025).unwrap();
    assert_eq!(wave.frame_count(), 11025);
    assert_eq!(copy.frame_count(), 22050);
    assert!(wave.crop(0..20000).is_err());

    wave.format(44100, 32, 2).unwrap();
    assert_eq!(wave.sample_rate(), 44100);
    let samples = wave.samples().unwrap();
    assert_eq!(samples.len(), wave.frame_count() as usize * 2);
    assert!(samples.iter().all(|s| s.abs() <= 1.0));

    let sound = device.load_sound_from_wave(&copy).unwrap();
    drop(copy);
    {
        let alias = sound.alias().unwrap();
        alias.set_volume(0.5);
        alias.play();
        assert!(alias.is_playing());
        alias.stop();
    }
    sound.play();
    assert!(sound.is_playing());
    sound.stop();
    assert!(!sound.is_playing());

    // Mixed processors see the device mix on the audio thread
    let mixed_calls = Arc::new(AtomicUsize::new(0));
    let calls = mixed_calls.clone();
    let mismatched = Arc::new(AtomicUsize::new(0));
    let bad_lengths = mismatched.clone();
    // Panicking on the audio thread aborts, so mismatches are counted instead
    let processor = audio_callback(move |samples, frames| {
        if samples.len() != frames * DEVICE_CHANNELS {
            bad_lengths.fetch_add(1, Ordering::Relaxed);
        }
        calls.fetch_add(1, Ordering::Relaxed);
    });
    device.attach_mixed_processor(processor.clone());
    sound.play();
    assert!(wait_for(|| mixed_calls.load(Ordering::Relaxed) > 0));
    assert!(device.detach_mixed_processor(&processor));
    assert!(!device.detach_mixed_processor(&processor));
    assert_eq!(mismatched.load(Ordering::Relaxed), 0);
    sound.stop();

    // Raw stream fed by a callback
    let stream = device
        .load_audio_stream(StreamFormat {
            channels: 1,
            ..Default::default()
        })
        .unwrap();
    let requested = Arc::new(AtomicUsize::new(0));
    let frames_requested = requested.clone();
    stream
        .set_callback(Some(audio_callback(move |samples, frames| {
            samples.fill(0.0);
            frames_requested.fetch_add(frames, Ordering::Relaxed);
        })))
        .unwrap();
    stream.play();
    assert!(wait_for(|| requested.load(Ordering::Relaxed) > 0));
    info!("Stream callback produced {} frames", requested.load(Ordering::Relaxed));
    stream.set_callback(None).unwrap();
    stream.stop();

    // Pushed 16-bit stream rejects mismatched sample types
    let pushed = device
        .load_audio_stream(StreamFormat {
            sample_size: 16,
            ..Default::default()
        })
        .unwrap();
    assert!(matches!(
        pushed.update(&[0.0f32; 64]),
        Err(Error::UnsupportedSampleSize(32))
    ));
    assert!(pushed.set_callback(Some(audio_callback(|_, _| {}))).is_err());
    pushed.update(&[0i16; 4096]).unwrap();
    assert!(matches!(pushed.update(&[0i16; 4095]), Err(Error::Other(_))));

    // The device stays open while resources reference it
    let handle = device.clone();
    assert!(matches!(handle.close(), Err(Error::DeviceInUse)));

    drop((stream, pushed, sound, wave));
    device.close().unwrap();
}
