// SPDX-FileCopyrightText: 2025 Contributors to the raudio project.
// SPDX-License-Identifier: Apache-2.0

//! Generates a sine tone from a stream callback, sweeping its frequency from
//! the application thread.

mod common;

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicU32, Ordering},
    },
    time::Duration,
};

use clap::Parser;
use raudio::{AudioDevice, StreamFormat, audio_callback, config::get_raylib_so_path, load_api};
use tracing::info;

#[derive(Debug, Parser)]
#[command(version = clap::crate_version!())]
#[command(about = "Plays a tone produced on the audio thread", long_about = None)]
struct Opts {
    /// Start frequency, in Hz.
    #[arg(long, default_value_t = 220.0)]
    from: f32,

    /// End frequency, in Hz.
    #[arg(long, default_value_t = 880.0)]
    to: f32,

    /// Sample rate of the stream.
    #[arg(long, default_value_t = 44100)]
    sample_rate: u32,

    /// Sweep duration, in seconds.
    #[arg(long, default_value_t = 5)]
    seconds: u64,
}

fn main() -> Result<(), raudio::Error> {
    common::setup_logging();
    let opts: Opts = Opts::parse();

    let device = AudioDevice::open(load_api(get_raylib_so_path())?)?;
    let format = StreamFormat {
        sample_rate: opts.sample_rate,
        channels: 1,
        ..Default::default()
    };
    let stream = device.load_audio_stream(format)?;

    // Frequency as f32 bits, written by the sweep and read by the callback.
    let frequency = Arc::new(AtomicU32::new(opts.from.to_bits()));
    let tone_frequency = frequency.clone();
    let phase = Mutex::new(0.0f32);
    let sample_rate = opts.sample_rate as f32;
    stream.set_callback(Some(audio_callback(move |samples, _frames| {
        let step = f32::from_bits(tone_frequency.load(Ordering::Relaxed)) / sample_rate;
        if let Ok(mut phase) = phase.lock() {
            for sample in samples.iter_mut() {
                *sample = (*phase * std::f32::consts::TAU).sin() * 0.25;
                *phase = (*phase + step).fract();
            }
        }
    })))?;
    stream.play();
    info!("Sweeping {} Hz to {} Hz", opts.from, opts.to);

    let total = (opts.seconds * 60).max(1) as f32;
    let mut tick = 0.0f32;
    common::run_for(Duration::from_secs(opts.seconds), || {
        tick += 1.0;
        let hz = opts.from + (opts.to - opts.from) * (tick / total).min(1.0);
        frequency.store(hz.to_bits(), Ordering::Relaxed);
    });

    stream.set_callback(None)?;
    stream.stop();
    Ok(())
}
