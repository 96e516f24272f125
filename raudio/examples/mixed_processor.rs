// SPDX-FileCopyrightText: 2025 Contributors to the raudio project.
// SPDX-License-Identifier: Apache-2.0

//! Plays a music file through two processors attached to the final mix: an
//! echo and a level meter.

mod common;

use std::{
    path::PathBuf,
    sync::{
        Arc, Mutex,
        atomic::{AtomicU32, Ordering},
    },
    time::Duration,
};

use clap::Parser;
use raudio::{AudioDevice, audio_callback, config::get_raylib_so_path, load_api};
use tracing::info;

#[derive(Debug, Parser)]
#[command(version = clap::crate_version!())]
#[command(about = "Applies processors to everything the engine mixes", long_about = None)]
struct Opts {
    /// Music file to play (mp3, ogg, wav, flac, xm, mod).
    #[arg(long)]
    file: PathBuf,

    /// Echo delay, in milliseconds.
    #[arg(long, default_value_t = 250)]
    delay_ms: u32,

    /// Echo feedback, between 0 and 1.
    #[arg(long, default_value_t = 0.4)]
    feedback: f32,

    /// How long to play, in seconds.
    #[arg(long, default_value_t = 10)]
    seconds: u64,
}

/// Interleaved stereo delay line.
struct Echo {
    line: Vec<f32>,
    cursor: usize,
    feedback: f32,
}

impl Echo {
    fn new(delay_ms: u32, feedback: f32) -> Self {
        let frames = (44100 * delay_ms as usize / 1000).max(1);
        Self {
            line: vec![0.0; frames * 2],
            cursor: 0,
            feedback: feedback.clamp(0.0, 0.95),
        }
    }

    fn process(&mut self, samples: &mut [f32]) {
        for sample in samples.iter_mut() {
            let delayed = self.line[self.cursor];
            *sample += delayed * self.feedback;
            self.line[self.cursor] = *sample;
            self.cursor = (self.cursor + 1) % self.line.len();
        }
    }
}

fn main() -> Result<(), raudio::Error> {
    common::setup_logging();
    let opts: Opts = Opts::parse();

    let device = AudioDevice::open(load_api(get_raylib_so_path())?)?;
    let music = device.load_music_stream(&opts.file)?;
    info!(
        "Loaded \"{}\": {:.1}s",
        opts.file.display(),
        music.time_length()
    );

    let echo = Mutex::new(Echo::new(opts.delay_ms, opts.feedback));
    let echo = audio_callback(move |samples, _frames| {
        if let Ok(mut echo) = echo.lock() {
            echo.process(samples);
        }
    });

    // Peak level of the last period, stored as f32 bits.
    let level = Arc::new(AtomicU32::new(0));
    let meter_level = level.clone();
    let meter = audio_callback(move |samples, _frames| {
        let peak = samples.iter().fold(0.0f32, |peak, s| peak.max(s.abs()));
        meter_level.store(peak.to_bits(), Ordering::Relaxed);
    });

    device.attach_mixed_processor(echo.clone());
    let meter_id = device.attach_mixed_processor(meter);
    music.play();

    let mut ticks = 0u64;
    common::run_for(Duration::from_secs(opts.seconds), || {
        music.update();
        ticks += 1;
        if ticks % 30 == 0 {
            let peak = f32::from_bits(level.load(Ordering::Relaxed));
            info!(
                "{:5.1}s / {:.1}s  peak {:.3}",
                music.time_played(),
                music.time_length(),
                peak
            );
        }
    });

    device.detach_mixed_processor(&echo);
    device.remove_mixed_processor(meter_id);
    music.stop();
    Ok(())
}
