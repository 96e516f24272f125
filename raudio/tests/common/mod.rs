// SPDX-FileCopyrightText: 2025 Contributors to the raudio project.
// SPDX-License-Identifier: Apache-2.0

//! Instrumented stand-in for the native engine.

#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use raudio::{AudioHooks, bridge::RawAudioCallback};

/// Native hook call observed by [`FakeEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookEvent {
    AttachMixed,
    DetachMixed,
    SetStream { key: usize, installed: bool },
    UnloadStream { key: usize },
    CloseDevice,
}

/// Records every hook the bridge installs, as the engine would hold them.
#[derive(Default)]
pub struct FakeEngine {
    mixed: Mutex<Vec<RawAudioCallback>>,
    streams: Mutex<HashMap<usize, RawAudioCallback>>,
    events: Mutex<Vec<HookEvent>>,
}

impl FakeEngine {
    /// Whether a mixed processor hook is attached.
    pub fn mixed_installed(&self) -> bool {
        !self.mixed.lock().unwrap().is_empty()
    }

    /// The attached mixed processor hook, as the engine would call it.
    pub fn mixed_hook(&self) -> Option<RawAudioCallback> {
        self.mixed.lock().unwrap().first().copied()
    }

    /// The callback installed on the stream whose buffer is `key`.
    pub fn stream_hook(&self, key: usize) -> Option<RawAudioCallback> {
        self.streams.lock().unwrap().get(&key).copied()
    }

    pub fn stream_hook_count(&self) -> usize {
        self.streams.lock().unwrap().len()
    }

    pub fn events(&self) -> Vec<HookEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl AudioHooks for FakeEngine {
    fn attach_mixed_processor(&self, hook: RawAudioCallback) {
        let mut mixed = self.mixed.lock().unwrap();
        assert!(mixed.is_empty(), "mixed processor hook attached twice");
        mixed.push(hook);
        self.events.lock().unwrap().push(HookEvent::AttachMixed);
    }

    fn detach_mixed_processor(&self, hook: RawAudioCallback) {
        let mut mixed = self.mixed.lock().unwrap();
        let index = mixed
            .iter()
            .position(|attached| std::ptr::fn_addr_eq(*attached, hook))
            .expect("detaching a hook that is not attached");
        mixed.remove(index);
        self.events.lock().unwrap().push(HookEvent::DetachMixed);
    }

    fn set_stream_callback(
        &self,
        stream: raudio_sys::AudioStream,
        hook: Option<RawAudioCallback>,
    ) {
        let key = stream.buffer as usize;
        let mut streams = self.streams.lock().unwrap();
        match hook {
            Some(hook) => streams.insert(key, hook),
            None => streams.remove(&key),
        };
        self.events.lock().unwrap().push(HookEvent::SetStream {
            key,
            installed: hook.is_some(),
        });
    }

    fn unload_stream(&self, stream: raudio_sys::AudioStream) {
        let key = stream.buffer as usize;
        assert!(
            !self.streams.lock().unwrap().contains_key(&key),
            "stream unloaded with its callback still installed"
        );
        self.events
            .lock()
            .unwrap()
            .push(HookEvent::UnloadStream { key });
    }

    fn close_device(&self) {
        assert!(!self.mixed_installed(), "device closed with a mix hook attached");
        assert_eq!(self.stream_hook_count(), 0, "device closed with stream hooks");
        self.events.lock().unwrap().push(HookEvent::CloseDevice);
    }
}

/// A stream handle whose native buffer address is `key`.
pub fn fake_stream(key: usize, sample_size: u32, channels: u32) -> raudio_sys::AudioStream {
    raudio_sys::AudioStream {
        buffer: key as *mut raudio_sys::rAudioBuffer,
        sampleRate: 44100,
        sampleSize: sample_size,
        channels,
        ..Default::default()
    }
}
