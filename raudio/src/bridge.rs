// SPDX-FileCopyrightText: 2025 Contributors to the raudio project.
// SPDX-License-Identifier: Apache-2.0

//! Bridge between the engine's audio thread and Rust callbacks.
//!
//! raylib calls audio callbacks through plain C function pointers that carry
//! no user context. This module owns the fixed-signature trampolines the
//! engine is given, and the process-wide state they dispatch into:
//!
//! - a list of **mixed processors**, run in insertion order over the final
//!   mixed output buffer, backed by a single native hook that is attached
//!   exactly while the list is non-empty;
//! - a pool of [`STREAM_SLOT_COUNT`] **stream slots**, each with its own
//!   trampoline, binding one data-request callback to one audio stream.
//!
//! The trampolines are the only place where native code crosses into Rust.
//!
//! # Locking
//!
//! ```text
//!  application thread                      audio thread
//!  ------------------                      ------------
//!  attach / detach ──► hook mutex          trampoline
//!                      │                     │
//!                      └─► list write lock   └─► list read lock ──► callbacks
//! ```
//!
//! The native engine invokes trampolines while holding its own audio lock, so
//! the bridge never calls into the engine while holding a list or slot lock.
//! Hook state changes are serialized by a separate mutex held by writers only:
//! attach installs the hook before publishing the entry, detach unpublishes the
//! entry before removing the hook. A dispatch that lands in between sees an
//! empty list and does nothing.
//!
//! # Callback obligations
//!
//! Callbacks run on a real-time thread. They must return promptly, must not
//! register or remove callbacks themselves (the read lock is held while they
//! run), and must not panic: a panic reaching a trampoline is logged and
//! aborts the process.

use std::{
    os::raw::{c_uint, c_void},
    panic::{self, AssertUnwindSafe},
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use parking_lot::{Mutex, RwLock, const_mutex, const_rwlock};
use tracing::debug;

use crate::{
    Error, Result,
    config::{DEVICE_CHANNELS, STREAM_SLOT_COUNT},
};

/// A Rust audio callback.
///
/// Receives the interleaved 32-bit float samples of one engine period and the
/// number of frames in it; the slice holds `frames * channels` samples.
/// Callbacks process or produce samples in place.
pub type AudioCallback = Arc<dyn Fn(&mut [f32], usize) + Send + Sync>;

/// Native callback signature: `void (*)(void *bufferData, unsigned int frames)`.
pub type RawAudioCallback = unsafe extern "C" fn(*mut c_void, c_uint);

/// Wraps a closure into an [`AudioCallback`].
///
/// Keep the returned value to remove the callback later by identity.
pub fn audio_callback<F>(callback: F) -> AudioCallback
where
    F: Fn(&mut [f32], usize) + Send + Sync + 'static,
{
    Arc::new(callback)
}

/// Native operations the bridge depends on.
///
/// Implemented by the loaded raylib API; tests substitute an instrumented fake.
pub trait AudioHooks {
    /// Attaches `hook` to the engine's final mix.
    fn attach_mixed_processor(&self, hook: RawAudioCallback);

    /// Detaches a hook previously given to [`Self::attach_mixed_processor`].
    fn detach_mixed_processor(&self, hook: RawAudioCallback);

    /// Sets or clears the data-request callback of `stream`.
    fn set_stream_callback(
        &self,
        stream: raudio_sys::AudioStream,
        hook: Option<RawAudioCallback>,
    );

    /// Unloads `stream` and frees its buffers.
    fn unload_stream(&self, stream: raudio_sys::AudioStream);

    /// Closes the audio device.
    fn close_device(&self);
}

/// Identity of one mixed processor registration.
///
/// Every call to [`AudioBridge::attach_mixed_processor`] yields a new id, even
/// when the same callback is attached twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProcessorId(u64);

struct MixedEntry {
    id: ProcessorId,
    callback: AudioCallback,
}

struct StreamBinding {
    callback: AudioCallback,
    channels: usize,
}

/// The stream a slot is assigned to.
struct StreamOwner {
    /// Address of the stream's native buffer, unique while the stream is loaded.
    key: usize,
    stream: raudio_sys::AudioStream,
}

// Safety: the stored stream is never dereferenced by the bridge, it is only
// handed back to the engine to clear its callback.
unsafe impl Send for StreamOwner {}

/// Callback registry shared with the audio thread.
///
/// The process-wide instance the trampolines dispatch into is private to the
/// crate and only reached through [`crate::AudioDevice`] and
/// [`crate::AudioStream`], with the API they were loaded from. Independent
/// instances exercise the registry against a fake [`AudioHooks`]
/// implementation; the engine never invokes them, so they are driven through
/// [`Self::dispatch_mixed`] and [`Self::dispatch_stream`] instead.
///
/// ```compile_fail
/// let bridge = raudio::AudioBridge::global();
/// ```
pub struct AudioBridge {
    mixed: RwLock<Vec<MixedEntry>>,
    mixed_hook_installed: Mutex<bool>,
    next_id: AtomicU64,
    streams: [RwLock<Option<StreamBinding>>; STREAM_SLOT_COUNT],
    stream_owners: Mutex<[Option<StreamOwner>; STREAM_SLOT_COUNT]>,
}

static BRIDGE: AudioBridge = AudioBridge::new();

const MIXED_HOOK: RawAudioCallback = mixed_trampoline;

const STREAM_HOOKS: [RawAudioCallback; STREAM_SLOT_COUNT] = [
    stream_trampoline::<0>,
    stream_trampoline::<1>,
    stream_trampoline::<2>,
    stream_trampoline::<3>,
    stream_trampoline::<4>,
    stream_trampoline::<5>,
    stream_trampoline::<6>,
    stream_trampoline::<7>,
];

impl Default for AudioBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioBridge {
    /// Creates an empty registry: no processors, no stream bindings.
    pub const fn new() -> Self {
        Self {
            mixed: const_rwlock(Vec::new()),
            mixed_hook_installed: const_mutex(false),
            next_id: AtomicU64::new(1),
            streams: [const { const_rwlock(None) }; STREAM_SLOT_COUNT],
            stream_owners: const_mutex([const { None }; STREAM_SLOT_COUNT]),
        }
    }

    /// Returns the registry the native trampolines dispatch into.
    pub(crate) fn global() -> &'static AudioBridge {
        &BRIDGE
    }

    /// Appends `callback` to the mixed processor list.
    ///
    /// Installs the native mix hook when the list was empty. Attaching the same
    /// callback twice creates two independent entries, both of which run.
    pub fn attach_mixed_processor(
        &self,
        hooks: &dyn AudioHooks,
        callback: AudioCallback,
    ) -> ProcessorId {
        let mut installed = self.mixed_hook_installed.lock();
        if !*installed {
            hooks.attach_mixed_processor(MIXED_HOOK);
            *installed = true;
            debug!("Attached mixed processor hook");
        }
        let id = ProcessorId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.mixed.write().push(MixedEntry { id, callback });
        id
    }

    /// Removes the most recently attached entry holding `callback`.
    ///
    /// Matching is by identity (the callback's allocation), never by value.
    /// Uninstalls the native hook when the list becomes empty. Returns `false`
    /// and changes nothing when no entry matches.
    pub fn detach_mixed_processor(
        &self,
        hooks: &dyn AudioHooks,
        callback: &AudioCallback,
    ) -> bool {
        let target = callback_address(callback);
        self.remove_mixed_where(hooks, |entry| callback_address(&entry.callback) == target)
    }

    /// Removes the entry registered under `id`.
    ///
    /// Same hook semantics as [`Self::detach_mixed_processor`].
    pub fn remove_mixed_processor(&self, hooks: &dyn AudioHooks, id: ProcessorId) -> bool {
        self.remove_mixed_where(hooks, |entry| entry.id == id)
    }

    fn remove_mixed_where(
        &self,
        hooks: &dyn AudioHooks,
        matches: impl Fn(&MixedEntry) -> bool,
    ) -> bool {
        let mut installed = self.mixed_hook_installed.lock();
        let (removed, now_empty) = {
            let mut list = self.mixed.write();
            let Some(index) = list.iter().rposition(matches) else {
                return false;
            };
            (list.remove(index), list.is_empty())
        };
        if now_empty && *installed {
            hooks.detach_mixed_processor(MIXED_HOOK);
            *installed = false;
            debug!("Detached mixed processor hook");
        }
        drop(removed);
        true
    }

    /// Number of entries in the mixed processor list.
    pub fn mixed_processor_count(&self) -> usize {
        self.mixed.read().len()
    }

    /// Whether the native mix hook is currently attached.
    pub fn is_mixed_hook_installed(&self) -> bool {
        *self.mixed_hook_installed.lock()
    }

    /// Runs every mixed processor, in insertion order, over `buffer`.
    ///
    /// Each processor sees the output of the previous one.
    pub fn dispatch_mixed(&self, buffer: &mut [f32], frames: usize) {
        let list = self.mixed.read();
        for entry in list.iter() {
            (entry.callback)(&mut *buffer, frames);
        }
    }

    /// Binds `callback` as the only data-request callback of `stream`.
    ///
    /// The first binding assigns a slot and installs its trampoline on the
    /// stream; later bindings swap the callback in place, so the audio thread
    /// observes either the old or the new callback. `None` clears the binding
    /// and releases the slot. Stream handle validity is not checked.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedSampleSize`] if the stream is not 32-bit float
    /// - [`Error::InvalidResource`] if the stream has no channels
    /// - [`Error::StreamSlotsExhausted`] if every slot is bound to another stream
    pub fn set_stream_callback(
        &self,
        hooks: &dyn AudioHooks,
        stream: raudio_sys::AudioStream,
        callback: Option<AudioCallback>,
    ) -> Result<()> {
        let Some(callback) = callback else {
            self.release_stream(hooks, stream);
            return Ok(());
        };
        if stream.sampleSize != 32 {
            return Err(Error::UnsupportedSampleSize(stream.sampleSize));
        }
        if stream.channels == 0 {
            return Err(Error::InvalidResource("audio stream"));
        }
        let binding = StreamBinding {
            callback,
            channels: stream.channels as usize,
        };

        let key = stream_key(&stream);
        let mut owners = self.stream_owners.lock();
        if let Some(slot) = find_slot(&owners, key) {
            let _previous = self.streams[slot].write().replace(binding);
            return Ok(());
        }

        let slot = owners
            .iter()
            .position(Option::is_none)
            .ok_or(Error::StreamSlotsExhausted(STREAM_SLOT_COUNT))?;
        *self.streams[slot].write() = Some(binding);
        owners[slot] = Some(StreamOwner { key, stream });
        hooks.set_stream_callback(stream, Some(STREAM_HOOKS[slot]));
        debug!(slot, "Bound stream callback slot");
        Ok(())
    }

    /// Clears the binding of `stream`, if any.
    ///
    /// Must be called before the stream is unloaded so its slot can be reused.
    pub fn release_stream(&self, hooks: &dyn AudioHooks, stream: raudio_sys::AudioStream) {
        let mut owners = self.stream_owners.lock();
        if let Some(slot) = find_slot(&owners, stream_key(&stream)) {
            self.release_slot(hooks, &mut owners, slot);
        }
    }

    fn release_slot(
        &self,
        hooks: &dyn AudioHooks,
        owners: &mut [Option<StreamOwner>; STREAM_SLOT_COUNT],
        slot: usize,
    ) {
        if let Some(owner) = owners[slot].take() {
            hooks.set_stream_callback(owner.stream, None);
            let _previous = self.streams[slot].write().take();
            debug!(slot, "Released stream callback slot");
        }
    }

    /// Slot assigned to `stream`, if it has a callback bound.
    pub fn stream_slot(&self, stream: &raudio_sys::AudioStream) -> Option<usize> {
        find_slot(&self.stream_owners.lock(), stream_key(stream))
    }

    /// Number of streams with a callback bound.
    pub fn bound_stream_count(&self) -> usize {
        self.stream_owners.lock().iter().flatten().count()
    }

    /// Invokes the callback bound to `slot`, if any.
    pub fn dispatch_stream(&self, slot: usize, buffer: &mut [f32], frames: usize) {
        let Some(binding) = self.streams.get(slot) else {
            return;
        };
        if let Some(binding) = binding.read().as_ref() {
            (binding.callback)(buffer, frames);
        }
    }

    /// Detaches every hook and drops every callback.
    ///
    /// Called before the audio device closes so no trampoline can run against
    /// a device that is going away.
    pub fn clear(&self, hooks: &dyn AudioHooks) {
        {
            let mut installed = self.mixed_hook_installed.lock();
            let removed = std::mem::take(&mut *self.mixed.write());
            if *installed {
                hooks.detach_mixed_processor(MIXED_HOOK);
                *installed = false;
            }
            debug!(processors = removed.len(), "Cleared mixed processors");
        }

        let mut owners = self.stream_owners.lock();
        for slot in 0..STREAM_SLOT_COUNT {
            self.release_slot(hooks, &mut owners, slot);
        }
    }

    /// Clears every hook, then closes the device.
    ///
    /// No trampoline is installed anywhere once the engine starts closing.
    pub fn close_device(&self, hooks: &dyn AudioHooks) {
        self.clear(hooks);
        hooks.close_device();
    }

    /// Releases the binding of `stream`, then unloads it.
    ///
    /// The slot is free again before the engine frees the stream's buffer,
    /// whose address keys the slot.
    pub fn unload_stream(&self, hooks: &dyn AudioHooks, stream: raudio_sys::AudioStream) {
        self.release_stream(hooks, stream);
        hooks.unload_stream(stream);
    }

    /// Dispatch entry for the mixed trampoline.
    ///
    /// # Safety
    ///
    /// `data` must be null or point to `frames * DEVICE_CHANNELS` writable floats.
    unsafe fn dispatch_mixed_raw(&self, data: *mut c_void, frames: c_uint) {
        let list = self.mixed.read();
        if list.is_empty() {
            return;
        }
        if let Some(buffer) = unsafe { sample_buffer(data, frames, DEVICE_CHANNELS) } {
            for entry in list.iter() {
                (entry.callback)(&mut *buffer, frames as usize);
            }
        }
    }

    /// Dispatch entry for a stream trampoline.
    ///
    /// # Safety
    ///
    /// `data` must be null or point to `frames * channels` writable floats,
    /// `channels` being those of the stream bound to `slot`.
    unsafe fn dispatch_stream_raw(&self, slot: usize, data: *mut c_void, frames: c_uint) {
        let Some(binding) = self.streams.get(slot) else {
            return;
        };
        let binding = binding.read();
        let Some(binding) = binding.as_ref() else {
            return;
        };
        if let Some(buffer) = unsafe { sample_buffer(data, frames, binding.channels) } {
            (binding.callback)(buffer, frames as usize);
        }
    }
}

unsafe extern "C" fn mixed_trampoline(data: *mut c_void, frames: c_uint) {
    guard_audio_thread("mixed processor", || unsafe {
        BRIDGE.dispatch_mixed_raw(data, frames)
    });
}

unsafe extern "C" fn stream_trampoline<const SLOT: usize>(data: *mut c_void, frames: c_uint) {
    guard_audio_thread("stream callback", || unsafe {
        BRIDGE.dispatch_stream_raw(SLOT, data, frames)
    });
}

/// Unwinding into the engine is undefined; a panicking callback is fatal.
fn guard_audio_thread(kind: &'static str, dispatch: impl FnOnce()) {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(dispatch)) {
        let message = payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
            .unwrap_or("non-string panic payload");
        tracing::error!("Audio {kind} panicked on the audio thread, aborting: {message}");
        std::process::abort();
    }
}

/// Views the engine's sample buffer as interleaved floats.
///
/// # Safety
///
/// `data` must be null or valid for `frames * channels` floats for `'a`.
unsafe fn sample_buffer<'a>(
    data: *mut c_void,
    frames: c_uint,
    channels: usize,
) -> Option<&'a mut [f32]> {
    if data.is_null() || frames == 0 {
        return None;
    }
    let len = frames as usize * channels;
    Some(unsafe { std::slice::from_raw_parts_mut(data.cast::<f32>(), len) })
}

fn callback_address(callback: &AudioCallback) -> usize {
    Arc::as_ptr(callback).cast::<()>() as usize
}

fn stream_key(stream: &raudio_sys::AudioStream) -> usize {
    stream.buffer as usize
}

fn find_slot(owners: &[Option<StreamOwner>; STREAM_SLOT_COUNT], key: usize) -> Option<usize> {
    owners
        .iter()
        .position(|owner| owner.as_ref().is_some_and(|owner| owner.key == key))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Holds the hooks the bridge installs, as the engine would.
    #[derive(Default)]
    struct Engine {
        mixed: Mutex<Option<RawAudioCallback>>,
        streams: Mutex<Vec<(usize, RawAudioCallback)>>,
    }

    impl Engine {
        fn stream_hook(&self, key: usize) -> Option<RawAudioCallback> {
            let streams = self.streams.lock().unwrap();
            streams.iter().find(|(k, _)| *k == key).map(|(_, hook)| *hook)
        }
    }

    impl AudioHooks for Engine {
        fn attach_mixed_processor(&self, hook: RawAudioCallback) {
            *self.mixed.lock().unwrap() = Some(hook);
        }

        fn detach_mixed_processor(&self, _hook: RawAudioCallback) {
            *self.mixed.lock().unwrap() = None;
        }

        fn set_stream_callback(
            &self,
            stream: raudio_sys::AudioStream,
            hook: Option<RawAudioCallback>,
        ) {
            let key = stream_key(&stream);
            let mut streams = self.streams.lock().unwrap();
            streams.retain(|(k, _)| *k != key);
            if let Some(hook) = hook {
                streams.push((key, hook));
            }
        }

        fn unload_stream(&self, _stream: raudio_sys::AudioStream) {}

        fn close_device(&self) {}
    }

    // Everything here goes through the process-wide bridge, so the whole
    // flow lives in a single test.
    #[test]
    fn trampolines_dispatch_into_the_global_bridge() {
        let bridge = AudioBridge::global();
        let engine = Engine::default();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_mixed = seen.clone();
        let gain = audio_callback(move |samples, frames| {
            seen_mixed.lock().unwrap().push((samples.len(), frames));
            samples.iter_mut().for_each(|s| *s *= 0.5);
        });
        bridge.attach_mixed_processor(&engine, gain.clone());
        let mixed_hook = engine.mixed.lock().unwrap().unwrap();

        let mut device_buffer = vec![1.0f32; 64 * DEVICE_CHANNELS];
        unsafe { mixed_hook(device_buffer.as_mut_ptr().cast(), 64) };
        assert!(device_buffer.iter().all(|&s| s == 0.5));
        assert_eq!(*seen.lock().unwrap(), vec![(64 * DEVICE_CHANNELS, 64)]);

        // Null or empty buffers are ignored
        unsafe { mixed_hook(std::ptr::null_mut(), 64) };
        unsafe { mixed_hook(device_buffer.as_mut_ptr().cast(), 0) };
        assert_eq!(seen.lock().unwrap().len(), 1);

        assert!(bridge.detach_mixed_processor(&engine, &gain));
        assert!(engine.mixed.lock().unwrap().is_none());
        unsafe { mixed_hook(device_buffer.as_mut_ptr().cast(), 64) };
        assert_eq!(seen.lock().unwrap().len(), 1);

        // Stream buffers are sized by the stream's own channel count
        seen.lock().unwrap().clear();
        let mono = raudio_sys::AudioStream {
            buffer: 0xA000 as *mut raudio_sys::rAudioBuffer,
            sampleRate: 44100,
            sampleSize: 32,
            channels: 1,
            ..Default::default()
        };
        let seen_stream = seen.clone();
        bridge
            .set_stream_callback(
                &engine,
                mono,
                Some(audio_callback(move |samples, frames| {
                    seen_stream.lock().unwrap().push((samples.len(), frames));
                    samples.fill(0.25);
                })),
            )
            .unwrap();
        let stream_hook = engine.stream_hook(0xA000).unwrap();

        let mut stream_buffer = vec![0.0f32; 128];
        unsafe { stream_hook(stream_buffer.as_mut_ptr().cast(), 128) };
        assert!(stream_buffer.iter().all(|&s| s == 0.25));
        assert_eq!(*seen.lock().unwrap(), vec![(128, 128)]);

        unsafe { stream_hook(std::ptr::null_mut(), 128) };
        assert_eq!(seen.lock().unwrap().len(), 1);

        bridge.close_device(&engine);
        assert!(engine.stream_hook(0xA000).is_none());
        unsafe { stream_hook(stream_buffer.as_mut_ptr().cast(), 128) };
        assert_eq!(seen.lock().unwrap().len(), 1);
    }
}
