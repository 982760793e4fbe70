//! In-process implementation of the host audio service.
//!
//! Negotiation echoes the request, committed playback data lands in a byte
//! ring for inspection, capture reads serve bytes queued ahead of time, and
//! permission requests complete asynchronously on a spawned thread. Same
//! call/callback shape a real managed host presents, minus the platform
//! underneath.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

use audio_bridge_core::HostAudioService;

use crate::queue::ByteRing;

/// Default capacity of the played/pending byte rings.
pub const DEFAULT_QUEUE_BYTES: usize = 64 * 1024;

/// Completion callback for permission requests. Embedders wire this to
/// `PermissionGate::complete`.
pub type PermissionResultFn = Arc<dyn Fn(i32, bool) + Send + Sync>;

/// Parameters of one open stream as the host accepted them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenParams {
    pub sample_rate: u32,
    pub wire_encoding: i32,
    pub channels: u16,
    pub frames_per_buffer: u32,
    pub device_id: u32,
}

impl OpenParams {
    fn reply(&self) -> Vec<i32> {
        vec![
            self.sample_rate as i32,
            self.wire_encoding,
            i32::from(self.channels),
            self.frames_per_buffer as i32,
        ]
    }
}

#[derive(Default)]
struct Streams {
    output: Option<OpenParams>,
    capture: Option<OpenParams>,
}

/// Software loopback host.
pub struct LoopbackHost {
    streams: Mutex<Streams>,
    played: Mutex<ByteRing>,
    pending_capture: Mutex<ByteRing>,
    output_devices: Mutex<Vec<u32>>,
    input_devices: Mutex<Vec<u32>>,
    grant_permissions: AtomicBool,
    permission_hook: Mutex<Option<PermissionResultFn>>,
    audio_closes: AtomicU32,
    capture_closes: AtomicU32,
    priority_requests: Mutex<Vec<(bool, u32)>>,
}

impl LoopbackHost {
    pub fn new() -> Self {
        Self::with_queue_capacity(DEFAULT_QUEUE_BYTES)
    }

    pub fn with_queue_capacity(bytes: usize) -> Self {
        Self {
            streams: Mutex::new(Streams::default()),
            played: Mutex::new(ByteRing::new(bytes)),
            pending_capture: Mutex::new(ByteRing::new(bytes)),
            output_devices: Mutex::new(vec![0]),
            input_devices: Mutex::new(vec![0]),
            grant_permissions: AtomicBool::new(true),
            permission_hook: Mutex::new(None),
            audio_closes: AtomicU32::new(0),
            capture_closes: AtomicU32::new(0),
            priority_requests: Mutex::new(Vec::new()),
        }
    }

    /// Register the completion callback for permission requests.
    pub fn on_permission_result(&self, hook: PermissionResultFn) {
        *self.permission_hook.lock() = Some(hook);
    }

    /// Whether future permission requests are granted or denied.
    pub fn set_grant_permissions(&self, granted: bool) {
        self.grant_permissions.store(granted, Ordering::SeqCst);
    }

    pub fn set_output_devices(&self, ids: Vec<u32>) {
        *self.output_devices.lock() = ids;
    }

    pub fn set_input_devices(&self, ids: Vec<u32>) {
        *self.input_devices.lock() = ids;
    }

    /// Queue bytes to be served by subsequent capture reads.
    pub fn queue_capture(&self, bytes: &[u8]) {
        self.pending_capture.lock().write(bytes);
    }

    /// Drain everything committed to the output path so far.
    pub fn take_played(&self) -> Vec<u8> {
        let mut played = self.played.lock();
        let len = played.len();
        played.read(len)
    }

    pub fn output_stream(&self) -> Option<OpenParams> {
        self.streams.lock().output
    }

    pub fn capture_stream(&self) -> Option<OpenParams> {
        self.streams.lock().capture
    }

    pub fn audio_close_count(&self) -> u32 {
        self.audio_closes.load(Ordering::SeqCst)
    }

    pub fn capture_close_count(&self) -> u32 {
        self.capture_closes.load(Ordering::SeqCst)
    }

    pub fn priority_requests(&self) -> Vec<(bool, u32)> {
        self.priority_requests.lock().clone()
    }

    fn accept_open(
        slot: &mut Option<OpenParams>,
        params: OpenParams,
        path: &str,
    ) -> Option<Vec<i32>> {
        if slot.is_some() {
            log::warn!("{path} open refused: stream already open");
            return None;
        }
        let reply = params.reply();
        *slot = Some(params);
        Some(reply)
    }
}

impl Default for LoopbackHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostAudioService for LoopbackHost {
    fn audio_output_devices(&self) -> Vec<u32> {
        self.output_devices.lock().clone()
    }

    fn audio_input_devices(&self) -> Vec<u32> {
        self.input_devices.lock().clone()
    }

    fn audio_open(
        &self,
        sample_rate: u32,
        wire_encoding: i32,
        channels: u16,
        frames_per_buffer: u32,
        device_id: u32,
    ) -> Option<Vec<i32>> {
        let mut streams = self.streams.lock();
        Self::accept_open(
            &mut streams.output,
            OpenParams {
                sample_rate,
                wire_encoding,
                channels,
                frames_per_buffer,
                device_id,
            },
            "output",
        )
    }

    fn capture_open(
        &self,
        sample_rate: u32,
        wire_encoding: i32,
        channels: u16,
        frames_per_buffer: u32,
        device_id: u32,
    ) -> Option<Vec<i32>> {
        let mut streams = self.streams.lock();
        Self::accept_open(
            &mut streams.capture,
            OpenParams {
                sample_rate,
                wire_encoding,
                channels,
                frames_per_buffer,
                device_id,
            },
            "capture",
        )
    }

    fn audio_write_byte_buffer(&self, buffer: &[u8]) {
        self.played.lock().write(buffer);
    }

    fn audio_write_short_buffer(&self, buffer: &[i16]) {
        let mut bytes = Vec::with_capacity(buffer.len() * 2);
        for sample in buffer {
            bytes.extend_from_slice(&sample.to_ne_bytes());
        }
        self.played.lock().write(&bytes);
    }

    fn audio_write_float_buffer(&self, buffer: &[f32]) {
        let mut bytes = Vec::with_capacity(buffer.len() * 4);
        for sample in buffer {
            bytes.extend_from_slice(&sample.to_ne_bytes());
        }
        self.played.lock().write(&bytes);
    }

    // An in-process queue never blocks: both blocking and non-blocking
    // reads serve whatever is queued and return immediately.

    fn capture_read_byte_buffer(&self, buffer: &mut [u8], _blocking: bool) -> i32 {
        self.pending_capture.lock().read_into(buffer) as i32
    }

    fn capture_read_short_buffer(&self, buffer: &mut [i16], _blocking: bool) -> i32 {
        let mut queue = self.pending_capture.lock();
        let elems = (queue.len() / 2).min(buffer.len());
        let mut raw = vec![0u8; elems * 2];
        queue.read_into(&mut raw);
        drop(queue);
        for (sample, chunk) in buffer.iter_mut().zip(raw.chunks_exact(2)) {
            *sample = i16::from_ne_bytes([chunk[0], chunk[1]]);
        }
        elems as i32
    }

    fn capture_read_float_buffer(&self, buffer: &mut [f32], _blocking: bool) -> i32 {
        let mut queue = self.pending_capture.lock();
        let elems = (queue.len() / 4).min(buffer.len());
        let mut raw = vec![0u8; elems * 4];
        queue.read_into(&mut raw);
        drop(queue);
        for (sample, chunk) in buffer.iter_mut().zip(raw.chunks_exact(4)) {
            *sample = f32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        elems as i32
    }

    fn audio_close(&self) {
        self.streams.lock().output = None;
        self.audio_closes.fetch_add(1, Ordering::SeqCst);
    }

    fn capture_close(&self) {
        self.streams.lock().capture = None;
        self.capture_closes.fetch_add(1, Ordering::SeqCst);
    }

    fn audio_set_thread_priority(&self, is_capture: bool, device_id: u32) {
        self.priority_requests.lock().push((is_capture, device_id));
    }

    fn request_permission(&self, permission: &str, request_code: i32) {
        let hook = self.permission_hook.lock().clone();
        let Some(hook) = hook else {
            log::warn!("permission request for {permission} with no completion hook wired");
            return;
        };
        let granted = self.grant_permissions.load(Ordering::SeqCst);
        thread::spawn(move || {
            // a real host shows a dialog; keep the asynchrony observable
            thread::sleep(Duration::from_millis(5));
            hook(request_code, granted);
        });
    }
}
