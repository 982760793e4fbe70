//! Scripted in-memory host for driving the bridge in tests.

#![allow(dead_code)]

use parking_lot::Mutex;

use audio_bridge_core::HostAudioService;

/// One observed host call, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    OutputDevices,
    InputDevices,
    AudioOpen {
        sample_rate: u32,
        encoding: i32,
        channels: u16,
        frames: u32,
        device_id: u32,
    },
    CaptureOpen {
        sample_rate: u32,
        encoding: i32,
        channels: u16,
        frames: u32,
        device_id: u32,
    },
    WriteByte { elems: usize },
    WriteShort { elems: usize },
    WriteFloat { elems: usize },
    ReadByte { blocking: bool },
    ReadShort { blocking: bool },
    ReadFloat { blocking: bool },
    AudioClose,
    CaptureClose,
    ThreadPriority { is_capture: bool, device_id: u32 },
    RequestPermission { code: i32 },
}

/// How the host answers open calls.
pub enum OpenReply {
    /// Echo the request back verbatim (a fully agreeable host).
    Echo,
    /// Reply with these exact fields.
    Fixed(Vec<i32>),
    /// Report host-side initialization failure.
    Refuse,
}

type PermissionHook = Box<dyn Fn(&str, i32) + Send + Sync>;

pub struct ScriptedHost {
    calls: Mutex<Vec<HostCall>>,
    open_reply: Mutex<OpenReply>,
    output_devices: Mutex<Vec<u32>>,
    input_devices: Mutex<Vec<u32>>,
    /// Element count returned from capture reads.
    capture_elems: Mutex<i32>,
    permission_hook: Mutex<Option<PermissionHook>>,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            open_reply: Mutex::new(OpenReply::Echo),
            output_devices: Mutex::new(Vec::new()),
            input_devices: Mutex::new(Vec::new()),
            capture_elems: Mutex::new(0),
            permission_hook: Mutex::new(None),
        }
    }

    pub fn with_open_reply(reply: OpenReply) -> Self {
        let host = Self::new();
        *host.open_reply.lock() = reply;
        host
    }

    pub fn set_open_reply(&self, reply: OpenReply) {
        *self.open_reply.lock() = reply;
    }

    pub fn set_output_devices(&self, ids: Vec<u32>) {
        *self.output_devices.lock() = ids;
    }

    pub fn set_input_devices(&self, ids: Vec<u32>) {
        *self.input_devices.lock() = ids;
    }

    pub fn set_capture_elems(&self, elems: i32) {
        *self.capture_elems.lock() = elems;
    }

    pub fn set_permission_hook(&self, hook: impl Fn(&str, i32) + Send + Sync + 'static) {
        *self.permission_hook.lock() = Some(Box::new(hook));
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn record(&self, call: HostCall) {
        self.calls.lock().push(call);
    }

    fn open_reply_for(
        &self,
        sample_rate: u32,
        encoding: i32,
        channels: u16,
        frames: u32,
    ) -> Option<Vec<i32>> {
        match &*self.open_reply.lock() {
            OpenReply::Echo => Some(vec![
                sample_rate as i32,
                encoding,
                i32::from(channels),
                frames as i32,
            ]),
            OpenReply::Fixed(fields) => Some(fields.clone()),
            OpenReply::Refuse => None,
        }
    }
}

impl HostAudioService for ScriptedHost {
    fn audio_output_devices(&self) -> Vec<u32> {
        self.record(HostCall::OutputDevices);
        self.output_devices.lock().clone()
    }

    fn audio_input_devices(&self) -> Vec<u32> {
        self.record(HostCall::InputDevices);
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
        self.record(HostCall::AudioOpen {
            sample_rate,
            encoding: wire_encoding,
            channels,
            frames: frames_per_buffer,
            device_id,
        });
        self.open_reply_for(sample_rate, wire_encoding, channels, frames_per_buffer)
    }

    fn capture_open(
        &self,
        sample_rate: u32,
        wire_encoding: i32,
        channels: u16,
        frames_per_buffer: u32,
        device_id: u32,
    ) -> Option<Vec<i32>> {
        self.record(HostCall::CaptureOpen {
            sample_rate,
            encoding: wire_encoding,
            channels,
            frames: frames_per_buffer,
            device_id,
        });
        self.open_reply_for(sample_rate, wire_encoding, channels, frames_per_buffer)
    }

    fn audio_write_byte_buffer(&self, buffer: &[u8]) {
        self.record(HostCall::WriteByte { elems: buffer.len() });
    }

    fn audio_write_short_buffer(&self, buffer: &[i16]) {
        self.record(HostCall::WriteShort { elems: buffer.len() });
    }

    fn audio_write_float_buffer(&self, buffer: &[f32]) {
        self.record(HostCall::WriteFloat { elems: buffer.len() });
    }

    fn capture_read_byte_buffer(&self, buffer: &mut [u8], blocking: bool) -> i32 {
        self.record(HostCall::ReadByte { blocking });
        for (i, sample) in buffer.iter_mut().enumerate() {
            *sample = i as u8;
        }
        *self.capture_elems.lock()
    }

    fn capture_read_short_buffer(&self, buffer: &mut [i16], blocking: bool) -> i32 {
        self.record(HostCall::ReadShort { blocking });
        for (i, sample) in buffer.iter_mut().enumerate() {
            *sample = i as i16;
        }
        *self.capture_elems.lock()
    }

    fn capture_read_float_buffer(&self, buffer: &mut [f32], blocking: bool) -> i32 {
        self.record(HostCall::ReadFloat { blocking });
        for (i, sample) in buffer.iter_mut().enumerate() {
            *sample = i as f32;
        }
        *self.capture_elems.lock()
    }

    fn audio_close(&self) {
        self.record(HostCall::AudioClose);
    }

    fn capture_close(&self) {
        self.record(HostCall::CaptureClose);
    }

    fn audio_set_thread_priority(&self, is_capture: bool, device_id: u32) {
        self.record(HostCall::ThreadPriority {
            is_capture,
            device_id,
        });
    }

    fn request_permission(&self, permission: &str, request_code: i32) {
        self.record(HostCall::RequestPermission { code: request_code });
        if let Some(hook) = &*self.permission_hook.lock() {
            hook(permission, request_code);
        }
    }
}
