//! # audio-bridge-core
//!
//! Platform-agnostic bridge between a native audio engine and a managed
//! host audio service reachable only through an asynchronous call boundary
//! (method calls in, callbacks out).
//!
//! Owns device enumeration, per-direction stream open/close with format
//! negotiation, the shared buffer handed back and forth with the host, and
//! a cross-thread permission-request protocol. Host-side concerns (thread
//! attachment, native-method binding, storage paths) stay behind the
//! `HostAudioService` trait.
//!
//! ## Architecture
//!
//! ```text
//! audio-bridge-core (this crate)
//! ├── traits/       ← HostAudioService (the wire surface), DeviceSink
//! ├── models/       ← StreamFormat, DeviceDescriptor, SessionState, BridgeError
//! ├── wire          ← host encoding constants and codec
//! ├── stream/       ← DeviceSession (state machine), BufferChannel (shared buffer)
//! ├── enumerator    ← device listing and device-list forwarding
//! └── permission    ← PermissionGate (single-slot async request gate)
//! ```

pub mod enumerator;
pub mod models;
pub mod permission;
pub mod stream;
pub mod traits;
pub mod wire;

// Re-export key types at crate root for convenience.
pub use enumerator::{
    forward_device_added, forward_device_removed, DeviceEnumerator, MAX_REPORTED_DEVICES,
};
pub use models::device::{DeviceDescriptor, DeviceHandle};
pub use models::error::BridgeError;
pub use models::format::{Direction, SampleFormat, StreamFormat};
pub use models::state::SessionState;
pub use permission::{PermissionGate, AUDIO_PERMISSION_REQUEST_CODE};
pub use stream::buffer::BufferChannel;
pub use stream::session::DeviceSession;
pub use traits::device_sink::DeviceSink;
pub use traits::host_service::HostAudioService;
