//! # audio-bridge-loopback
//!
//! In-process reference host for `audio-bridge-core`.
//!
//! Implements `HostAudioService` entirely in software: opens echo the
//! requested format, committed output lands in an inspectable byte ring,
//! capture reads serve pre-queued bytes, and permission requests complete
//! asynchronously on a spawned thread. Integration tests drive the whole
//! bridge through it; embedders binding a real host can start from the
//! same shape.

pub mod host;
pub mod queue;

pub use host::{LoopbackHost, OpenParams, PermissionResultFn, DEFAULT_QUEUE_BYTES};
pub use queue::ByteRing;
