use thiserror::Error;

use super::format::SampleFormat;

/// Errors surfaced by bridge operations.
///
/// All variants are returned to the immediate caller; nothing is retried
/// internally. Enumeration and the capture soft paths never error; they
/// degrade to empty or zero-effect results instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// Requested encoding is outside the wire-supported set. Detected
    /// before any host call is made.
    #[error("unsupported sample format {0}")]
    UnsupportedFormat(SampleFormat),

    /// The host's open call returned no result.
    #[error("host-side stream initialization failed")]
    ServiceInitFailed,

    /// The host replied with an unexpected shape or value.
    #[error("protocol mismatch: {0}")]
    ProtocolMismatch(String),

    /// Shared audio buffer allocation failed.
    #[error("audio buffer allocation failed")]
    OutOfMemory,

    /// Open attempted while this direction already has an open stream.
    #[error("stream already open for this direction")]
    StreamActive,
}
