use std::fmt;

use serde::{Deserialize, Serialize};

/// Direction of an audio stream.
///
/// Each direction has an independent session and shared buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Playback towards the host's output path.
    Output,
    /// Recording from the host's capture path.
    Capture,
}

impl Direction {
    pub fn is_capture(self) -> bool {
        matches!(self, Self::Capture)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Output => write!(f, "output"),
            Self::Capture => write!(f, "capture"),
        }
    }
}

/// Engine-side sample encodings.
///
/// The host wire protocol carries only `U8`, `S16` and `F32`; `S32` exists
/// on the engine side and is rejected during open, before any host call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleFormat {
    U8,
    S16,
    S32,
    F32,
}

impl SampleFormat {
    /// Size of one sample element in bytes.
    pub fn sample_size(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::S16 => 2,
            Self::S32 | Self::F32 => 4,
        }
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U8 => write!(f, "u8"),
            Self::S16 => write!(f, "s16"),
            Self::S32 => write!(f, "s32"),
            Self::F32 => write!(f, "f32"),
        }
    }
}

/// Requested or negotiated stream configuration.
///
/// Immutable once a session is open; the host's reply is authoritative and
/// may differ from the request. Renegotiation requires a fresh open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamFormat {
    pub sample_rate: u32,
    pub format: SampleFormat,
    pub channels: u16,
    pub frames_per_buffer: u32,
}

impl StreamFormat {
    /// Shared-buffer length in sample elements (frames × channels).
    pub fn buffer_len(&self) -> usize {
        self.frames_per_buffer as usize * usize::from(self.channels)
    }

    /// Shared-buffer length in bytes.
    pub fn buffer_bytes(&self) -> usize {
        self.buffer_len() * self.format.sample_size()
    }
}
