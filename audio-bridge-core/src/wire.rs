//! Wire encoding constants shared with the host audio service.

use crate::models::format::SampleFormat;

pub const ENCODING_PCM_8BIT: i32 = 3;
pub const ENCODING_PCM_16BIT: i32 = 2;
pub const ENCODING_PCM_FLOAT: i32 = 4;

/// Wire constant for an engine sample format, or `None` if the wire cannot
/// carry it.
pub fn to_wire(format: SampleFormat) -> Option<i32> {
    match format {
        SampleFormat::U8 => Some(ENCODING_PCM_8BIT),
        SampleFormat::S16 => Some(ENCODING_PCM_16BIT),
        SampleFormat::F32 => Some(ENCODING_PCM_FLOAT),
        SampleFormat::S32 => None,
    }
}

/// Engine sample format for a wire constant, or `None` for anything outside
/// the supported set.
pub fn from_wire(encoding: i32) -> Option<SampleFormat> {
    match encoding {
        ENCODING_PCM_8BIT => Some(SampleFormat::U8),
        ENCODING_PCM_16BIT => Some(SampleFormat::S16),
        ENCODING_PCM_FLOAT => Some(SampleFormat::F32),
        _ => None,
    }
}
