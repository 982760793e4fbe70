//! Shared sample buffer for one open stream.
//!
//! The buffer is the bridge's half of the exchange with the host: output
//! frames are written into it and handed over on `commit`, capture frames
//! land in it during a host read and are copied out. Its heap allocation is
//! created once per open and never moves or resizes, which is what keeps
//! the output write pointer valid between open and close.

use std::sync::Arc;

use crate::models::error::BridgeError;
use crate::models::format::{Direction, SampleFormat, StreamFormat};
use crate::traits::host_service::HostAudioService;

/// Allocate a zeroed boxed slice without aborting on exhaustion.
fn pinned_box<T: Default + Clone>(len: usize) -> Result<Box<[T]>, BridgeError> {
    let mut elems: Vec<T> = Vec::new();
    elems
        .try_reserve_exact(len)
        .map_err(|_| BridgeError::OutOfMemory)?;
    elems.resize(len, T::default());
    Ok(elems.into_boxed_slice())
}

/// Copy up to `elems` leading elements of `src` into `dst` as raw bytes.
/// Returns the number of bytes copied.
fn copy_elems_out<T>(src: &[T], dst: &mut [u8], elems: usize) -> usize {
    let size = std::mem::size_of::<T>();
    let count = elems.min(src.len()).min(dst.len() / size);
    let bytes = count * size;
    // SAFETY: sample elements are plain old data; any prefix of the slice
    // is viewable as bytes.
    let raw = unsafe { std::slice::from_raw_parts(src.as_ptr().cast::<u8>(), bytes) };
    dst[..bytes].copy_from_slice(raw);
    bytes
}

/// Sample storage tagged by the negotiated encoding.
///
/// One generic allocation behind an encoding tag. Every operation matches
/// the tag exactly once, then funnels into the distinct byte/short/float
/// wire call the host protocol requires.
enum SampleStore {
    U8(Box<[u8]>),
    S16(Box<[i16]>),
    F32(Box<[f32]>),
}

impl SampleStore {
    fn allocate(format: SampleFormat, len: usize) -> Result<Self, BridgeError> {
        match format {
            SampleFormat::U8 => Ok(Self::U8(pinned_box(len)?)),
            SampleFormat::S16 => Ok(Self::S16(pinned_box(len)?)),
            SampleFormat::F32 => Ok(Self::F32(pinned_box(len)?)),
            other => Err(BridgeError::UnsupportedFormat(other)),
        }
    }

    /// Length in sample elements.
    fn len(&self) -> usize {
        match self {
            Self::U8(buf) => buf.len(),
            Self::S16(buf) => buf.len(),
            Self::F32(buf) => buf.len(),
        }
    }

    fn base_ptr(&mut self) -> *mut u8 {
        match self {
            Self::U8(buf) => buf.as_mut_ptr(),
            Self::S16(buf) => buf.as_mut_ptr().cast(),
            Self::F32(buf) => buf.as_mut_ptr().cast(),
        }
    }

    fn write_to_host<S: HostAudioService + ?Sized>(&self, service: &S) {
        match self {
            Self::U8(buf) => service.audio_write_byte_buffer(buf),
            Self::S16(buf) => service.audio_write_short_buffer(buf),
            Self::F32(buf) => service.audio_write_float_buffer(buf),
        }
    }

    fn read_from_host<S: HostAudioService + ?Sized>(&mut self, service: &S, blocking: bool) -> i32 {
        match self {
            Self::U8(buf) => service.capture_read_byte_buffer(buf, blocking),
            Self::S16(buf) => service.capture_read_short_buffer(buf, blocking),
            Self::F32(buf) => service.capture_read_float_buffer(buf, blocking),
        }
    }

    fn copy_out(&self, dst: &mut [u8], elems: usize) -> usize {
        match self {
            Self::U8(buf) => copy_elems_out(buf, dst, elems),
            Self::S16(buf) => copy_elems_out(buf, dst, elems),
            Self::F32(buf) => copy_elems_out(buf, dst, elems),
        }
    }
}

/// Buffer channel for one open stream direction.
///
/// Created by a successful session open, destroyed by close; the session
/// state machine guarantees at most one channel per direction. All methods
/// are meant to be called from the stream's callback thread; in particular
/// `commit` must run on the thread the output pointer was pinned for, a
/// contract the bridge documents but cannot enforce across the boundary.
pub struct BufferChannel<S: HostAudioService> {
    service: Arc<S>,
    direction: Direction,
    format: StreamFormat,
    store: SampleStore,
    /// Base address of the store, captured at allocation for output
    /// streams; null for capture streams.
    pinned: *mut u8,
}

// SAFETY: `pinned` aliases the heap allocation owned by `store`, which
// lives exactly as long as the channel. The channel is driven by one stream
// thread at a time per the session contract.
unsafe impl<S: HostAudioService> Send for BufferChannel<S> {}

impl<S: HostAudioService> BufferChannel<S> {
    pub(crate) fn allocate(
        service: Arc<S>,
        direction: Direction,
        format: StreamFormat,
    ) -> Result<Self, BridgeError> {
        let mut store = SampleStore::allocate(format.format, format.buffer_len())?;
        let pinned = match direction {
            Direction::Output => store.base_ptr(),
            Direction::Capture => std::ptr::null_mut(),
        };
        Ok(Self {
            service,
            direction,
            format,
            store,
            pinned,
        })
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn format(&self) -> &StreamFormat {
        &self.format
    }

    /// Buffer length in bytes.
    pub fn byte_len(&self) -> usize {
        self.store.len() * self.format.format.sample_size()
    }

    /// Pinned base pointer of the shared output buffer.
    ///
    /// Valid from open until close and stable across `commit`: the buffer
    /// is never reallocated or re-pinned. Null for capture channels. The
    /// caller has exclusive write access to the region until the next
    /// `commit` returns.
    pub fn write_ptr(&self) -> *mut u8 {
        self.pinned
    }

    /// Safe byte view of the shared buffer, for filling before `commit`.
    pub fn frame_bytes(&mut self) -> &mut [u8] {
        let bytes = self.byte_len();
        let base = self.store.base_ptr();
        // SAFETY: the store allocation is `bytes` long and exclusively
        // borrowed through `self` for the returned lifetime.
        unsafe { std::slice::from_raw_parts_mut(base, bytes) }
    }

    /// Hand the written region to the host via the wire write call matching
    /// the negotiated encoding.
    ///
    /// Output streams only; on a capture channel this logs and does
    /// nothing. Must run on the stream's designated callback thread.
    pub fn commit(&mut self) {
        if self.direction.is_capture() {
            log::warn!("commit on a capture channel ignored");
            return;
        }
        self.store.write_to_host(self.service.as_ref());
    }

    /// Blocking capture read: one wire read into the shared buffer, then a
    /// copy of at most `dst.len()` bytes out of it.
    ///
    /// Returns the number of bytes copied; 0 when the host read nothing or
    /// failed. On an output channel this logs and returns 0.
    pub fn read(&mut self, dst: &mut [u8]) -> usize {
        if !self.direction.is_capture() {
            log::warn!("read on an output channel ignored");
            return 0;
        }
        debug_assert_eq!(
            self.store.len(),
            dst.len() / self.format.format.sample_size(),
            "capture destination does not match the negotiated buffer"
        );
        let elems = self.store.read_from_host(self.service.as_ref(), true);
        if elems <= 0 {
            return 0;
        }
        self.store.copy_out(dst, elems as usize)
    }

    /// Drain at most one pending capture block: a single non-blocking wire
    /// read, result discarded, no copy.
    pub fn flush(&mut self) {
        if !self.direction.is_capture() {
            log::warn!("flush on an output channel ignored");
            return;
        }
        let _ = self.store.read_from_host(self.service.as_ref(), false);
    }
}
