//! Stream session: open, format negotiation, and teardown for one
//! direction against the host audio service.

use std::sync::Arc;

use crate::models::device::DeviceHandle;
use crate::models::error::BridgeError;
use crate::models::format::{Direction, StreamFormat};
use crate::models::state::SessionState;
use crate::stream::buffer::BufferChannel;
use crate::traits::host_service::HostAudioService;
use crate::wire;

/// One direction's stream session.
///
/// Owns the host binding, the state machine and, while open, the single
/// shared buffer channel for its direction. Open and close take `&mut self`
/// and perform no locking of their own; callers serialize them across
/// threads. Channel operations happen on the stream's callback thread via
/// [`DeviceSession::channel_mut`].
pub struct DeviceSession<S: HostAudioService> {
    service: Arc<S>,
    direction: Direction,
    state: SessionState,
    device: Option<DeviceHandle>,
    channel: Option<BufferChannel<S>>,
}

impl<S: HostAudioService> DeviceSession<S> {
    pub fn new(service: Arc<S>, direction: Direction) -> Self {
        Self {
            service,
            direction,
            state: SessionState::Closed,
            device: None,
            channel: None,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The format the host settled on, while open.
    pub fn negotiated(&self) -> Option<StreamFormat> {
        self.channel.as_ref().map(|channel| *channel.format())
    }

    pub fn channel_mut(&mut self) -> Option<&mut BufferChannel<S>> {
        self.channel.as_mut()
    }

    /// Open the stream on `device_id` and negotiate a format.
    ///
    /// The request's encoding must be wire-supported; anything else fails
    /// with [`BridgeError::UnsupportedFormat`] before the host is called.
    /// The host's reply is authoritative and may differ
    /// from the request. Any failure leaves the session `Closed` with no
    /// buffer allocated.
    pub fn open(
        &mut self,
        device_id: u32,
        requested: &StreamFormat,
    ) -> Result<StreamFormat, BridgeError> {
        if !self.state.is_closed() {
            return Err(BridgeError::StreamActive);
        }
        let encoding = wire::to_wire(requested.format)
            .ok_or(BridgeError::UnsupportedFormat(requested.format))?;

        self.state = SessionState::Opening;
        log::debug!("opening {} stream on device {device_id}", self.direction);

        match self.negotiate_and_allocate(device_id, encoding, requested) {
            Ok(negotiated) => {
                self.device = Some(DeviceHandle::from_id(device_id));
                self.state = SessionState::Open;
                Ok(negotiated)
            }
            Err(err) => {
                self.channel = None;
                self.state = SessionState::Closed;
                Err(err)
            }
        }
    }

    fn negotiate_and_allocate(
        &mut self,
        device_id: u32,
        encoding: i32,
        requested: &StreamFormat,
    ) -> Result<StreamFormat, BridgeError> {
        let reply = match self.direction {
            Direction::Output => self.service.audio_open(
                requested.sample_rate,
                encoding,
                requested.channels,
                requested.frames_per_buffer,
                device_id,
            ),
            Direction::Capture => self.service.capture_open(
                requested.sample_rate,
                encoding,
                requested.channels,
                requested.frames_per_buffer,
                device_id,
            ),
        };
        let reply = reply.ok_or(BridgeError::ServiceInitFailed)?;
        let &[rate, reply_encoding, channels, frames] = &reply[..] else {
            return Err(BridgeError::ProtocolMismatch(format!(
                "expected 4 reply fields, got {}",
                reply.len()
            )));
        };

        let format = wire::from_wire(reply_encoding).ok_or_else(|| {
            BridgeError::ProtocolMismatch(format!("unknown wire encoding {reply_encoding}"))
        })?;
        let negotiated = StreamFormat {
            sample_rate: u32::try_from(rate).map_err(|_| {
                BridgeError::ProtocolMismatch(format!("sample rate {rate} out of range"))
            })?,
            format,
            channels: u16::try_from(channels).map_err(|_| {
                BridgeError::ProtocolMismatch(format!("channel count {channels} out of range"))
            })?,
            frames_per_buffer: u32::try_from(frames).map_err(|_| {
                BridgeError::ProtocolMismatch(format!("frame count {frames} out of range"))
            })?,
        };

        self.channel = Some(BufferChannel::allocate(
            Arc::clone(&self.service),
            self.direction,
            negotiated,
        )?);
        Ok(negotiated)
    }

    /// Close the stream and release the shared buffer.
    ///
    /// Idempotent: closing an already-closed session still issues the wire
    /// close (the host tolerates the repeat) and never fails. Dropping the
    /// channel releases the buffer and invalidates the output write
    /// pointer.
    pub fn close(&mut self) {
        self.state = SessionState::Closing;
        log::debug!("closing {} stream", self.direction);
        match self.direction {
            Direction::Output => self.service.audio_close(),
            Direction::Capture => self.service.capture_close(),
        }
        self.channel = None;
        self.device = None;
        self.state = SessionState::Closed;
    }

    /// Ask the host to promote the stream's callback thread for this
    /// device. No-op while closed.
    pub fn promote_stream_thread(&self) {
        match self.device {
            Some(device) => self
                .service
                .audio_set_thread_priority(self.direction.is_capture(), device.device_id()),
            None => {
                log::debug!(
                    "thread priority requested with no open {} stream",
                    self.direction
                );
            }
        }
    }
}
