/// Call surface of the managed host audio service.
///
/// One method per wire entry. Method calls go in; completions that the host
/// delivers out-of-band (permission results, device hot-plug) come back
/// through [`crate::PermissionGate::complete`] and the
/// [`super::device_sink::DeviceSink`] forwarders, on threads the host owns.
///
/// Adapters binding a real host are expected to translate host-side
/// anomalies (a missing reply array, a dead binding) into the neutral
/// values below (empty device lists, `None` open replies, non-positive
/// read counts) rather than panicking into the bridge.
pub trait HostAudioService: Send + Sync {
    /// Ids of the host's output devices.
    fn audio_output_devices(&self) -> Vec<u32>;

    /// Ids of the host's capture devices.
    fn audio_input_devices(&self) -> Vec<u32>;

    /// Open the output path. Returns the negotiated
    /// `[rate, wire_encoding, channels, frames_per_buffer]`, or `None` when
    /// host-side initialization failed.
    fn audio_open(
        &self,
        sample_rate: u32,
        wire_encoding: i32,
        channels: u16,
        frames_per_buffer: u32,
        device_id: u32,
    ) -> Option<Vec<i32>>;

    /// Open the capture path. Reply shape as for [`Self::audio_open`].
    fn capture_open(
        &self,
        sample_rate: u32,
        wire_encoding: i32,
        channels: u16,
        frames_per_buffer: u32,
        device_id: u32,
    ) -> Option<Vec<i32>>;

    fn audio_write_byte_buffer(&self, buffer: &[u8]);
    fn audio_write_short_buffer(&self, buffer: &[i16]);
    fn audio_write_float_buffer(&self, buffer: &[f32]);

    /// Fill `buffer` from the host's capture stream. Returns the number of
    /// elements read; non-positive means nothing was read.
    fn capture_read_byte_buffer(&self, buffer: &mut [u8], blocking: bool) -> i32;
    fn capture_read_short_buffer(&self, buffer: &mut [i16], blocking: bool) -> i32;
    fn capture_read_float_buffer(&self, buffer: &mut [f32], blocking: bool) -> i32;

    fn audio_close(&self);
    fn capture_close(&self);

    /// Ask the host to promote the stream's callback thread.
    fn audio_set_thread_priority(&self, is_capture: bool, device_id: u32);

    /// Start an asynchronous runtime-permission request. Fire-and-forget:
    /// the grant arrives later through the host's completion callback.
    fn request_permission(&self, permission: &str, request_code: i32);
}
