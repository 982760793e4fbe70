//! Host device enumeration and device-list forwarding.

use std::sync::Arc;

use crate::models::device::{DeviceDescriptor, DeviceHandle};
use crate::models::format::Direction;
use crate::traits::device_sink::DeviceSink;
use crate::traits::host_service::HostAudioService;

/// Upper bound on device ids taken from one enumeration reply; anything
/// beyond it is silently dropped.
pub const MAX_REPORTED_DEVICES: usize = 100;

/// Lists the host's audio devices per direction.
pub struct DeviceEnumerator<S> {
    service: Arc<S>,
}

impl<S: HostAudioService> DeviceEnumerator<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self { service }
    }

    /// List the host's devices for one direction, capped at
    /// [`MAX_REPORTED_DEVICES`].
    ///
    /// Never fails; an anomalous host reply surfaces as an empty list.
    pub fn list(&self, direction: Direction) -> Vec<DeviceDescriptor> {
        let mut ids = match direction {
            Direction::Output => self.service.audio_output_devices(),
            Direction::Capture => self.service.audio_input_devices(),
        };
        ids.truncate(MAX_REPORTED_DEVICES);
        ids.into_iter()
            .map(|id| DeviceDescriptor { id, direction })
            .collect()
    }

    /// Announce every currently known device to the engine's device list.
    pub fn announce_all(&self, sink: &dyn DeviceSink) {
        for direction in [Direction::Capture, Direction::Output] {
            for device in self.list(direction) {
                log::debug!("adding {} device {}", direction, device.id);
                sink.device_added(direction, DeviceHandle::from_id(device.id));
            }
        }
    }
}

/// Forward a host hot-plug arrival to the engine's device list.
///
/// Called from arbitrary host callback threads; the sink is internally
/// synchronized and must not be blocked on.
pub fn forward_device_added(sink: &dyn DeviceSink, direction: Direction, device_id: u32) {
    log::debug!("adding {direction} device {device_id}");
    sink.device_added(direction, DeviceHandle::from_id(device_id));
}

/// Forward a host hot-plug removal to the engine's device list.
pub fn forward_device_removed(sink: &dyn DeviceSink, direction: Direction, device_id: u32) {
    let handle = DeviceHandle::from_id(device_id);
    log::debug!("removing {direction} device with handle {}", handle.raw());
    sink.device_removed(direction, handle);
}
