use crate::models::device::DeviceHandle;
use crate::models::format::Direction;

/// The audio engine's device list.
///
/// The bridge only forwards host add/remove notifications; list semantics
/// (deduplication, default selection, hot-plug policy) stay with the engine.
/// Calls arrive on arbitrary host callback threads, so implementations must
/// be internally synchronized and must not block.
pub trait DeviceSink: Send + Sync {
    fn device_added(&self, direction: Direction, handle: DeviceHandle);

    fn device_removed(&self, direction: Direction, handle: DeviceHandle);
}
