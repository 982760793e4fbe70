use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

use super::format::Direction;

/// One enumerated host device. Ephemeral: valid for the enumeration call
/// that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    pub id: u32,
    pub direction: Direction,
}

/// Cached handle for a host device id.
///
/// Host ids are plain non-negative integers and zero is a legal id, so the
/// handle stores `id + 1`: zero stays reserved as the invalid sentinel and
/// `Option<DeviceHandle>` costs nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceHandle(NonZeroU64);

impl DeviceHandle {
    pub fn from_id(id: u32) -> Self {
        Self(NonZeroU64::MIN.saturating_add(u64::from(id)))
    }

    /// The host device id this handle was derived from.
    pub fn device_id(self) -> u32 {
        (self.0.get() - 1) as u32
    }

    /// The raw non-zero handle value (`id + 1`).
    pub fn raw(self) -> u64 {
        self.0.get()
    }
}
