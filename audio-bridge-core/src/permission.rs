//! Runtime-permission negotiation across the asynchronous host boundary.
//!
//! The host exposes a fire-and-forget `requestPermission` call and delivers
//! the grant later on a thread it owns. The gate makes that look
//! synchronous to bridge callers: a single request slot, taken under a
//! mutex and awaited on a condition variable, serializes every caller in
//! the process so at most one request is ever in flight.

use parking_lot::{Condvar, Mutex};

use crate::traits::host_service::HostAudioService;

/// Fixed request code passed with every permission request, echoed back by
/// the host's completion callback.
pub const AUDIO_PERMISSION_REQUEST_CODE: i32 = 1;

/// Single-slot request state. `busy` is held from the moment a caller takes
/// the slot until it has consumed its outcome, so a second caller cannot
/// issue a wire request in between.
struct Slot {
    busy: bool,
    outcome: Option<bool>,
}

/// Serializes asynchronous permission requests and awaits their results.
///
/// Create exactly one gate per managed runtime (typically process-wide) and
/// wire the host's completion callback to [`PermissionGate::complete`].
pub struct PermissionGate {
    slot: Mutex<Slot>,
    ready: Condvar,
}

impl PermissionGate {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot {
                busy: false,
                outcome: None,
            }),
            ready: Condvar::new(),
        }
    }

    /// Request `permission` from the host and block until it is resolved.
    ///
    /// Callers queue on the slot; whichever waiter the lock hands it to
    /// next goes next (no stronger fairness guarantee). The calling thread
    /// blocks for as long as the host takes to show its dialog and report
    /// back.
    pub fn request<S: HostAudioService + ?Sized>(&self, service: &S, permission: &str) -> bool {
        let mut slot = self.slot.lock();
        while slot.busy {
            self.ready.wait(&mut slot);
        }
        slot.busy = true;
        slot.outcome = None;
        drop(slot);

        log::debug!("requesting permission {permission}");
        service.request_permission(permission, AUDIO_PERMISSION_REQUEST_CODE);

        let mut slot = self.slot.lock();
        let granted = loop {
            match slot.outcome.take() {
                Some(granted) => break granted,
                None => self.ready.wait(&mut slot),
            }
        };
        slot.busy = false;
        self.ready.notify_all();
        granted
    }

    /// Deliver the host's completion. Called from the host's callback
    /// thread by the embedder.
    pub fn complete(&self, request_code: i32, granted: bool) {
        if request_code != AUDIO_PERMISSION_REQUEST_CODE {
            log::warn!("permission result for unexpected request code {request_code}");
        }
        let mut slot = self.slot.lock();
        if !slot.busy {
            log::warn!("permission result with no request in flight");
            return;
        }
        slot.outcome = Some(granted);
        self.ready.notify_all();
    }
}

impl Default for PermissionGate {
    fn default() -> Self {
        Self::new()
    }
}
