// ── Process-wide sync state ──
//
// Owned by the engine and shared by `Arc`; there are no globals. Each
// resource type has its own record, and the force-refresh flag sits beside
// them because it is not tied to any one type.

use std::sync::atomic::{AtomicBool, Ordering};

use bridgewatch_api::{Bridge, SerialPort};

use super::record::ResourceStore;
use crate::resource::Resource;

/// All synchronized records plus the force-refresh override.
pub struct SyncState {
    bridges: ResourceStore<Bridge>,
    serial_ports: ResourceStore<SerialPort>,
    force_refresh: AtomicBool,
}

impl SyncState {
    pub fn new() -> Self {
        Self {
            bridges: ResourceStore::new(),
            serial_ports: ResourceStore::new(),
            force_refresh: AtomicBool::new(false),
        }
    }

    pub fn bridges(&self) -> &ResourceStore<Bridge> {
        &self.bridges
    }

    pub fn serial_ports(&self) -> &ResourceStore<SerialPort> {
        &self.serial_ports
    }

    /// Record for any resource type.
    pub fn store<R: Resource>(&self) -> &ResourceStore<R::Item> {
        R::store(self)
    }

    pub fn set_force_refresh(&self, on: bool) {
        self.force_refresh.store(on, Ordering::Release);
    }

    pub fn force_refresh(&self) -> bool {
        self.force_refresh.load(Ordering::Acquire)
    }
}

impl Default for SyncState {
    fn default() -> Self {
        Self::new()
    }
}
