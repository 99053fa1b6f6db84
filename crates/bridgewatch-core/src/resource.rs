// ── Resource types ──
//
// A resource type selects the API path, the item shape, and the record
// in `SyncState` it is committed to. Adding a type means one `ResourceKind`
// variant plus one marker type implementing `Resource`.

use serde::Serialize;
use serde::de::DeserializeOwned;
use strum::{Display, EnumIter, IntoStaticStr};

use bridgewatch_api::{Bridge, SerialPort};

use crate::store::{ResourceStore, SyncState};

/// Identity of a synchronized resource type.
///
/// The snake_case form doubles as the API path segment and the log tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Bridges,
    SerialPorts,
}

impl ResourceKind {
    /// Path relative to the service base URL.
    pub fn path(self) -> &'static str {
        self.into()
    }

    /// Stable failure code carried by notifications.
    pub fn failure_code(self) -> &'static str {
        match self {
            Self::Bridges => "BRIDGES_FETCH_FAIL",
            Self::SerialPorts => "SERIAL_PORTS_FETCH_FAIL",
        }
    }

    /// Human-readable plural, for messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Bridges => "bridges",
            Self::SerialPorts => "serial ports",
        }
    }
}

/// A resource type the engine can synchronize.
///
/// Implemented by zero-sized markers so the sync cycle is monomorphized per
/// type and the item shape is checked at compile time.
pub trait Resource: Send + Sync + 'static {
    type Item: DeserializeOwned + Serialize + Clone + Send + Sync + 'static;

    const KIND: ResourceKind;

    /// The record this type is committed to.
    fn store(state: &SyncState) -> &ResourceStore<Self::Item>;
}

/// Available serial bridges.
#[derive(Debug, Clone, Copy)]
pub struct Bridges;

impl Resource for Bridges {
    type Item = Bridge;

    const KIND: ResourceKind = ResourceKind::Bridges;

    fn store(state: &SyncState) -> &ResourceStore<Bridge> {
        state.bridges()
    }
}

/// Available serial ports.
#[derive(Debug, Clone, Copy)]
pub struct SerialPorts;

impl Resource for SerialPorts {
    type Item = SerialPort;

    const KIND: ResourceKind = ResourceKind::SerialPorts;

    fn store(state: &SyncState) -> &ResourceStore<SerialPort> {
        state.serial_ports()
    }
}
